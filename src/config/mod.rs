//! Configuration module

mod site;

pub use site::AnalyticsConfig;
pub use site::CommentProvider;
pub use site::CommentsConfig;
pub use site::ConfigError;
pub use site::ExcerptConfig;
pub use site::FeedConfig;
pub use site::GoogleFont;
pub use site::ManifestConfig;
pub use site::MarkdownConfig;
pub use site::SiteConfig;
pub use site::SiteMetadata;
pub use site::Social;
pub use site::TypographyConfig;
