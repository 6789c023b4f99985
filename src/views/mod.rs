//! Views - turn posts and site metadata into page models
//!
//! Each view is a pure function of its inputs: the route and site title are
//! passed in, nothing is read from ambient state. Templates then render the
//! models to HTML.

pub mod detail;
pub mod layout;
pub mod list;
pub mod seo;

pub use detail::{DetailView, NavTarget};
pub use layout::{contact_links, Footer, FooterLink, Header, HeaderStyle, Layout};
pub use list::{ListEntry, ListView};
pub use seo::{MetaTag, Seo, SeoPage};
