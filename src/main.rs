//! CLI entry point for brewlog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "brewlog")]
#[command(version)]
#[command(about = "A static blog generator", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new blog
    Init {
        /// Directory to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        folder: PathBuf,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Slug of the new post (defaults to the slugified title)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Generate static files
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,

        /// Fail on posts that cannot be loaded instead of skipping them
        #[arg(long)]
        strict: bool,
    },

    /// Start a local preview server
    #[command(alias = "s")]
    Server {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,

        /// Enable static mode (no file watching)
        #[arg(long)]
        r#static: bool,
    },

    /// Remove the generated site
    Clean,

    /// List site information
    List {
        /// Type of content to list (post, route)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.debug {
        "brewlog=debug,info"
    } else {
        "brewlog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot read the current directory")?,
    };

    match cli.command {
        Commands::Init { folder } => {
            let target_dir = if folder.is_absolute() {
                folder
            } else {
                base_dir.join(folder)
            };
            tracing::info!("Initializing blog in {:?}", target_dir);
            brewlog::commands::init::init_site(&target_dir)?;
            println!("Initialized blog in {:?}", target_dir);
        }

        Commands::New { title, slug } => {
            let blog = brewlog::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, slug.as_deref())?;
            println!("Created: {:?}", path);
        }

        Commands::Generate { watch, strict } => {
            let mut blog = brewlog::Blog::new(&base_dir)?;
            blog.config.strict |= strict;
            tracing::info!("Generating static files...");

            blog.generate()?;
            println!("Generated successfully!");

            if watch {
                brewlog::commands::generate::watch(&blog).await?;
            }
        }

        Commands::Server {
            port,
            ip,
            open,
            r#static,
        } => {
            let blog = brewlog::Blog::new(&base_dir)?;

            tracing::info!("Generating static files...");
            blog.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            brewlog::server::start(&blog, &ip, port, !r#static, open).await?;
        }

        Commands::Clean => {
            let blog = brewlog::Blog::new(&base_dir)?;
            tracing::info!("Cleaning public folder...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { r#type } => {
            let blog = brewlog::Blog::new(&base_dir)?;
            brewlog::commands::list::run(&blog, &r#type)?;
        }

        Commands::Version => {
            println!("brewlog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
