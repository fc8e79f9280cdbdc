//! Command line configuration

use std::path::PathBuf;

use aurea::catalog::Filter;
use clap::{Args, Parser, Subcommand};

/// Aurea storefront command line
#[derive(Debug, Parser)]
#[command(name = "aurea", about = "Aurea storefront", long_about = None)]
pub struct Config {
    /// Catalog dataset file (.json, .yaml or .yml); sample products when unset
    #[arg(long, env = "AUREA_CATALOG", global = true)]
    pub catalog: Option<PathBuf>,

    /// Directory the cart is stored in; the cart lives in memory when unset
    #[arg(long, env = "AUREA_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(flatten)]
    pub logging: LoggingConfig,

    #[command(subcommand)]
    pub command: Command,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::load_from(std::env::args_os())
    }

    /// Load configuration from environment and the given arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse_from(args)
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "AUREA_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Storefront actions.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List products
    List {
        #[command(flatten)]
        filter: FilterArgs,

        /// Print the product grid HTML instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Show a product's details
    Show {
        /// Product id
        id: String,

        /// Print the detail view HTML instead of text
        #[arg(long)]
        html: bool,
    },

    /// Add a product to the cart
    Add {
        /// Product id
        id: String,
    },

    /// Remove an item from the cart by its position
    Remove {
        /// Position as shown by `cart`, starting at 0
        index: usize,
    },

    /// Show the cart
    Cart {
        /// Print the cart panel and counter HTML instead of a table
        #[arg(long)]
        html: bool,
    },

    /// Place an order for everything in the cart
    Checkout {
        /// Shipping address
        #[arg(long)]
        address: String,

        /// Payment method (transfer, credit-card, e-wallet, cod)
        #[arg(long)]
        payment: Option<String>,

        /// Print the confirmation HTML instead of a receipt
        #[arg(long)]
        html: bool,
    },

    /// Show where the catalog data came from
    Source,

    /// Send a message through the contact form
    Contact {
        /// Your name
        #[arg(long, default_value = "")]
        name: String,

        /// Your email address
        #[arg(long, default_value = "")]
        email: String,

        /// Message
        #[arg(long, default_value = "")]
        message: String,
    },
}

/// Catalog subset to list. At most one may be given.
#[derive(Debug, Args)]
#[group(multiple = false)]
pub struct FilterArgs {
    /// Only featured products
    #[arg(long)]
    pub featured: bool,

    /// Only new arrivals
    #[arg(long)]
    pub new: bool,

    /// Only products in this category (`all` for every product)
    #[arg(long)]
    pub category: Option<String>,

    /// Only products matching this search term
    #[arg(long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// The catalog filter these flags select.
    pub fn filter(&self) -> Filter {
        if self.featured {
            Filter::Featured
        } else if self.new {
            Filter::New
        } else if let Some(category) = &self.category {
            Filter::category(category.clone())
        } else if let Some(query) = &self.search {
            Filter::Search(query.clone())
        } else {
            Filter::All
        }
    }
}
