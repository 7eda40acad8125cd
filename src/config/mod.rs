use anyhow::{Context, Result};
use dotenvy::dotenv;
use serde::Deserialize;

use crate::settings::{Currency, DateFormat};

const DEFAULT_DUE_DAYS: u32 = 14;
const DEFAULT_LOG_FILTER: &str = "invoice_dashboard=info";

/// Configuration for the application
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    /// CSV file to read invoices from instead of the sample data
    #[serde(default)]
    pub invoices_csv: Option<String>,

    /// Days between issue date and due date of a new draft
    #[serde(default = "default_due_days")]
    pub draft_due_days: u32,

    /// Fallback tracing filter when `RUST_LOG` is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Currency symbol for printed amounts
    #[serde(default)]
    pub currency: Currency,

    /// How printed dates are laid out
    #[serde(default)]
    pub date_format: DateFormat,
}

fn default_due_days() -> u32 {
    DEFAULT_DUE_DAYS
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Variables from a `.env` file are loaded first if one exists.
    pub fn load() -> Result<Self> {
        dotenv().ok();

        Self::from_pairs(std::env::vars())
    }

    /// Build a configuration from key/value pairs named like the environment
    /// variables
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(pairs).context("invalid configuration")
    }

    pub fn invoices_csv(&self) -> Option<&str> {
        self.invoices_csv.as_deref()
    }

    /// Replace the invoice source, e.g. from a command line flag
    pub fn with_invoices_csv(mut self, path: Option<String>) -> Self {
        if path.is_some() {
            self.invoices_csv = path;
        }
        self
    }
}

/// Load `.env` and the configuration
pub fn init() -> Result<Config> {
    Config::load()
}
