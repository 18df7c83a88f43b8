//! Command line argument handling

use clap::Parser;

/// Environment variable holding the Unsplash access key
pub const PHOTO_KEY_ENV: &str = "UNSPLASH_ACCESS_KEY";

/// Command line arguments for the city weather dashboard
#[derive(Parser, Debug)]
#[command(author, version, about = "Look up current, hourly, and daily weather for any city")]
pub struct Cli {
    /// City to look up immediately on startup
    pub city: Option<String>,

    /// Disable the background city photo lookup
    #[arg(long)]
    pub no_photo: bool,
}

/// Resolved startup configuration: CLI arguments plus environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupConfig {
    /// City searched as soon as the app starts, if given
    pub initial_city: Option<String>,
    /// Unsplash access key; `None` disables photo lookup entirely
    pub photo_key: Option<String>,
}

impl StartupConfig {
    /// Builds the configuration from parsed arguments and the environment
    pub fn from_cli(cli: Cli) -> Self {
        let key = std::env::var(PHOTO_KEY_ENV).ok();
        Self::from_cli_with_key(cli, key)
    }

    /// Builds the configuration with an explicit key (for testing)
    pub fn from_cli_with_key(cli: Cli, key: Option<String>) -> Self {
        let photo_key = if cli.no_photo {
            None
        } else {
            key.filter(|k| !k.trim().is_empty())
        };
        Self {
            initial_city: cli.city.filter(|c| !c.trim().is_empty()),
            photo_key,
        }
    }
}
