//! Configuration management for offer-gate.
//!
//! Settings come from command-line arguments via clap, with environment
//! variable fallbacks using the `OFFERS_` prefix:
//!
//! - `OFFERS_HOST` - Server bind address (default: 0.0.0.0)
//! - `OFFERS_PORT` - Server port (default: 8080)
//! - `OFFERS_DISPLAY_ENDPOINT` - Path of the display page (default: /display)
//! - `OFFERS_CONTENT_DIR` - Directory holding `index.html` and `display.html`
//! - `OFFERS_OFFERS_FILE` - JSON file with the offers payload
//!
//! Without a content directory the built-in pages are served; without an
//! offers file the payload is `{"offers": []}`.

use std::path::PathBuf;

use clap::Parser;

use crate::server::{validate_display_endpoint, RouterConfig, DEFAULT_DISPLAY_ENDPOINT};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 8080;

// =============================================================================
// CLI Arguments
// =============================================================================

/// offer-gate - issue a token, redeem it for offers.
#[derive(Parser, Debug, Clone)]
#[command(name = "offer-gate")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "OFFERS_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "OFFERS_PORT")]
    pub port: u16,

    /// Path the display page is served on and redirected to.
    #[arg(long, default_value = DEFAULT_DISPLAY_ENDPOINT, env = "OFFERS_DISPLAY_ENDPOINT")]
    pub display_endpoint: String,

    /// Directory containing `index.html` and `display.html`.
    #[arg(long, env = "OFFERS_CONTENT_DIR")]
    pub content_dir: Option<PathBuf>,

    /// JSON file with the offers payload.
    #[arg(long, env = "OFFERS_OFFERS_FILE")]
    pub offers_file: Option<PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("host must not be empty. Set --host or OFFERS_HOST".to_string());
        }

        if self.port == 0 {
            return Err("port must be greater than 0".to_string());
        }

        validate_display_endpoint(&self.display_endpoint)
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Build the router configuration from these settings.
    pub fn router_config(&self) -> RouterConfig {
        RouterConfig::new()
            .with_display_endpoint(self.display_endpoint.clone())
            .with_tracing(!self.no_tracing)
    }
}

// =============================================================================
// Tests
// =============================================================================
