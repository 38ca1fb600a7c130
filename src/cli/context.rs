//! Command execution context
//!
//! Loads configuration once and wires the client stack. One client, and so
//! one backoff manager and cache, is shared by every request in the process.

use std::sync::Arc;

use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::{Clock, HttpTransport, MarvelClient, SystemClock};
use crate::config::Config;
use crate::error::Result;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Effective configuration (file plus environment overrides)
    pub config: Config,
    /// Marvel API client, Arc-wrapped so browsers and handlers can share it
    pub client: Arc<MarvelClient>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// # Errors
    /// Returns an error if the config file is unreadable or either key is
    /// missing.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let mut config = Config::load_effective(opts.config_ref())?;

        if let Some(host) = opts.api_host_ref() {
            config.api_host = Some(host.to_string());
        }

        let credentials = config.credentials()?;
        debug!("Using public key {}", credentials.redacted_public_key());

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let transport =
            HttpTransport::with_host(credentials, Arc::clone(&clock), config.api_host.clone())?;
        debug!("API base URL: {}", transport.base_url());

        let client = Arc::new(MarvelClient::with_clock(Arc::new(transport), clock));

        let format = resolve_format(opts.format, &config);

        Ok(Self {
            config,
            client,
            format,
        })
    }

    /// Configured default page size.
    pub fn page_size(&self) -> u32 {
        self.config.preferences.page_size
    }
}

/// Flag or env var first, then the config preference, then pretty.
fn resolve_format(flag: Option<OutputFormat>, config: &Config) -> OutputFormat {
    flag.or_else(|| {
        config
            .preferences
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
    })
    .unwrap_or_default()
}
