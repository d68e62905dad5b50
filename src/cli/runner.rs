//! CLI runner - executes commands

use crate::cli::commands::Cli;
use crate::config::AppConfig;
use crate::error::Result;
use crate::fetcher::MtgClient;
use crate::http::HttpClient;
use crate::output::CardWriter;
use crate::throttle::{SharedSink, Throttler};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, printing cards to stdout
    pub async fn run(&self) -> Result<()> {
        self.execute(io::stdout()).await?;
        Ok(())
    }

    /// Harvest, transform and write cards to `out`
    ///
    /// Returns the number of cards written.
    pub async fn execute<W: Write>(&self, out: W) -> Result<usize> {
        let config = self.load_config()?;
        config.validate()?;
        debug!(?config, "Configuration loaded");

        let http = HttpClient::with_config(config.http_client_config())?;
        let sink = SharedSink::new();
        let fetcher = Arc::new(MtgClient::new(http));
        let throttler = Throttler::new(fetcher, sink.clone()).with_config(config.throttle);

        let stats = throttler.run().await?;
        debug!(?stats, "Run statistics");

        let transform = self.cli.command.transform();
        let cards = transform.apply(sink.take().await);
        info!(
            harvested = stats.records,
            selected = cards.len(),
            mode = ?self.cli.command,
            "Cards ready"
        );

        CardWriter::new(out, self.cli.format).write_cards(&cards)
    }

    /// Configuration file, then command-line overrides
    fn load_config(&self) -> Result<AppConfig> {
        let mut config = match &self.cli.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(base_url) = &self.cli.base_url {
            config.api.base_url.clone_from(base_url);
        }
        if let Some(max_burst) = self.cli.max_burst {
            config.throttle.max_burst = max_burst;
        }
        if let Some(tick_ms) = self.cli.tick_ms {
            config.throttle.tick_interval = Duration::from_millis(tick_ms);
        }

        Ok(config)
    }
}
