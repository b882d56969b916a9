// flux-core/src/config.rs
// Settings for the flux monitor: exchange access, poll schedules, tracked pairs.
//
// Sources, lowest priority first: built-in defaults, an optional `config.*`
// file next to the binary, then `FLUX__*` environment variables
// (e.g. `FLUX__EXCHANGE__ADDRESS`, `FLUX__FLUX__TICKER__INTERVAL_MS`).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use flux_common::CurrencyPair;
use serde::Deserialize;
use std::time::Duration;

use crate::flux::PollerConfig;

#[derive(Debug, Deserialize, Clone)]
pub struct Exchange {
    pub testnet: bool,
    /// Wallet whose accounts and orders are tracked
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FluxSchedule {
    pub interval_ms: u64,
    pub emit_removals: bool,
}

impl FluxSchedule {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn poller_config(&self, name: &str) -> PollerConfig {
        PollerConfig::new(name, self.interval()).with_removals(self.emit_removals)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct Fluxes {
    pub account: FluxSchedule,
    pub order: FluxSchedule,
    pub ticker: FluxSchedule,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TickerSettings {
    pub pairs: Vec<CurrencyPair>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub exchange: Exchange,
    pub flux: Fluxes,
    pub ticker: TickerSettings,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Self::defaults()?
            .add_source(File::with_name("config").required(false))
            .add_source(
                Environment::with_prefix("FLUX")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("ticker.pairs")
                    .try_parsing(true),
            )
            .build()?;

        Self::finish(s)
    }

    /// Defaults overlaid with a TOML document. No file or environment lookup.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        let s = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;

        Self::finish(s)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("exchange.testnet", false)?
            .set_default("flux.account.interval_ms", 5_000)?
            .set_default("flux.account.emit_removals", false)?
            .set_default("flux.order.interval_ms", 2_000)?
            .set_default("flux.order.emit_removals", false)?
            .set_default("flux.ticker.interval_ms", 1_000)?
            .set_default("flux.ticker.emit_removals", false)?
            .set_default(
                "ticker.pairs",
                vec!["BTC/USDC".to_string(), "ETH/USDC".to_string()],
            )
    }

    fn finish(s: Config) -> Result<Self, ConfigError> {
        let settings: Settings = s.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let schedules = [
            ("account", &self.flux.account),
            ("order", &self.flux.order),
            ("ticker", &self.flux.ticker),
        ];
        for (name, schedule) in schedules {
            if schedule.interval_ms == 0 {
                return Err(ConfigError::Message(format!(
                    "flux.{name}.interval_ms must be greater than zero"
                )));
            }
        }
        Ok(())
    }
}
