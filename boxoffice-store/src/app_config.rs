use serde::Deserialize;
use std::env;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub inventory: InventoryRules,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

/// Tunables for hold lifetime and the background expiry sweep.
#[derive(Debug, Deserialize, Clone)]
pub struct InventoryRules {
    #[serde(default = "default_hold_ttl_minutes")]
    pub hold_ttl_minutes: u32,
    #[serde(default = "default_sweep_interval_ms")]
    pub sweep_interval_ms: u64,
}

impl InventoryRules {
    pub fn default_hold_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.hold_ttl_minutes) * 60)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_millis(self.sweep_interval_ms.max(1))
    }
}

impl Default for InventoryRules {
    fn default() -> Self {
        Self {
            hold_ttl_minutes: default_hold_ttl_minutes(),
            sweep_interval_ms: default_sweep_interval_ms(),
        }
    }
}

fn default_port() -> u16 { 8000 }
fn default_hold_ttl_minutes() -> u32 { 2 }
fn default_sweep_interval_ms() -> u64 { 1000 }

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Shared defaults, checked in
            .add_source(config::File::with_name("config/default").required(false))
            // Per-environment overrides
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Developer overrides, not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // Eg.. `BOXOFFICE_INVENTORY__HOLD_TTL_MINUTES=5`
            .add_source(config::Environment::with_prefix("BOXOFFICE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let cfg: Config = config::Config::builder()
            .set_override("inventory.hold_ttl_minutes", 5)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.inventory.hold_ttl_minutes, 5);
        assert_eq!(cfg.inventory.default_hold_ttl(), Duration::from_secs(300));
        assert_eq!(cfg.inventory.sweep_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_zero_sweep_interval_is_clamped() {
        let rules = InventoryRules { hold_ttl_minutes: 2, sweep_interval_ms: 0 };
        assert_eq!(rules.sweep_interval(), Duration::from_millis(1));
    }
}
