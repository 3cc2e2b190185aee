use crate::*;
use confique::Config as _;
use std::sync::OnceLock;

#[derive(Debug, confique::Config)]
pub struct Config {
    /// Filter directive handed to the tracing subscriber by `init_logging`.
    #[config(env = "SQLSENSE_LOG", default = "warn")]
    pub log_filter: String,
    /// Emit a `trace!` summary for every split / locate / analyze call.
    #[config(env = "SQLSENSE_TRACE_SCANS", default = false)]
    pub trace_scans: bool,
}

impl Config {
    /// Load the configuration from the current environment.
    pub fn load() -> Result<Self> {
        Ok(Self::builder().env().load()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: "warn".to_string(),
            trace_scans: false,
        }
    }
}

/// Process-wide configuration, loaded on first access.
///
/// Falls back to defaults when the environment holds unparsable values: the
/// engine runs on every keystroke and must not fail because of a stray
/// variable.
pub fn config() -> &'static Config {
    static CONFIG: OnceLock<Config> = OnceLock::new();
    CONFIG.get_or_init(|| {
        Config::load().unwrap_or_else(|err| {
            warn!("Falling back to default configuration: {err}");
            Config::default()
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_quiet() {
        let config = Config::default();
        assert_eq!(config.log_filter, "warn");
        assert!(!config.trace_scans);
    }

    #[test]
    fn global_config_is_cached() {
        assert!(std::ptr::eq(config(), config()));
    }
}
