use crate::*;
use tracing_subscriber::EnvFilter;

/// Install a global fmt subscriber filtered by [`Config::log_filter`].
///
/// Meant for hosts embedding the engine that have no subscriber of their own.
pub fn init_logging() -> Result {
    let filter = EnvFilter::try_new(&config().log_filter)
        .map_err(|err| Error::Logging(format!("invalid filter directive: {err}")))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|err| Error::Logging(err.to_string()))
}
