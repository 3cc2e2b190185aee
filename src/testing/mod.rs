#![cfg(test)]
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer() // ensures it integrates with `cargo test` output
            .init();
    });
}

mod logging_tests {
    use super::{super::*, *};

    #[test]
    fn second_global_subscriber_is_rejected() {
        common_init();
        let result = init_logging();
        assert!(
            matches!(result, Err(Error::Logging(_))),
            "expected Error::Logging, got {result:?}"
        );
    }
}
