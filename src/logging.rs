//! Logging setup.
//!
//! The crate logs through the `log` facade. Applications that do not install their own
//! logger can call [`init`] once at startup.

use env_logger::Env;

/// Installs `env_logger`. `RUST_LOG` wins over `default_filter`.
///
/// Returns false if a logger was already installed, which is not an error.
pub fn init(default_filter: &str) -> bool {
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init()
        .is_ok()
}

/// Logger for unit tests; output is captured by the test harness.
#[cfg(test)]
pub(crate) fn init_for_tests() {
    let _ = env_logger::builder()
        .is_test(true)
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        init_for_tests();
        assert!(!init("perch=debug"));
    }
}
