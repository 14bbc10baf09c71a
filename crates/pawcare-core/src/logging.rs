//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Install a formatted subscriber filtered by `filter` (e.g. `"pawcare_core=debug"`).
///
/// Returns false if a global subscriber was already installed; calling this
/// more than once is harmless.
pub fn init(filter: &str) -> bool {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .try_init()
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_is_harmless() {
        init("debug");
        assert!(!init("info"));
    }

    #[test]
    fn test_invalid_filter_falls_back() {
        // Must not panic on a bad directive.
        init("not a [valid filter");
    }
}
