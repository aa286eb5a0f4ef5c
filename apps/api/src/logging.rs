use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Maps a `LOG_LEVEL` value onto a tracing level, accepting the common
/// aliases (`WARNING`, `CRITICAL`, `NOTSET`). Unknown values fall back to `default`.
pub fn resolve_log_level(raw: &str, default: &'static str) -> String {
    let level = raw.trim().to_ascii_lowercase();
    let level = match level.as_str() {
        "warning" => "warn",
        "critical" | "fatal" => "error",
        "notset" => "trace",
        other => other,
    };
    if LEVELS.contains(&level) {
        level.to_string()
    } else {
        default.to_string()
    }
}

/// Initializes structured logging. `RUST_LOG` wins over `log_level` when set.
pub fn init_tracing(log_level: &str) {
    let level = resolve_log_level(log_level, "info");
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "candidates_api={level},build_dataset={level},eval={level},tower_http={level}"
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_standard_levels() {
        assert_eq!(resolve_log_level("DEBUG", "info"), "debug");
        assert_eq!(resolve_log_level(" error ", "info"), "error");
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_log_level("WARNING", "info"), "warn");
        assert_eq!(resolve_log_level("CRITICAL", "info"), "error");
        assert_eq!(resolve_log_level("NOTSET", "info"), "trace");
    }

    #[test]
    fn test_resolve_unknown_falls_back() {
        assert_eq!(resolve_log_level("loud", "info"), "info");
        assert_eq!(resolve_log_level("", "warn"), "warn");
    }
}
