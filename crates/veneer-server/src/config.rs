//! Environment-driven configuration.
//!
//! All settings are read once at startup from process environment
//! variables, with typed fallbacks when a variable is unset or
//! unparseable:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `PORT` | `3000` | TCP port to listen on |
//! | `DEBUG` | `false` | debug mode flag |
//! | `TEMPLATE_DIR` | `templates` | directory holding template files |
//! | `LOG_LEVEL` | `info` | `trace`/`debug`/`info`/`warn`/`error` |

use std::env;
use std::path::PathBuf;

use tracing::Level;

/// Complete server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub log: LogConfig,
}

/// Listener and rendering settings.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub debug: bool,
    pub template_dir: PathBuf,
}

/// Logging settings.
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
}

impl Config {
    /// Reads the full configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            log: LogConfig::from_env(),
        }
    }
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            port: get_u16("PORT", 3000),
            debug: get_bool("DEBUG", false),
            template_dir: PathBuf::from(get_string("TEMPLATE_DIR", "templates")),
        }
    }
}

impl LogConfig {
    fn from_env() -> Self {
        let level = match get_string("LOG_LEVEL", "info").to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };
        Self { level }
    }
}

fn get_string(key: &str, default: &str) -> String {
    match env::var(key) {
        Ok(value) if !value.is_empty() => value,
        _ => default.to_string(),
    }
}

fn get_u16(key: &str, default: u16) -> u16 {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

fn get_bool(key: &str, default: bool) -> bool {
    match env::var(key) {
        Ok(value) => match value.to_lowercase().as_str() {
            "1" | "t" | "true" => true,
            "0" | "f" | "false" => false,
            _ => default,
        },
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear(keys: &[&str]) {
        for key in keys {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear(&["PORT", "DEBUG", "TEMPLATE_DIR", "LOG_LEVEL"]);

        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 3000);
        assert!(!cfg.server.debug);
        assert_eq!(cfg.server.template_dir, PathBuf::from("templates"));
        assert_eq!(cfg.log.level, Level::INFO);
    }

    #[test]
    #[serial]
    fn test_values_from_env() {
        env::set_var("PORT", "8080");
        env::set_var("DEBUG", "true");
        env::set_var("TEMPLATE_DIR", "/srv/templates");
        env::set_var("LOG_LEVEL", "debug");

        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.server.debug);
        assert_eq!(cfg.server.template_dir, PathBuf::from("/srv/templates"));
        assert_eq!(cfg.log.level, Level::DEBUG);

        clear(&["PORT", "DEBUG", "TEMPLATE_DIR", "LOG_LEVEL"]);
    }

    #[test]
    #[serial]
    fn test_unparseable_values_fall_back() {
        env::set_var("PORT", "not-a-port");
        env::set_var("DEBUG", "maybe");
        env::set_var("LOG_LEVEL", "shout");

        let cfg = Config::from_env();
        assert_eq!(cfg.server.port, 3000);
        assert!(!cfg.server.debug);
        assert_eq!(cfg.log.level, Level::INFO);

        clear(&["PORT", "DEBUG", "LOG_LEVEL"]);
    }

    #[test]
    #[serial]
    fn test_bool_short_forms() {
        env::set_var("DEBUG", "1");
        assert!(Config::from_env().server.debug);
        env::set_var("DEBUG", "f");
        assert!(!Config::from_env().server.debug);
        clear(&["DEBUG"]);
    }
}
