use std::env;
use std::path::PathBuf;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// never mutated afterwards; handlers pull it out of the shared state via FromRef.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects the log format and which settings are mandatory.
    pub env: Env,
    // Socket address the HTTP server binds to.
    pub bind_addr: String,
    // Location of the durable session slot (token + role).
    pub session_file: PathBuf,
}

/// Env
///
/// Defines the runtime context. `Production` requires every path to be configured
/// explicitly; `Local` falls back to working-directory defaults.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// Default bind address used when `BIND_ADDR` is not set.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

/// Default session file used in `Env::Local`.
pub const DEFAULT_SESSION_FILE: &str = ".academy/session.json";

impl Default for AppConfig {
    /// default
    ///
    /// Provides a non-panicking AppConfig for test setup, without touching the
    /// process environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:0".to_string(),
            session_file: env::temp_dir().join("academy-portal-test-session.json"),
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads every parameter from environment variables (call `dotenv` first).
    ///
    /// # Panics
    /// Panics in `Env::Production` when `SESSION_FILE` is not set. The server must not
    /// start with its session slot silently pointing at the working directory.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let session_file = match env {
            Env::Production => env::var("SESSION_FILE")
                .expect("FATAL: SESSION_FILE must be set in production."),
            Env::Local => {
                env::var("SESSION_FILE").unwrap_or_else(|_| DEFAULT_SESSION_FILE.to_string())
            }
        };

        Self {
            env,
            bind_addr,
            session_file: PathBuf::from(session_file),
        }
    }
}
