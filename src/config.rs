use std::env;

/// Default notice shown when a signed-in member without the admin role opens an admin view.
pub const DEFAULT_DENIAL_MESSAGE: &str = "Only administrators can access this page";

/// AppConfig
///
/// The gate host's entire configuration. Immutable once loaded and shared through `AppState`.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Selects log format and CORS strictness.
    pub env: Env,
    // Socket address the HTTP host binds to.
    pub bind_addr: String,
    // Origin the SPA is served from. `None` allows any origin (local only).
    pub allowed_origin: Option<String>,
    // Text of the insufficient-role denial notice.
    pub denial_message: String,
    // Upper bound on redirect hops followed for a single navigation.
    pub max_redirects: usize,
}

/// Env
///
/// Runtime context: permissive local development, or a locked-down production deployment.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Non-panicking configuration for tests and embedding the gate without a host process.
    fn default() -> Self {
        Self {
            env: Env::Local,
            bind_addr: "127.0.0.1:3000".to_string(),
            allowed_origin: None,
            denial_message: DEFAULT_DENIAL_MESSAGE.to_string(),
            max_redirects: 3,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads configuration from environment variables (call `dotenv` first to pick up `.env`).
    ///
    /// # Panics
    /// Panics in production when `GATE_ALLOWED_ORIGIN` is missing, and in any environment when
    /// `GATE_MAX_REDIRECTS` is not a positive integer. The host must not start with an open
    /// CORS policy or an unbounded redirect loop.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let allowed_origin = match env {
            Env::Production => Some(
                env::var("GATE_ALLOWED_ORIGIN")
                    .expect("FATAL: GATE_ALLOWED_ORIGIN must be set in production."),
            ),
            Env::Local => env::var("GATE_ALLOWED_ORIGIN").ok(),
        };

        let max_redirects = match env::var("GATE_MAX_REDIRECTS") {
            Ok(value) => value
                .trim()
                .parse()
                .ok()
                .filter(|limit: &usize| *limit >= 1)
                .expect("FATAL: GATE_MAX_REDIRECTS must be a positive integer."),
            Err(_) => 3,
        };

        Self {
            bind_addr: env::var("GATE_BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            denial_message: env::var("GATE_DENIAL_MESSAGE")
                .unwrap_or_else(|_| DEFAULT_DENIAL_MESSAGE.to_string()),
            env,
            allowed_origin,
            max_redirects,
        }
    }
}
