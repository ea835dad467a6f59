//! Runtime settings of the campus server.
//!
//! Every setting is a command line flag with a `CAMPUS_` environment
//! fallback, so the same [`ServerConfig`] serves the binary and the tests.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `CAMPUS_SERVER_PORT` | 8080 |
//! | `CAMPUS_SERVER_HOST` | 127.0.0.1 |
//! | `CAMPUS_LOG_LEVEL` | info |
//! | `CAMPUS_MAX_BODY_SIZE` | 1048576 bytes |
//! | `CAMPUS_REQUEST_TIMEOUT` | 30 seconds |
//! | `CAMPUS_ENABLE_CORS` | true |
//! | `CAMPUS_CORS_ORIGINS` | * |
//! | `CAMPUS_CORS_METHODS` | GET,POST,PATCH,DELETE,OPTIONS |
//! | `CAMPUS_CORS_HEADERS` | Content-Type,Authorization,Accept |
//! | `CAMPUS_BASE_URL` | http://localhost:8080 |
//! | `CAMPUS_API_PREFIX` | /api/v1 |
//! | `CAMPUS_DATABASE_URL` | unset, the server falls back to `campus.db` |
//!
//! ```rust
//! use campus_rest::ServerConfig;
//!
//! let config = ServerConfig {
//!     api_prefix: "/campus/api".to_string(),
//!     ..ServerConfig::default()
//! };
//! assert_eq!(config.course_url(4), "http://localhost:8080/campus/api/courses/4/");
//! ```

use clap::Parser;
use url::Url;

/// Levels accepted by `--log-level`.
pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Settings for the courses HTTP server.
#[derive(Debug, Clone, Parser)]
#[command(name = "campus")]
#[command(about = "Campus courses REST API server")]
pub struct ServerConfig {
    /// TCP port.
    #[arg(short, long, env = "CAMPUS_SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Interface to bind.
    #[arg(long, env = "CAMPUS_SERVER_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// One of error, warn, info, debug or trace.
    #[arg(long, env = "CAMPUS_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Largest accepted course body, in bytes.
    #[arg(long, env = "CAMPUS_MAX_BODY_SIZE", default_value = "1048576")]
    pub max_body_size: usize,

    /// Seconds before a request is answered with 408.
    #[arg(long, env = "CAMPUS_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Answer browser cross-origin requests.
    #[arg(long, env = "CAMPUS_ENABLE_CORS", default_value = "true")]
    pub enable_cors: bool,

    /// Comma-separated origins, `*` for any.
    #[arg(long, env = "CAMPUS_CORS_ORIGINS", default_value = "*")]
    pub cors_origins: String,

    /// Comma-separated methods, `*` for any.
    #[arg(
        long,
        env = "CAMPUS_CORS_METHODS",
        default_value = "GET,POST,PATCH,DELETE,OPTIONS"
    )]
    pub cors_methods: String,

    /// Comma-separated request headers, `*` for any.
    #[arg(
        long,
        env = "CAMPUS_CORS_HEADERS",
        default_value = "Content-Type,Authorization,Accept"
    )]
    pub cors_headers: String,

    /// Public origin of the server, the base of `Location` URLs.
    #[arg(long, env = "CAMPUS_BASE_URL", default_value = "http://localhost:8080")]
    pub base_url: String,

    /// Mount point of the courses collection.
    #[arg(long, env = "CAMPUS_API_PREFIX", default_value = "/api/v1")]
    pub api_prefix: String,

    /// SQLite file path, or `:memory:`.
    #[arg(long, env = "CAMPUS_DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            log_level: "info".to_string(),
            max_body_size: 1 << 20,
            request_timeout: 30,
            enable_cors: true,
            cors_origins: "*".to_string(),
            cors_methods: "GET,POST,PATCH,DELETE,OPTIONS".to_string(),
            cors_headers: "Content-Type,Authorization,Accept".to_string(),
            base_url: "http://localhost:8080".to_string(),
            api_prefix: "/api/v1".to_string(),
            database_url: None,
        }
    }
}

impl ServerConfig {
    /// Reads the `CAMPUS_` environment, ignoring command line arguments.
    pub fn from_env() -> Self {
        Self::try_parse_from(["campus"]).unwrap_or_default()
    }

    /// Returns `host:port` for the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the API prefix with a leading slash and no trailing slash.
    ///
    /// An empty or `/` prefix mounts the API at the root and yields `""`.
    pub fn api_prefix(&self) -> String {
        let trimmed = self.api_prefix.trim().trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Returns the path of the courses collection, without trailing slash.
    pub fn courses_path(&self) -> String {
        format!("{}/courses", self.api_prefix())
    }

    /// Returns the absolute URL of a single course.
    pub fn course_url(&self, id: i64) -> String {
        format!(
            "{}{}/{}/",
            self.base_url.trim_end_matches('/'),
            self.courses_path(),
            id
        )
    }

    /// Checks every setting and reports all problems at once.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors: Vec<String> = [
            (self.port == 0, "port must be between 1 and 65535"),
            (self.max_body_size == 0, "max body size must be positive"),
            (self.request_timeout == 0, "request timeout must be at least 1 second"),
        ]
        .into_iter()
        .filter(|(failed, _)| *failed)
        .map(|(_, message)| message.to_string())
        .collect();

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "log level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if let Err(e) = Url::parse(&self.base_url) {
            errors.push(format!("base URL '{}' does not parse: {}", self.base_url, e));
        }

        if self
            .api_prefix()
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '{' | '}' | '?'))
        {
            errors.push(format!("API prefix '{}' is not a plain path", self.api_prefix));
        }

        if self.enable_cors {
            errors.extend(
                self.cors_origins
                    .split(',')
                    .map(str::trim)
                    .filter(|origin| !origin.is_empty() && *origin != "*")
                    .filter(|origin| Url::parse(origin).is_err())
                    .map(|origin| format!("CORS origin '{}' is not a URL", origin)),
            );
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Settings for in-process tests: in-memory database, no CORS, ephemeral port.
    pub fn for_testing() -> Self {
        Self {
            port: 0,
            log_level: "debug".to_string(),
            request_timeout: 5,
            enable_cors: false,
            base_url: "http://localhost".to_string(),
            database_url: Some(":memory:".to_string()),
            ..Self::default()
        }
    }
}
