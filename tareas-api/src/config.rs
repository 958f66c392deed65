/// Configuration management for the API server
///
/// Every setting has a default, so the server starts with no environment at
/// all: it listens on `0.0.0.0:5000` and keeps its data in
/// `gestion_tareas.db` in the working directory.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 5000)
/// - `DATABASE_URL`: SQLite connection string (default: sqlite://gestion_tareas.db)
/// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
/// - `CORS_ORIGINS`: Comma-separated allowed origins (default: *)
/// - `ENVIRONMENT`: `production` enables HSTS (default: development)
/// - `RUST_LOG`: Log filter, read by the tracing subscriber in `main`
///
/// # Example
///
/// ```no_run
/// use tareas_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use std::env;
use tareas_shared::db::pool::{DatabaseConfig, DEFAULT_DATABASE_URL};

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DbSettings,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Allowed CORS origins (`*` allows any)
    pub cors_origins: Vec<String>,

    /// Production mode (enables HSTS)
    pub production: bool,
}

/// Database settings read from the environment
///
/// Converts into the pool's `DatabaseConfig`, which fills in the remaining
/// pool tuning with its defaults.
#[derive(Debug, Clone)]
pub struct DbSettings {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in pool
    pub max_connections: u32,
}

impl From<&DbSettings> for DatabaseConfig {
    fn from(settings: &DbSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections,
            ..Default::default()
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
                cors_origins: vec!["*".to_string()],
                production: false,
            },
            database: DbSettings {
                url: DEFAULT_DATABASE_URL.to_string(),
                max_connections: 10,
            },
        }
    }
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        let api_host = env::var("API_HOST").unwrap_or(defaults.api.host);
        let api_port = match env::var("API_PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("Invalid API_PORT '{}': {}", port, e))?,
            Err(_) => defaults.api.port,
        };

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|origins| parse_origins(&origins))
            .unwrap_or(defaults.api.cors_origins);

        let production = env::var("ENVIRONMENT")
            .map(|e| e.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        let database_url = env::var("DATABASE_URL").unwrap_or(defaults.database.url);
        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(n) => n
                .parse::<u32>()
                .map_err(|e| anyhow::anyhow!("Invalid DATABASE_MAX_CONNECTIONS '{}': {}", n, e))?,
            Err(_) => defaults.database.max_connections,
        };

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                cors_origins,
                production,
            },
            database: DbSettings {
                url: database_url,
                max_connections,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
