use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// File name of the rate history store
pub const DEFAULT_DATABASE_FILE: &str = "usd_currencies.sqlite";

/// Public cash-rate listing
pub const DEFAULT_RATES_API_URL: &str = "http://resources.finance.ua/ru/public/currency-cash.json";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
    pub busy_timeout_secs: u64,
}

/// Remote listing configuration
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub api_url: String,
    pub poll_interval_secs: u64,
    pub request_timeout_secs: u64,
}

/// How relative navigation picks the neighbouring snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Step the date id by one in either direction
    IdOffset,
    /// Nearest stored timestamp below/above the reference
    Chronological,
}

impl NavigationMode {
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "id_offset" => Ok(NavigationMode::IdOffset),
            "chronological" => Ok(NavigationMode::Chronological),
            _ => Err(format!(
                "Invalid NAVIGATION_MODE: {}. Must be one of: id_offset, chronological",
                s
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NavigationMode::IdOffset => "id_offset",
            NavigationMode::Chronological => "chronological",
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub fetch: FetchConfig,
    pub log_level: String,
    /// Emit logs as JSON lines instead of text
    pub log_json: bool,
    pub navigation_mode: NavigationMode,
}

/// Directory of the running executable, falling back to the working directory
fn install_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."))
}

impl DatabaseConfig {
    /// Create database config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let path = env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| install_dir().join(DEFAULT_DATABASE_FILE));

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(5);

        let acquire_timeout_secs = env::var("DATABASE_ACQUIRE_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(30);

        let busy_timeout_secs = env::var("DATABASE_BUSY_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(5);

        if max_connections == 0 {
            return Err("DATABASE_MAX_CONNECTIONS must be greater than 0".to_string());
        }

        if acquire_timeout_secs == 0 {
            return Err("DATABASE_ACQUIRE_TIMEOUT_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            path,
            max_connections,
            acquire_timeout_secs,
            busy_timeout_secs,
        })
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get busy timeout as Duration
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: install_dir().join(DEFAULT_DATABASE_FILE),
            max_connections: 5,
            acquire_timeout_secs: 30,
            busy_timeout_secs: 5,
        }
    }
}

impl FetchConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_url =
            env::var("RATES_API_URL").unwrap_or_else(|_| DEFAULT_RATES_API_URL.to_string());

        let poll_interval_secs = env::var("RATES_POLL_INTERVAL_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(3600); // hourly

        let request_timeout_secs = env::var("RATES_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(10);

        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            return Err(format!("Invalid RATES_API_URL: {}", api_url));
        }

        if poll_interval_secs == 0 {
            return Err("RATES_POLL_INTERVAL_SECS must be greater than 0".to_string());
        }

        Ok(Self {
            api_url,
            poll_interval_secs,
            request_timeout_secs,
        })
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_RATES_API_URL.to_string(),
            poll_interval_secs: 3600,
            request_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Create application config from environment variables
    pub fn from_env() -> Result<Self, String> {
        let database = DatabaseConfig::from_env()?;
        let fetch = FetchConfig::from_env()?;

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&log_level.to_lowercase().as_str()) {
            return Err(format!(
                "Invalid LOG_LEVEL: {}. Must be one of: {:?}",
                log_level, valid_log_levels
            ));
        }

        let log_json = match env::var("LOG_FORMAT") {
            Ok(format) => match format.to_lowercase().as_str() {
                "json" => true,
                "text" => false,
                _ => {
                    return Err(format!(
                        "Invalid LOG_FORMAT: {}. Must be one of: text, json",
                        format
                    ))
                }
            },
            Err(_) => false,
        };

        let navigation_mode = match env::var("NAVIGATION_MODE") {
            Ok(mode) => NavigationMode::from_str(&mode)?,
            Err(_) => NavigationMode::IdOffset,
        };

        Ok(Self {
            database,
            fetch,
            log_level: log_level.to_lowercase(),
            log_json,
            navigation_mode,
        })
    }

    /// Get database path (convenience method)
    pub fn database_path(&self) -> &std::path::Path {
        &self.database.path
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            fetch: FetchConfig::default(),
            log_level: "info".to_string(),
            log_json: false,
            navigation_mode: NavigationMode::IdOffset,
        }
    }
}
