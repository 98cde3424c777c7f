use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;

use crate::auth::MAX_TOKEN_HOURS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub store: StoreConfig,
    pub calendar: CalendarConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    /// Create missing tables when the server starts
    pub auto_migrate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Only honoured by the memory backend; Postgres is seeded through the CLI.
    pub seed_demo_data: bool,
}

/// Which clock decides "today" for event status and the calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneSetting {
    Local,
    Utc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarConfig {
    pub timezone: TimeZoneSetting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub admin_username: String,
    #[serde(skip_serializing)]
    pub admin_password: String,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl SecurityConfig {
    /// No origins, or a `*` among them, means CORS is wide open
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }
}

const DEFAULT_ADMIN_USERNAME: &str = "UbertAngel";
const DEFAULT_ADMIN_PASSWORD: &str = "SpiritEmbassy12345678";
const DEVELOPMENT_JWT_SECRET: &str = "expolink-development-secret";

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Some(port) = env::var("EXPOLINK_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|v| v.parse().ok())
        {
            self.server.port = port;
        }
        if let Ok(v) = env::var("EXPOLINK_HOST") {
            self.server.host = v;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            if !v.trim().is_empty() {
                self.database.url = Some(v);
            }
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Ok(v) = env::var("DATABASE_AUTO_MIGRATE") {
            self.database.auto_migrate = v.parse().unwrap_or(self.database.auto_migrate);
        }

        // Store overrides. Without an explicit backend, a configured database wins.
        self.store.backend = match env::var("STORE_BACKEND").as_deref() {
            Ok("memory") => StoreBackend::Memory,
            Ok("postgres") | Ok("postgresql") => StoreBackend::Postgres,
            _ if self.database.url.is_some() => StoreBackend::Postgres,
            _ => StoreBackend::Memory,
        };
        if let Ok(v) = env::var("STORE_SEED_DEMO_DATA") {
            self.store.seed_demo_data = v.parse().unwrap_or(self.store.seed_demo_data);
        }

        // Calendar overrides
        match env::var("CALENDAR_TIMEZONE").as_deref() {
            Ok("utc") | Ok("UTC") => self.calendar.timezone = TimeZoneSetting::Utc,
            Ok("local") => self.calendar.timezone = TimeZoneSetting::Local,
            _ => {}
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.security.admin_username = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.security.admin_password = v;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v
                .parse::<u64>()
                .map(|h| h.min(MAX_TOKEN_HOURS))
                .unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.security.allows_any_origin()
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 30,
                auto_migrate: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                seed_demo_data: true,
            },
            calendar: CalendarConfig {
                timezone: TimeZoneSetting::Local,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
                admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
                admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
                jwt_secret: DEVELOPMENT_JWT_SECRET.to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 10,
                auto_migrate: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                seed_demo_data: false,
            },
            calendar: CalendarConfig {
                timezone: TimeZoneSetting::Local,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
                admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
                admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
                // No token issuing until JWT_SECRET is set
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 50,
                connection_timeout: 5,
                auto_migrate: true,
            },
            store: StoreConfig {
                backend: StoreBackend::Memory,
                seed_demo_data: false,
            },
            calendar: CalendarConfig {
                timezone: TimeZoneSetting::Local,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
                admin_username: DEFAULT_ADMIN_USERNAME.to_string(),
                admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
                // Empty secret disables token issuing until JWT_SECRET is set
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_development {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Development)
    };
}
