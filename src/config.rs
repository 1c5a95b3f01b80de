use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub business: BusinessConfig,
    #[serde(default)]
    pub sweep: SweepConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_expires_in: i64,  // seconds
    pub refresh_token_expires_in: i64, // seconds
}

/// Business constants: pricing and commission live in configuration, not code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// Price of one month of validity, in cents. One "currency unit" of the
    /// flexible-renewal rule equals this amount.
    pub month_price_cents: i64,
    /// Commission credited to a marketer per approved recruit, in cents.
    pub commission_cents: i64,
    /// Country calling code prepended to bare national phone numbers.
    pub default_country_code: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            month_price_cents: 100,
            commission_cents: 40,
            default_country_code: "1".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    /// Seconds between overdue-sweep runs.
    pub interval_secs: u64,
    /// Reminder window in days before the payment due date.
    pub reminder_days: i64,
    /// Final-reminder window in days before the payment due date.
    pub final_reminder_days: i64,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval_secs: 24 * 3600,
            reminder_days: 3,
            final_reminder_days: 1,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // Read the config file if present, otherwise build from environment only.
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("Failed to parse config: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                // Without a config file the database URL must come from the environment.
                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| "change-me-in-production".to_string()),
                        access_token_expires_in: get_env_parse("JWT_ACCESS_EXPIRES_IN", 7200i64),
                        refresh_token_expires_in: get_env_parse(
                            "JWT_REFRESH_EXPIRES_IN",
                            2_592_000i64,
                        ),
                    },
                    business: BusinessConfig {
                        month_price_cents: get_env_parse("MONTH_PRICE_CENTS", 100i64),
                        commission_cents: get_env_parse("COMMISSION_CENTS", 40i64),
                        default_country_code: get_env("DEFAULT_COUNTRY_CODE")
                            .unwrap_or_else(|| "1".to_string()),
                    },
                    sweep: SweepConfig {
                        interval_secs: get_env_parse("SWEEP_INTERVAL_SECS", 24 * 3600u64),
                        reminder_days: get_env_parse("SWEEP_REMINDER_DAYS", 3i64),
                        final_reminder_days: get_env_parse("SWEEP_FINAL_REMINDER_DAYS", 1i64),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // Environment variables override file values when both are present.
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("JWT_ACCESS_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.access_token_expires_in = n;
        }
        if let Ok(v) = env::var("JWT_REFRESH_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.refresh_token_expires_in = n;
        }
        if let Ok(v) = env::var("MONTH_PRICE_CENTS")
            && let Ok(n) = v.parse()
        {
            config.business.month_price_cents = n;
        }
        if let Ok(v) = env::var("COMMISSION_CENTS")
            && let Ok(n) = v.parse()
        {
            config.business.commission_cents = n;
        }
        if let Ok(v) = env::var("DEFAULT_COUNTRY_CODE") {
            config.business.default_country_code = v;
        }
        if let Ok(v) = env::var("SWEEP_INTERVAL_SECS")
            && let Ok(n) = v.parse()
        {
            config.sweep.interval_secs = n;
        }
        if let Ok(v) = env::var("SWEEP_REMINDER_DAYS")
            && let Ok(n) = v.parse()
        {
            config.sweep.reminder_days = n;
        }
        if let Ok(v) = env::var("SWEEP_FINAL_REMINDER_DAYS")
            && let Ok(n) = v.parse()
        {
            config.sweep.final_reminder_days = n;
        }

        Ok(config)
    }
}
