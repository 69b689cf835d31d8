use clap::Parser;
use clap::ValueEnum;
use sqlx::postgres::PgConnectOptions;

#[derive(Clone, Parser, Debug, Default)]
#[command(name = "org-messages-api")]
#[command(about = "Organization Messages API Server", long_about = None)]
pub struct Config {
    #[command(flatten)]
    pub database: DatabaseConfig,

    #[command(flatten)]
    pub server: ServerConfig,

    #[arg(
        long = "storage-backend",
        env = "STORAGE_BACKEND",
        default_value = "postgres"
    )]
    pub storage: StorageBackend,

    #[arg(
        long = "environment",
        env = "ENVIRONMENT",
        default_value = "development"
    )]
    pub environment: Environment,
}

#[derive(Clone, Parser, Debug, Default)]
pub struct DatabaseConfig {
    #[arg(
        long = "database-host",
        env = "DATABASE_HOST",
        default_value = "localhost"
    )]
    pub host: String,

    #[arg(long = "database-port", env = "DATABASE_PORT", default_value = "5432")]
    pub port: u16,

    #[arg(
        long = "database-user",
        env = "DATABASE_USER",
        default_value = "postgres"
    )]
    pub user: String,

    // Only read when the postgres backend is selected
    #[arg(
        long = "database-password",
        env = "DATABASE_PASSWORD",
        value_name = "database_password",
        default_value = ""
    )]
    pub password: String,

    #[arg(
        long = "database-name",
        env = "DATABASE_NAME",
        default_value = "messages",
        value_name = "database_name"
    )]
    pub db_name: String,
}

impl From<DatabaseConfig> for PgConnectOptions {
    fn from(config: DatabaseConfig) -> Self {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.db_name)
    }
}

#[derive(Clone, Parser, Debug, Default)]
pub struct ServerConfig {
    #[arg(
        long = "server-api-port",
        env = "API_PORT",
        default_value = "8080",
        name = "api_port"
    )]
    pub api_port: u16,

    #[arg(
        long = "server-health-port",
        env = "HEALTH_PORT",
        default_value = "8081"
    )]
    pub health_port: u16,
}

/// Where messages are kept.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Default)]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// Process memory; everything is lost on restart.
    Memory,
}

#[derive(Clone, Debug, ValueEnum, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
    Test,
}

impl Environment {
    /// JSON log lines everywhere except local development.
    pub fn structured_logs(&self) -> bool {
        !matches!(self, Environment::Development)
    }
}
