use clap::{Parser, ValueEnum};
use qrshare_publisher::config::{DEFAULT_MAX_METADATA_BYTES, DEFAULT_MAX_TEXT_BYTES};
use qrshare_telemetry::LogFormat;
use std::fmt::{Display, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const LISTEN_ADDR_ENV: &str = "QRSHARE_GATEWAY_LISTEN_ADDR";
pub const BASE_URL_ENV: &str = "QRSHARE_BASE_URL";
pub const STORAGE_BACKEND_ENV: &str = "QRSHARE_STORAGE_BACKEND";
pub const DATA_DIR_ENV: &str = "QRSHARE_DATA_DIR";
pub const REDIS_URL_ENV: &str = "QRSHARE_REDIS_URL";
pub const REDIS_TTL_SECS_ENV: &str = "QRSHARE_REDIS_TTL_SECS";
pub const MYSQL_DSN_ENV: &str = "QRSHARE_MYSQL_DSN";
pub const MAX_TEXT_BYTES_ENV: &str = "QRSHARE_MAX_TEXT_BYTES";
pub const MAX_METADATA_BYTES_ENV: &str = "QRSHARE_MAX_METADATA_BYTES";
pub const LOG_FORMAT_ENV: &str = "QRSHARE_LOG_FORMAT";
pub const OTLP_ENDPOINT_ENV: &str = "QRSHARE_OTLP_ENDPOINT";

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:8080";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080/p";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StorageBackendArg {
    #[value(name = "in-memory")]
    InMemory,
    #[value(name = "file")]
    File,
    #[value(name = "redis")]
    Redis,
    #[value(name = "mysql")]
    Mysql,
}

impl Display for StorageBackendArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageBackendArg::InMemory => write!(f, "in-memory"),
            StorageBackendArg::File => write!(f, "file"),
            StorageBackendArg::Redis => write!(f, "redis"),
            StorageBackendArg::Mysql => write!(f, "mysql"),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "qrshare-gateway")]
pub struct CLI {
    #[arg(long, env = LISTEN_ADDR_ENV, default_value = DEFAULT_LISTEN_ADDR)]
    pub listen_addr: SocketAddr,

    /// Base of the URLs handed out for published texts.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    #[arg(
        long,
        env = STORAGE_BACKEND_ENV,
        value_enum,
        default_value_t = StorageBackendArg::InMemory
    )]
    pub storage: StorageBackendArg,

    #[arg(long, env = DATA_DIR_ENV, required_if_eq("storage", "file"))]
    pub data_dir: Option<PathBuf>,

    #[arg(long, env = REDIS_URL_ENV, required_if_eq("storage", "redis"))]
    pub redis_url: Option<String>,

    /// Expire Redis records after this many seconds.
    #[arg(long, env = REDIS_TTL_SECS_ENV)]
    pub redis_ttl_secs: Option<u64>,

    #[arg(long, env = MYSQL_DSN_ENV, required_if_eq("storage", "mysql"))]
    pub mysql_dsn: Option<String>,

    #[arg(long, env = MAX_TEXT_BYTES_ENV, default_value_t = DEFAULT_MAX_TEXT_BYTES)]
    pub max_text_bytes: usize,

    /// Largest accepted title or description, in bytes.
    #[arg(long, env = MAX_METADATA_BYTES_ENV, default_value_t = DEFAULT_MAX_METADATA_BYTES)]
    pub max_metadata_bytes: usize,

    #[arg(long, env = LOG_FORMAT_ENV, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector to export spans to, e.g. `http://localhost:4317`.
    #[arg(long, env = OTLP_ENDPOINT_ENV)]
    pub otlp_endpoint: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = CLI::try_parse_from(["gateway"]).unwrap();
        assert_eq!(cli.storage, StorageBackendArg::InMemory);
        assert_eq!(cli.max_text_bytes, DEFAULT_MAX_TEXT_BYTES);
        assert_eq!(cli.max_metadata_bytes, DEFAULT_MAX_METADATA_BYTES);
        assert_eq!(cli.log_format, LogFormat::Text);
    }

    #[test]
    fn file_backend_requires_data_dir() {
        assert!(CLI::try_parse_from(["gateway", "--storage", "file"]).is_err());

        let cli =
            CLI::try_parse_from(["gateway", "--storage", "file", "--data-dir", "/tmp/qr"]).unwrap();
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/qr")));
    }

    #[test]
    fn redis_backend_with_ttl() {
        let cli = CLI::try_parse_from([
            "gateway",
            "--storage",
            "redis",
            "--redis-url",
            "redis://localhost:6379",
            "--redis-ttl-secs",
            "3600",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.redis_ttl_secs, Some(3600));
        assert_eq!(cli.log_format, LogFormat::Json);
    }
}
