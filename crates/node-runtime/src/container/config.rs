//! # Node Configuration
//!
//! Runtime parameters read from the environment.
//!
//! Malformed values are logged and replaced by their defaults, with one
//! exception: an unknown storage backend is a hard error, since silently
//! falling back to another backend would lose data.

use hb_01_account_ledger::{DEFAULT_HOLD_UPDATE_INTERVAL, MAX_HOLD_UPDATE_INTERVAL};
use hb_02_api_gateway::domain::config::{
    GatewayConfig, HttpConfig, LimitsConfig, ResponseConfig, TimeoutConfig, DEFAULT_INSTANCE_NAME,
    DEFAULT_PORT,
};
use std::fmt::Display;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Complete node configuration.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// Instance name (`NAME`).
    pub name: String,
    /// Network configuration.
    pub network: NetworkConfig,
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Settlement configuration.
    pub settlement: SettlementConfig,
    /// API Gateway configuration.
    pub api_gateway: ApiGatewayConfig,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_INSTANCE_NAME.to_string(),
            network: NetworkConfig::default(),
            storage: StorageConfig::default(),
            settlement: SettlementConfig::default(),
            api_gateway: ApiGatewayConfig::default(),
        }
    }
}

impl NodeConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to
    /// its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(name) = lookup("NAME") {
            if name.trim().is_empty() {
                warn!("NAME is empty, keeping default");
            } else {
                config.name = name;
            }
        }

        override_parsed(&lookup, "HB_HOST", &mut config.network.host);
        override_parsed(&lookup, "HB_PORT", &mut config.network.port);

        if let Some(raw) = lookup("HB_STORAGE_BACKEND") {
            config.storage.backend = raw.parse()?;
        }
        if let Some(dir) = lookup("HB_DATA_DIR") {
            config.storage.data_dir = PathBuf::from(dir);
        }
        config.storage.seed_file = lookup("HB_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let mut interval_secs = config.settlement.interval.as_secs();
        override_parsed(&lookup, "HB_HOLD_UPDATE_INTERVAL_SECS", &mut interval_secs);
        config.settlement.interval = Duration::from_secs(interval_secs);
        override_flag(&lookup, "HB_SETTLEMENT_ENABLED", &mut config.settlement.enabled);

        let mut timeout_ms = config.api_gateway.request_timeout.as_millis() as u64;
        override_parsed(&lookup, "HB_REQUEST_TIMEOUT_MS", &mut timeout_ms);
        config.api_gateway.request_timeout = Duration::from_millis(timeout_ms);
        override_parsed(
            &lookup,
            "HB_MAX_REQUEST_SIZE",
            &mut config.api_gateway.max_request_size,
        );
        override_flag(
            &lookup,
            "HB_MIRROR_HTTP_STATUS",
            &mut config.api_gateway.mirror_http_status,
        );

        Ok(config)
    }

    /// Reject configurations the runtime cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settlement.enabled && self.settlement.interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if self.settlement.enabled && self.settlement.interval > MAX_HOLD_UPDATE_INTERVAL {
            return Err(ConfigError::IntervalTooLong {
                secs: self.settlement.interval.as_secs(),
                max_secs: MAX_HOLD_UPDATE_INTERVAL.as_secs(),
            });
        }
        if self.api_gateway.request_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                var: "HB_REQUEST_TIMEOUT_MS",
                reason: "must be greater than 0".into(),
            });
        }
        if self.api_gateway.max_request_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "HB_MAX_REQUEST_SIZE",
                reason: "must be greater than 0".into(),
            });
        }
        #[cfg(not(feature = "rocksdb"))]
        if self.storage.backend == StorageBackend::RocksDb {
            return Err(ConfigError::BackendUnavailable("rocksdb"));
        }
        Ok(())
    }

    /// Gateway settings derived from this configuration.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            instance_name: self.name.clone(),
            http: HttpConfig {
                host: self.network.host,
                port: self.network.port,
            },
            limits: LimitsConfig {
                max_request_size: self.api_gateway.max_request_size,
            },
            timeouts: TimeoutConfig {
                request: self.api_gateway.request_timeout,
            },
            responses: ResponseConfig {
                mirror_http_status: self.api_gateway.mirror_http_status,
            },
        }
    }
}

fn override_parsed<F, T>(lookup: &F, var: &'static str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: Display,
{
    let Some(raw) = lookup(var) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *target = value,
        Err(e) => warn!(var, value = %raw, error = %e, "Ignoring invalid value"),
    }
}

fn override_flag<F>(lookup: &F, var: &'static str, target: &mut bool)
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(var) else {
        return;
    };
    match parse_flag(&raw) {
        Some(value) => *target = value,
        None => warn!(var, value = %raw, "Ignoring invalid flag"),
    }
}

/// Parse a boolean environment flag.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `HB_STORAGE_BACKEND` names no known backend.
    #[error("unknown storage backend '{0}' (expected memory, file or rocksdb)")]
    UnknownBackend(String),

    /// Backend exists but was not compiled in.
    #[error("storage backend '{0}' is not compiled in; rebuild with --features {0}")]
    BackendUnavailable(&'static str),

    /// Settlement enabled with a zero interval.
    #[error("HB_HOLD_UPDATE_INTERVAL_SECS must be greater than 0")]
    ZeroInterval,

    /// Settlement interval past the supported maximum.
    #[error("HB_HOLD_UPDATE_INTERVAL_SECS is {secs}, maximum is {max_secs}")]
    IntervalTooLong { secs: u64, max_secs: u64 },

    #[error("{var} {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

/// Network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Bind address.
    pub host: IpAddr,
    /// HTTP listening port.
    pub port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
        }
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Volatile, for tests and demos.
    Memory,
    /// Single snapshot file under the data directory.
    File,
    /// RocksDB database under the data directory.
    RocksDb,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "mem" => Ok(Self::Memory),
            "file" => Ok(Self::File),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Backend to open.
    pub backend: StorageBackend,
    /// Data directory for persistent backends.
    pub data_dir: PathBuf,
    /// JSON file of accounts to provision at startup.
    pub seed_file: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            data_dir: PathBuf::from("./data"),
            seed_file: None,
        }
    }
}

/// Settlement configuration.
#[derive(Debug, Clone)]
pub struct SettlementConfig {
    /// Run the periodic settlement task.
    pub enabled: bool,
    /// Time between settlement passes.
    pub interval: Duration,
}

impl Default for SettlementConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval: DEFAULT_HOLD_UPDATE_INTERVAL,
        }
    }
}

/// API Gateway configuration.
#[derive(Debug, Clone)]
pub struct ApiGatewayConfig {
    /// Per-request timeout.
    pub request_timeout: Duration,
    /// Request body limit in bytes.
    pub max_request_size: usize,
    /// Send the envelope status as the HTTP status.
    pub mirror_http_status: bool,
}

impl Default for ApiGatewayConfig {
    fn default() -> Self {
        let gateway = GatewayConfig::default();
        Self {
            request_timeout: gateway.timeouts.request,
            max_request_size: gateway.limits.max_request_size,
            mirror_http_status: gateway.responses.mirror_http_status,
        }
    }
}
