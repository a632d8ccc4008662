use std::env;
use std::path::PathBuf;

#[derive(Debug)]
pub enum ConfigError {
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Order dataset read by every command unless a path is given
    pub data_path: PathBuf,
    /// Directory receiving workbook / CSV / JSON exports
    pub export_dir: PathBuf,
    /// Symbol prefixed to monetary values in the report and dashboard
    pub currency: String,
    /// Rows shown in "top N" sections
    pub top_n: usize,
    /// Rows produced by the sample generator
    pub sample_records: usize,
    /// Fixed seed for the sample generator
    pub sample_seed: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Environment variables:
    /// - `SALESFLOW_DATA_PATH` (default: data/ecommerce_data.csv)
    /// - `SALESFLOW_EXPORT_DIR` (default: exports)
    /// - `SALESFLOW_CURRENCY` (default: ₹)
    /// - `SALESFLOW_TOP_N` (default: 5)
    /// - `SAMPLE_RECORDS` (default: 1000)
    /// - `SAMPLE_SEED` (optional)
    ///
    /// `RUST_LOG` is read directly by `env_logger`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("SALESFLOW_DATA_PATH")
            .unwrap_or_else(|| "data/ecommerce_data.csv".to_string())
            .into();

        let export_dir = lookup("SALESFLOW_EXPORT_DIR")
            .unwrap_or_else(|| "exports".to_string())
            .into();

        let currency = lookup("SALESFLOW_CURRENCY").unwrap_or_else(|| "₹".to_string());

        let top_n = parse_var(&lookup, "SALESFLOW_TOP_N")?.unwrap_or(5);
        if top_n == 0 {
            return Err(ConfigError::InvalidValue(
                "SALESFLOW_TOP_N must be at least 1".to_string(),
            ));
        }

        let sample_records = parse_var(&lookup, "SAMPLE_RECORDS")?.unwrap_or(1000);
        if sample_records < 2 {
            return Err(ConfigError::InvalidValue(
                "SAMPLE_RECORDS must be at least 2".to_string(),
            ));
        }

        let sample_seed = parse_var(&lookup, "SAMPLE_SEED")?;

        Ok(Self {
            data_path,
            export_dir,
            currency,
            top_n,
            sample_records,
            sample_seed,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            ConfigError::InvalidValue(format!("{} must be a non-negative integer, got {:?}", key, raw))
        }),
    }
}
