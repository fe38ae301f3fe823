use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub sqlite_path: String,
    pub pool_max_size: u32,
    pub pool_timeout_secs: u64,
    pub bind_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sqlite_path: "./data/court_analytics.db".to_string(),
            pool_max_size: 10,
            pool_timeout_secs: 5,
            bind_address: "0.0.0.0".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from an arbitrary variable source. Missing, unparseable
    /// or non-positive numbers fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let sqlite_path = lookup("SQLITE_PATH")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.sqlite_path);

        if sqlite_path != ":memory:" && sqlite_path.ends_with('/') {
            anyhow::bail!("SQLITE_PATH must point to a file, got directory {}", sqlite_path);
        }

        Ok(Self {
            sqlite_path,
            pool_max_size: lookup("DB_POOL_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.pool_max_size),
            pool_timeout_secs: lookup("DB_POOL_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .filter(|&v| v > 0)
                .unwrap_or(defaults.pool_timeout_secs),
            bind_address: lookup("BIND_ADDRESS")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.bind_address),
        })
    }
}
