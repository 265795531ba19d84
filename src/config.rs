//! 配置文件 (~/.config/guardpost/config.toml)
//!
//! 文件不存在时使用默认值，缺少的字段同样取默认值

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::DEFAULT_PERIOD_SECS;

/// 报警周期上限：一年
pub const MAX_ALARM_INTERVAL_SECS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("alarm_interval_secs must be greater than zero")]
    ZeroInterval,
    #[error("alarm_interval_secs must not exceed {MAX_ALARM_INTERVAL_SECS}, got {0}")]
    IntervalTooLarge(u64),
    #[error("cannot determine the user config directory")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// 启动时生成的区域数量
    pub zone_count: u32,
    /// 随机报警周期（秒）
    pub alarm_interval_secs: u64,
    /// 电量低于该值视为低电量
    pub low_battery_threshold: u8,
    /// 固定随机种子，便于复现
    pub seed: Option<u64>,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zone_count: 400,
            alarm_interval_secs: DEFAULT_PERIOD_SECS,
            low_battery_threshold: 20,
            seed: None,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// 默认配置文件路径
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("guardpost").join("config.toml"))
    }

    /// 从 TOML 文件加载配置
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.alarm_interval_secs == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        if self.alarm_interval_secs > MAX_ALARM_INTERVAL_SECS {
            return Err(ConfigError::IntervalTooLarge(self.alarm_interval_secs));
        }
        Ok(())
    }

    /// 报警周期，超出上限的值按上限处理
    pub fn alarm_interval(&self) -> chrono::Duration {
        let secs = self.alarm_interval_secs.min(MAX_ALARM_INTERVAL_SECS);
        chrono::Duration::seconds(secs as i64)
    }
}
