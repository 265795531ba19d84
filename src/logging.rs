//! 日志初始化
//!
//! 终端界面占用 stdout，日志写入数据目录下的文件 (~/.local/share/guardpost/guardpost.log)。
//! RUST_LOG 优先于配置中的 log_level。

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE: &str = "guardpost.log";

/// 获取数据目录路径，不存在时创建
pub fn data_dir() -> io::Result<PathBuf> {
    let dir = dirs::data_dir()
        .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "cannot determine the user data directory"))?
        .join("guardpost");

    fs::create_dir_all(&dir)?;

    Ok(dir)
}

/// 初始化文件日志，返回的 guard 必须在程序结束前保持存活
pub fn init(level: &str, log_dir: &Path) -> anyhow::Result<WorkerGuard> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(true))
        .try_init()?;

    Ok(guard)
}
