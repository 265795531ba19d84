//! guardpost: 安保区域监控面板
//!
//! 区域 / 员工注册表、随机报警模拟，以及基于 ratatui 的终端界面。
//! 所有数据在启动时随机生成，只保存在内存中。

pub mod alerts;
pub mod clock;
pub mod config;
pub mod generate;
pub mod logging;
pub mod models;
pub mod registry;
pub mod simulation;
pub mod ui;
