//! Action 枚举定义 (Intent)
//!
//! 用户交互转化为明确的语义化 Action

use crate::registry::BulkOperation;

/// 用户操作枚举
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    NextPane,
    PrevPane,
    MoveSelectionUp,
    MoveSelectionDown,

    // 单个区域
    Arm,
    Disarm,
    EmergencyDispatch,
    AlarmTest,

    // 多选与批量
    ToggleSelect,
    SelectAll,
    Bulk(BulkOperation),

    // 报警队列 / 员工
    StartDispatch,
    StartDismiss,

    // 弹窗通用交互
    Cancel, // Esc / n
    Submit, // Enter / y
}
