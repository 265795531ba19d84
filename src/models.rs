use std::fmt;

use chrono::{DateTime, Local};

/// 区域状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ZoneStatus {
    Armed, // 布防
    #[default]
    Disarmed, // 撤防
    Alarm,      // 报警待处理
    Emergency,  // 紧急出警
    Suspended,  // 暂停服务
    Responding, // 人员已出发
}

impl ZoneStatus {
    /// 是否处于需要派遣人员的状态
    pub fn needs_response(self) -> bool {
        matches!(self, ZoneStatus::Alarm | ZoneStatus::Emergency)
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoneStatus::Armed => "布防",
            ZoneStatus::Disarmed => "撤防",
            ZoneStatus::Alarm => "报警",
            ZoneStatus::Emergency => "紧急出警",
            ZoneStatus::Suspended => "暂停",
            ZoneStatus::Responding => "出警中",
        }
    }
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 合同状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContractStatus {
    #[default]
    Active,
    Suspended,
}

/// 安保区域（一个地址上的报警面板）
#[derive(Debug, Clone, PartialEq)]
pub struct SecurityZone {
    pub id: u32,
    pub address: String,
    pub status: ZoneStatus,
    pub battery_level: u8, // 0-100
    pub last_activity: DateTime<Local>,
    pub contract_status: ContractStatus,
    /// 弱引用：只记录员工 ID，员工被删除后不会清理
    pub assigned_employee: Option<u32>,
}

impl SecurityZone {
    pub fn new(id: u32, address: String, contract_status: ContractStatus, now: DateTime<Local>) -> Self {
        Self {
            id,
            address,
            status: ZoneStatus::Disarmed,
            battery_level: 100,
            last_activity: now,
            contract_status,
            assigned_employee: None,
        }
    }

    pub fn is_low_battery(&self, threshold: u8) -> bool {
        self.battery_level < threshold
    }

    pub fn last_activity_display(&self) -> String {
        format_activity(&self.last_activity)
    }
}

/// 员工
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub id: u32,
    pub full_name: String,
    pub department: String,
    pub rank: String,
}

/// 员工可编辑字段
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EmployeeFields {
    pub full_name: String,
    pub department: String,
    pub rank: String,
}

impl EmployeeFields {
    pub fn new(full_name: &str, department: &str, rank: &str) -> Self {
        Self {
            full_name: full_name.to_string(),
            department: department.to_string(),
            rank: rank.to_string(),
        }
    }

    /// 所有字段均为必填
    pub fn is_complete(&self) -> bool {
        !self.full_name.is_empty() && !self.department.is_empty() && !self.rank.is_empty()
    }
}

pub const DEPARTMENTS: [&str; 4] = [
    "Патрульная служба",
    "Оперативный отдел",
    "Служба безопасности",
    "Мониторинг",
];

/// 军衔，从低到高
pub const RANKS: [&str; 18] = [
    "Рядовой",
    "Ефрейтор",
    "Младший сержант",
    "Сержант",
    "Старший сержант",
    "Старшина",
    "Прапорщик",
    "Старший прапорщик",
    "Лейтенант",
    "Старший лейтенант",
    "Капитан",
    "Майор",
    "Подполковник",
    "Полковник",
    "Генерал-майор",
    "Генерал-лейтенант",
    "Генерал-полковник",
    "Генерал армии",
];

/// 军衔在等级表中的位置，未知军衔返回 None
pub fn rank_position(rank: &str) -> Option<usize> {
    RANKS.iter().position(|r| *r == rank)
}

/// 按军衔从高到低比较，未知军衔排在最后
pub fn compare_rank_desc(a: &str, b: &str) -> std::cmp::Ordering {
    match (rank_position(a), rank_position(b)) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

/// 活动时间格式 (dd.mm.yyyy, HH:MM:SS)
pub fn format_activity(at: &DateTime<Local>) -> String {
    at.format("%d.%m.%Y, %H:%M:%S").to_string()
}
