//! 模拟数据生成
//!
//! 启动时生成的区域和员工名册，全部是随机的合成数据

use chrono::{DateTime, Duration, Local};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{ContractStatus, DEPARTMENTS, Employee, RANKS, SecurityZone, ZoneStatus};

const STREETS: [&str; 8] = [
    "Ленина",
    "Пушкина",
    "Советская",
    "Мира",
    "Гагарина",
    "Победы",
    "Московская",
    "Центральная",
];

const SEED_NAMES: [&str; 5] = [
    "Иванов И.И.",
    "Петров П.П.",
    "Сидоров С.С.",
    "Козлов К.К.",
    "Новиков Н.Н.",
];

const ARMED_RATIO: f64 = 0.7;
const ACTIVE_CONTRACT_RATIO: f64 = 0.95;
const ACTIVITY_WINDOW_MS: i64 = 7 * 24 * 60 * 60 * 1000;

/// 随机地址：ул. <街道>, д. <1..=200>
pub fn random_address<R: Rng + ?Sized>(rng: &mut R) -> String {
    let street = STREETS.choose(rng).copied().unwrap_or(STREETS[0]);
    format!("ул. {}, д. {}", street, rng.gen_range(1..=200))
}

/// 生成 n 个区域，ID 从 1 连续编号
pub fn generate_zones<R: Rng + ?Sized>(n: u32, rng: &mut R, now: DateTime<Local>) -> Vec<SecurityZone> {
    (1..=n)
        .map(|id| {
            let status = if rng.gen_bool(ARMED_RATIO) {
                ZoneStatus::Armed
            } else {
                ZoneStatus::Disarmed
            };
            let contract_status = if rng.gen_bool(ACTIVE_CONTRACT_RATIO) {
                ContractStatus::Active
            } else {
                ContractStatus::Suspended
            };
            let age = Duration::milliseconds(rng.gen_range(0..ACTIVITY_WINDOW_MS));

            SecurityZone {
                id,
                address: random_address(rng),
                status,
                battery_level: rng.gen_range(1..=100),
                last_activity: now - age,
                contract_status,
                assigned_employee: None,
            }
        })
        .collect()
}

/// 初始员工名册（ID 1-5），部门和军衔随机
pub fn seed_employees<R: Rng + ?Sized>(rng: &mut R) -> Vec<Employee> {
    SEED_NAMES
        .iter()
        .zip(1..)
        .map(|(name, id)| Employee {
            id,
            full_name: name.to_string(),
            department: DEPARTMENTS.choose(rng).copied().unwrap_or(DEPARTMENTS[0]).to_string(),
            rank: RANKS.choose(rng).copied().unwrap_or(RANKS[0]).to_string(),
        })
        .collect()
}
