//! 区域 / 员工注册表
//!
//! 持有全部区域、员工、多选集合和报警队列。下面的方法是修改状态的唯一入口，
//! 界面层只读取状态并调用这些命令。所有命令都不会失败：找不到 ID 时什么也不做。

use std::collections::{BTreeSet, VecDeque};

use chrono::{DateTime, Local};
use rand::Rng;
use tracing::{debug, info};

use crate::alerts::{Effect, Notification};
use crate::clock::Clock;
use crate::generate::{generate_zones, seed_employees};
use crate::models::{ContractStatus, Employee, EmployeeFields, SecurityZone, ZoneStatus};

/// 批量操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkOperation {
    Arm,
    Disarm,
    ChargeBattery,
    DischargeBattery,
}

impl BulkOperation {
    pub fn label(self) -> &'static str {
        match self {
            BulkOperation::Arm => "布防",
            BulkOperation::Disarm => "撤防",
            BulkOperation::ChargeBattery => "充电",
            BulkOperation::DischargeBattery => "放电",
        }
    }
}

/// 区域统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneStats {
    pub total: usize,
    pub armed: usize,
    pub alarm: usize,
    pub emergency: usize,
    pub responding: usize,
    pub low_battery: usize,
    pub suspended_contracts: usize,
}

/// 区域指派员工的解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assignment<'a> {
    Unassigned,
    Assigned(&'a Employee),
    /// 员工已被删除，引用悬空
    Missing(u32),
}

pub struct Registry {
    zones: Vec<SecurityZone>,
    employees: Vec<Employee>,
    selection: BTreeSet<u32>,
    alarm_queue: VecDeque<SecurityZone>,
    effects: Vec<Effect>,
    clock: Box<dyn Clock>,
}

impl Registry {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            zones: Vec::new(),
            employees: Vec::new(),
            selection: BTreeSet::new(),
            alarm_queue: VecDeque::new(),
            effects: Vec::new(),
            clock,
        }
    }

    /// 启动时的模拟数据：n 个区域加上初始员工名册
    pub fn with_mock_data<R: Rng + ?Sized>(zone_count: u32, rng: &mut R, clock: Box<dyn Clock>) -> Self {
        let mut registry = Self::new(clock);
        registry.generate(zone_count, rng);
        registry.employees = seed_employees(rng);
        registry
    }

    pub fn now(&self) -> DateTime<Local> {
        self.clock.now()
    }

    // ============ 查询 ============

    pub fn zones(&self) -> &[SecurityZone] {
        &self.zones
    }

    pub fn zone(&self, id: u32) -> Option<&SecurityZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, id: u32) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    /// 报警队列，最新的在前
    pub fn alarm_queue(&self) -> &VecDeque<SecurityZone> {
        &self.alarm_queue
    }

    pub fn selection(&self) -> &BTreeSet<u32> {
        &self.selection
    }

    pub fn is_selected(&self, id: u32) -> bool {
        self.selection.contains(&id)
    }

    pub fn stats(&self, low_battery_threshold: u8) -> ZoneStats {
        let mut stats = ZoneStats {
            total: self.zones.len(),
            ..ZoneStats::default()
        };
        for zone in &self.zones {
            match zone.status {
                ZoneStatus::Armed => stats.armed += 1,
                ZoneStatus::Alarm => stats.alarm += 1,
                ZoneStatus::Emergency => stats.emergency += 1,
                ZoneStatus::Responding => stats.responding += 1,
                ZoneStatus::Disarmed | ZoneStatus::Suspended => {}
            }
            if zone.is_low_battery(low_battery_threshold) {
                stats.low_battery += 1;
            }
            if zone.contract_status == ContractStatus::Suspended {
                stats.suspended_contracts += 1;
            }
        }
        stats
    }

    pub fn suspended_contracts(&self) -> impl Iterator<Item = &SecurityZone> {
        self.zones
            .iter()
            .filter(|z| z.contract_status == ContractStatus::Suspended)
    }

    /// 解析区域的指派员工（弱引用，可能悬空）
    pub fn assignment(&self, zone_id: u32) -> Assignment<'_> {
        match self.zone(zone_id).and_then(|z| z.assigned_employee) {
            None => Assignment::Unassigned,
            Some(employee_id) => match self.employee(employee_id) {
                Some(employee) => Assignment::Assigned(employee),
                None => Assignment::Missing(employee_id),
            },
        }
    }

    /// 取出待执行的副作用
    pub fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    // ============ 区域命令 ============

    /// 重新生成全部区域，旧的多选和报警队列一并清空
    pub fn generate<R: Rng + ?Sized>(&mut self, n: u32, rng: &mut R) {
        self.zones = generate_zones(n, rng, self.clock.now());
        self.selection.clear();
        self.alarm_queue.clear();
        debug!(count = n, "zones generated");
    }

    /// 设置状态并刷新活动时间
    pub fn set_status(&mut self, id: u32, status: ZoneStatus) -> bool {
        let now = self.clock.now();
        match self.zones.iter_mut().find(|z| z.id == id) {
            Some(zone) => {
                zone.status = status;
                zone.last_activity = now;
                debug!(zone = id, ?status, "zone status set");
                true
            }
            None => false,
        }
    }

    /// 紧急出警：状态置为 Emergency，加入报警队列，并移到列表最前
    pub fn emergency_dispatch(&mut self, id: u32) -> bool {
        let Some(pos) = self.zones.iter().position(|z| z.id == id) else {
            return false;
        };

        let mut zone = self.zones.remove(pos);
        zone.status = ZoneStatus::Emergency;
        zone.last_activity = self.clock.now();
        self.enqueue_alarm(&zone);
        self.effects.push(Effect::Notify(Notification::destructive(
            "🚨 紧急出警",
            format!("出警前往区域 {}", zone.address),
        )));
        self.zones.insert(0, zone);

        info!(zone = id, "emergency dispatch requested");
        true
    }

    /// 报警测试
    pub fn alarm_test(&mut self, id: u32) -> bool {
        if !self.set_status(id, ZoneStatus::Alarm) {
            return false;
        }
        let Some(zone) = self.zone(id).cloned() else {
            return false;
        };

        info!(zone = id, "alarm test triggered");
        self.enqueue_alarm(&zone);
        self.effects.push(Effect::Siren);
        self.effects.push(Effect::Notify(Notification::destructive(
            "🚨 报警测试",
            format!("区域 {} 报警测试", zone.address),
        )));
        true
    }

    /// 批量操作，每个 ID 独立执行，结束后清空多选；返回实际生效的区域数
    pub fn bulk_apply(&mut self, ids: &[u32], operation: BulkOperation) -> usize {
        let now = self.clock.now();
        let mut applied = 0;

        for &id in ids {
            let Some(zone) = self.zones.iter_mut().find(|z| z.id == id) else {
                continue;
            };
            match operation {
                BulkOperation::Arm => zone.status = ZoneStatus::Armed,
                BulkOperation::Disarm => zone.status = ZoneStatus::Disarmed,
                BulkOperation::ChargeBattery => zone.battery_level = 100,
                BulkOperation::DischargeBattery => zone.battery_level = 0,
            }
            zone.last_activity = now;
            applied += 1;
        }

        self.selection.clear();
        self.effects.push(Effect::Notify(Notification::info(
            "操作完成",
            format!("{} {} 个区域", operation.label(), ids.len()),
        )));
        debug!(?operation, requested = ids.len(), applied, "bulk operation applied");
        applied
    }

    /// 对当前多选集合执行批量操作
    pub fn apply_to_selection(&mut self, operation: BulkOperation) -> usize {
        let ids: Vec<u32> = self.selection.iter().copied().collect();
        self.bulk_apply(&ids, operation)
    }

    pub fn toggle_selection(&mut self, id: u32) {
        if !self.selection.remove(&id) {
            self.selection.insert(id);
        }
    }

    /// 全选；已经全选时取消全部
    pub fn select_all(&mut self) {
        if self.selection.len() == self.zones.len() {
            self.selection.clear();
        } else {
            self.selection = self.zones.iter().map(|z| z.id).collect();
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// 新建区域，ID 为现有最大 ID + 1；地址为空时忽略
    pub fn create_zone(&mut self, address: &str, contract_status: ContractStatus) -> Option<u32> {
        if address.is_empty() {
            return None;
        }

        let id = self.zones.iter().map(|z| z.id).max().unwrap_or(0) + 1;
        let zone = SecurityZone::new(id, address.to_string(), contract_status, self.clock.now());
        self.effects.push(Effect::Notify(Notification::info(
            "区域已创建",
            format!("新区域 {} 已添加", zone.address),
        )));
        self.zones.push(zone);

        debug!(zone = id, "zone created");
        Some(id)
    }

    /// 模拟器触发：第 index 个区域若处于布防状态则转为报警。
    /// 不刷新活动时间，也不进入报警队列。
    pub fn trigger_alarm_at(&mut self, index: usize) -> Option<u32> {
        let zone = self.zones.get_mut(index)?;
        if zone.status != ZoneStatus::Armed {
            return None;
        }

        zone.status = ZoneStatus::Alarm;
        let (id, address) = (zone.id, zone.address.clone());
        self.effects.push(Effect::Siren);
        self.effects.push(Effect::Notify(Notification::destructive(
            "🚨 报警！",
            format!("区域 {} 触发报警", address),
        )));

        info!(zone = id, "alarm triggered");
        Some(id)
    }

    fn enqueue_alarm(&mut self, zone: &SecurityZone) {
        if !self.alarm_queue.iter().any(|z| z.id == zone.id) {
            self.alarm_queue.push_front(zone.clone());
        }
    }

    // ============ 员工命令 ============

    /// 新建员工。ID 取当前人数 + 1，删除员工后可能与现有 ID 重复
    pub fn create_employee(&mut self, full_name: &str, department: &str, rank: &str) -> Option<u32> {
        let fields = EmployeeFields::new(full_name, department, rank);
        if !fields.is_complete() {
            return None;
        }

        let id = self.employees.len() as u32 + 1;
        self.effects.push(Effect::Notify(Notification::info(
            "员工已创建",
            format!("{} 已加入系统", fields.full_name),
        )));
        self.employees.push(Employee {
            id,
            full_name: fields.full_name,
            department: fields.department,
            rank: fields.rank,
        });

        debug!(employee = id, "employee created");
        Some(id)
    }

    pub fn update_employee(&mut self, id: u32, fields: EmployeeFields) -> bool {
        if !fields.is_complete() {
            return false;
        }
        let Some(employee) = self.employees.iter_mut().find(|e| e.id == id) else {
            return false;
        };

        employee.full_name = fields.full_name;
        employee.department = fields.department;
        employee.rank = fields.rank;
        self.effects.push(Effect::Notify(Notification::info(
            "员工已更新",
            "员工信息已修改",
        )));
        true
    }

    /// 辞退员工。指向该员工的区域引用不做清理
    pub fn remove_employee(&mut self, id: u32) -> Option<Employee> {
        let pos = self.employees.iter().position(|e| e.id == id)?;
        let removed = self.employees.remove(pos);
        self.effects.push(Effect::Notify(Notification::destructive(
            "员工已辞退",
            format!("{} 已从系统中移除", removed.full_name),
        )));

        debug!(employee = id, "employee removed");
        Some(removed)
    }

    /// 派遣员工前往区域。无论 ID 是否存在，区域都会从报警队列中移除
    pub fn dispatch_employee(&mut self, zone_id: u32, employee_id: u32) -> bool {
        self.alarm_queue.retain(|z| z.id != zone_id);

        let employee_name = self.employee(employee_id).map(|e| e.full_name.clone());
        let now = self.clock.now();
        let dispatched = match (self.zones.iter_mut().find(|z| z.id == zone_id), &employee_name) {
            (Some(zone), Some(_)) => {
                zone.status = ZoneStatus::Responding;
                zone.assigned_employee = Some(employee_id);
                zone.last_activity = now;
                true
            }
            _ => false,
        };

        let address = self.zone(zone_id).map(|z| z.address.clone());
        self.effects.push(Effect::Notify(Notification::info(
            "员工已派遣",
            format!(
                "{} 前往区域 {}",
                employee_name.as_deref().unwrap_or("未知员工"),
                address.as_deref().unwrap_or("未知区域")
            ),
        )));

        if dispatched {
            info!(zone = zone_id, employee = employee_id, "employee dispatched");
        }
        dispatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{Duration, TimeZone};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn start() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn mock_registry(zones: u32) -> (Registry, ManualClock) {
        let clock = ManualClock::new(start());
        let mut rng = StdRng::seed_from_u64(42);
        let registry = Registry::with_mock_data(zones, &mut rng, Box::new(clock.clone()));
        (registry, clock)
    }

    fn queue_ids(registry: &Registry) -> Vec<u32> {
        registry.alarm_queue().iter().map(|z| z.id).collect()
    }

    #[test]
    fn test_generate_400() {
        let (registry, _) = mock_registry(400);

        assert_eq!(registry.zones().len(), 400);
        assert!(registry.zones().iter().all(|z| (1..=400).contains(&z.id)));
        assert_eq!(registry.employees().len(), 5);
    }

    #[test]
    fn test_generate_replaces_collection() {
        let (mut registry, _) = mock_registry(10);
        registry.emergency_dispatch(3);
        registry.toggle_selection(4);

        let mut rng = StdRng::seed_from_u64(7);
        registry.generate(3, &mut rng);

        assert_eq!(registry.zones().len(), 3);
        assert!(registry.alarm_queue().is_empty());
        assert!(registry.selection().is_empty());
    }

    #[test]
    fn test_set_status_only_touches_status_and_time() {
        let (mut registry, clock) = mock_registry(10);
        let before = registry.zone(3).unwrap().clone();

        clock.advance(Duration::minutes(10));
        assert!(registry.set_status(3, ZoneStatus::Suspended));

        let after = registry.zone(3).unwrap().clone();
        assert_eq!(after.status, ZoneStatus::Suspended);
        assert_eq!(after.last_activity, start() + Duration::minutes(10));
        assert_eq!(
            SecurityZone {
                status: before.status,
                last_activity: before.last_activity,
                ..after
            },
            before
        );
    }

    #[test]
    fn test_set_status_missing_id() {
        let (mut registry, _) = mock_registry(10);
        let before = registry.zones().to_vec();

        assert!(!registry.set_status(999, ZoneStatus::Armed));
        assert_eq!(registry.zones(), before.as_slice());
    }

    #[test]
    fn test_emergency_dispatch_twice() {
        let (mut registry, _) = mock_registry(10);

        assert!(registry.emergency_dispatch(5));
        assert!(registry.emergency_dispatch(5));

        assert_eq!(queue_ids(&registry), vec![5]);
        assert_eq!(registry.zones()[0].id, 5);
        assert_eq!(registry.zones()[0].status, ZoneStatus::Emergency);
        assert_eq!(registry.zones().len(), 10);
    }

    #[test]
    fn test_emergency_dispatch_queue_order() {
        let (mut registry, _) = mock_registry(10);

        registry.emergency_dispatch(2);
        registry.alarm_test(7);
        registry.emergency_dispatch(4);

        assert_eq!(queue_ids(&registry), vec![4, 7, 2]);
        let order: Vec<u32> = registry.zones().iter().take(2).map(|z| z.id).collect();
        assert_eq!(order, vec![4, 2]);
    }

    #[test]
    fn test_queue_holds_snapshots() {
        let (mut registry, _) = mock_registry(10);

        registry.alarm_test(6);
        registry.set_status(6, ZoneStatus::Disarmed);

        assert_eq!(registry.alarm_queue()[0].status, ZoneStatus::Alarm);
        assert_eq!(registry.zone(6).unwrap().status, ZoneStatus::Disarmed);
    }

    #[test]
    fn test_alarm_test_effects() {
        let (mut registry, _) = mock_registry(10);
        registry.take_effects();

        assert!(registry.alarm_test(1));
        assert!(registry.alarm_test(1));

        assert_eq!(queue_ids(&registry), vec![1]);
        let effects = registry.take_effects();
        assert_eq!(effects.iter().filter(|e| **e == Effect::Siren).count(), 2);
        assert!(registry.take_effects().is_empty());
    }

    #[test]
    fn test_alarm_test_missing_id() {
        let (mut registry, _) = mock_registry(10);
        assert!(!registry.alarm_test(11));
        assert!(registry.alarm_queue().is_empty());
        assert!(registry.take_effects().is_empty());
    }

    #[test]
    fn test_bulk_arm_then_disarm() {
        let (mut registry, _) = mock_registry(10);
        registry.emergency_dispatch(1);
        registry.alarm_test(2);
        registry.set_status(3, ZoneStatus::Suspended);

        let ids = [1, 2, 3, 4, 5];
        assert_eq!(registry.bulk_apply(&ids, BulkOperation::Arm), 5);
        assert_eq!(registry.bulk_apply(&ids, BulkOperation::Disarm), 5);

        for id in ids {
            assert_eq!(registry.zone(id).unwrap().status, ZoneStatus::Disarmed);
        }
    }

    #[test]
    fn test_bulk_battery_keeps_status() {
        let (mut registry, _) = mock_registry(10);
        let statuses: Vec<ZoneStatus> = registry.zones().iter().map(|z| z.status).collect();

        registry.bulk_apply(&[1, 2, 99], BulkOperation::DischargeBattery);
        assert_eq!(registry.zone(1).unwrap().battery_level, 0);
        assert_eq!(registry.zone(2).unwrap().battery_level, 0);

        registry.bulk_apply(&[2], BulkOperation::ChargeBattery);
        assert_eq!(registry.zone(2).unwrap().battery_level, 100);

        let after: Vec<ZoneStatus> = registry.zones().iter().map(|z| z.status).collect();
        assert_eq!(statuses, after);
    }

    #[test]
    fn test_bulk_missing_ids_and_selection_cleared() {
        let (mut registry, _) = mock_registry(10);
        registry.toggle_selection(3);
        registry.toggle_selection(500);

        assert_eq!(registry.apply_to_selection(BulkOperation::Arm), 1);
        assert_eq!(registry.zone(3).unwrap().status, ZoneStatus::Armed);
        assert!(registry.selection().is_empty());
    }

    #[test]
    fn test_selection_toggle_and_select_all() {
        let (mut registry, _) = mock_registry(4);

        registry.toggle_selection(2);
        assert!(registry.is_selected(2));
        registry.toggle_selection(2);
        assert!(!registry.is_selected(2));

        registry.select_all();
        assert_eq!(registry.selection().len(), 4);
        registry.select_all();
        assert!(registry.selection().is_empty());
    }

    #[test]
    fn test_create_zone_next_id() {
        let (mut registry, clock) = mock_registry(400);
        clock.advance(Duration::hours(1));

        let id = registry.create_zone("Test St 1", ContractStatus::Active);
        assert_eq!(id, Some(401));

        let zone = registry.zones().last().unwrap();
        assert_eq!(zone.id, 401);
        assert_eq!(zone.status, ZoneStatus::Disarmed);
        assert_eq!(zone.battery_level, 100);
        assert_eq!(zone.last_activity, start() + Duration::hours(1));
    }

    #[test]
    fn test_create_zone_uses_max_id() {
        let (mut registry, _) = mock_registry(10);
        // 紧急出警会把区域移到最前，最大 ID 不一定在末尾
        registry.emergency_dispatch(10);
        assert_eq!(registry.create_zone("ул. Новая, д. 1", ContractStatus::Suspended), Some(11));
    }

    #[test]
    fn test_create_zone_empty_address() {
        let (mut registry, _) = mock_registry(10);
        assert_eq!(registry.create_zone("", ContractStatus::Active), None);
        assert_eq!(registry.zones().len(), 10);
    }

    #[test]
    fn test_create_zone_on_empty_registry() {
        let mut registry = Registry::new(Box::new(ManualClock::new(start())));
        assert_eq!(registry.create_zone("ул. Мира, д. 1", ContractStatus::Active), Some(1));
    }

    #[test]
    fn test_employee_id_by_count() {
        let mut registry = Registry::new(Box::new(ManualClock::new(start())));

        assert_eq!(registry.create_employee("A", "B", "C"), Some(1));
        assert!(registry.remove_employee(1).is_some());
        assert_eq!(registry.create_employee("D", "E", "F"), Some(1));
        assert_eq!(registry.employees().len(), 1);
        assert_eq!(registry.employees()[0].full_name, "D");
    }

    #[test]
    fn test_employee_id_collision_after_removal() {
        let (mut registry, _) = mock_registry(1);

        registry.remove_employee(1);
        assert_eq!(registry.create_employee("D", "E", "F"), Some(5));

        let fives = registry.employees().iter().filter(|e| e.id == 5).count();
        assert_eq!(fives, 2);
    }

    #[test]
    fn test_create_employee_requires_all_fields() {
        let (mut registry, _) = mock_registry(1);
        assert_eq!(registry.create_employee("A", "", "C"), None);
        assert_eq!(registry.employees().len(), 5);
    }

    #[test]
    fn test_update_employee() {
        let (mut registry, _) = mock_registry(1);

        assert!(registry.update_employee(2, EmployeeFields::new("Смирнов С.С.", "Мониторинг", "Майор")));
        let employee = registry.employee(2).unwrap();
        assert_eq!(employee.full_name, "Смирнов С.С.");
        assert_eq!(employee.rank, "Майор");

        assert!(!registry.update_employee(42, EmployeeFields::new("X", "Y", "Z")));
        assert!(!registry.update_employee(2, EmployeeFields::new("", "Y", "Z")));
        assert_eq!(registry.employee(2).unwrap().full_name, "Смирнов С.С.");
    }

    #[test]
    fn test_dispatch_employee() {
        let (mut registry, clock) = mock_registry(10);
        registry.alarm_test(3);
        clock.advance(Duration::seconds(30));

        assert!(registry.dispatch_employee(3, 2));

        let zone = registry.zone(3).unwrap();
        assert_eq!(zone.status, ZoneStatus::Responding);
        assert_eq!(zone.assigned_employee, Some(2));
        assert_eq!(zone.last_activity, start() + Duration::seconds(30));
        assert!(registry.alarm_queue().is_empty());
        assert!(matches!(registry.assignment(3), Assignment::Assigned(e) if e.id == 2));
    }

    #[test]
    fn test_dispatch_removes_from_queue_even_if_absent() {
        let (mut registry, _) = mock_registry(10);
        registry.emergency_dispatch(4);

        registry.dispatch_employee(8, 1);
        assert_eq!(queue_ids(&registry), vec![4]);
        assert_eq!(registry.zone(8).unwrap().status, ZoneStatus::Responding);

        // 员工不存在：区域不变，但仍然移出队列并给出通知
        registry.take_effects();
        let status = registry.zone(4).unwrap().status;
        assert!(!registry.dispatch_employee(4, 99));
        assert!(registry.alarm_queue().is_empty());
        assert_eq!(registry.zone(4).unwrap().status, status);
        assert_eq!(registry.take_effects().len(), 1);

        assert!(!registry.dispatch_employee(999, 1));
    }

    #[test]
    fn test_removed_employee_leaves_dangling_reference() {
        let (mut registry, _) = mock_registry(10);
        registry.dispatch_employee(1, 3);

        registry.remove_employee(3);
        assert_eq!(registry.zone(1).unwrap().assigned_employee, Some(3));
        assert_eq!(registry.assignment(1), Assignment::Missing(3));
        assert_eq!(registry.assignment(2), Assignment::Unassigned);
    }

    #[test]
    fn test_trigger_alarm_only_when_armed() {
        let (mut registry, _) = mock_registry(10);
        registry.set_status(1, ZoneStatus::Armed);
        registry.set_status(2, ZoneStatus::Disarmed);
        let stamp = registry.zone(1).unwrap().last_activity;
        registry.take_effects();

        assert_eq!(registry.trigger_alarm_at(0), Some(1));
        assert_eq!(registry.zone(1).unwrap().status, ZoneStatus::Alarm);
        assert_eq!(registry.zone(1).unwrap().last_activity, stamp);
        assert!(registry.alarm_queue().is_empty());
        assert_eq!(registry.take_effects()[0], Effect::Siren);

        assert_eq!(registry.trigger_alarm_at(1), None);
        assert_eq!(registry.zone(2).unwrap().status, ZoneStatus::Disarmed);
        assert_eq!(registry.trigger_alarm_at(100), None);
    }

    #[test]
    fn test_stats() {
        let mut registry = Registry::new(Box::new(ManualClock::new(start())));
        for address in ["a", "b", "c", "d"] {
            registry.create_zone(address, ContractStatus::Active);
        }
        registry.create_zone("e", ContractStatus::Suspended);
        registry.set_status(1, ZoneStatus::Armed);
        registry.alarm_test(2);
        registry.emergency_dispatch(3);
        registry.bulk_apply(&[4], BulkOperation::DischargeBattery);

        let stats = registry.stats(20);
        assert_eq!(
            stats,
            ZoneStats {
                total: 5,
                armed: 1,
                alarm: 1,
                emergency: 1,
                responding: 0,
                low_battery: 1,
                suspended_contracts: 1,
            }
        );
        assert_eq!(registry.suspended_contracts().map(|z| z.id).collect::<Vec<_>>(), vec![5]);
    }
}
