//! 业务逻辑处理 (Update/Dispatch)
//!
//! 把 Action 转成注册表命令，并维护光标和弹窗状态

use super::actions::Action;
use super::state::{App, AppMode, ConfirmAction, Pane};
use crate::models::ZoneStatus;
use crate::registry::BulkOperation;

impl App {
    /// 核心逻辑分发，返回 true 表示退出
    pub fn dispatch(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::NextPane => self.pane = self.pane.next(),
            Action::PrevPane => self.pane = self.pane.prev(),
            Action::MoveSelectionUp => self.move_up(),
            Action::MoveSelectionDown => self.move_down(),

            Action::Arm => self.set_selected_status(ZoneStatus::Armed),
            Action::Disarm => self.set_selected_status(ZoneStatus::Disarmed),
            Action::EmergencyDispatch => self.emergency_dispatch(),
            Action::AlarmTest => self.alarm_test(),

            Action::ToggleSelect => self.toggle_select(),
            Action::SelectAll => self.registry.select_all(),
            Action::Bulk(operation) => self.bulk(operation),

            Action::StartDispatch => self.start_dispatch(),
            Action::StartDismiss => self.start_dismiss(),

            Action::Cancel => self.cancel(),
            Action::Submit => match self.mode.clone() {
                AppMode::Dispatching {
                    zone_id,
                    employee_index,
                } => self.confirm_dispatch(zone_id, employee_index),
                AppMode::Confirm(action) => self.execute_confirm(action),
                AppMode::Normal => {}
            },
        }

        self.clamp_indices();
        self.flush_effects();
        false
    }

    // ============ 导航相关 ============

    pub fn move_up(&mut self) {
        if let AppMode::Dispatching { employee_index, .. } = &mut self.mode {
            *employee_index = employee_index.saturating_sub(1);
            return;
        }
        if self.mode == AppMode::Normal {
            let index = self.pane_index_mut();
            *index = index.saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        let employees = self.registry.employees().len();
        if let AppMode::Dispatching { employee_index, .. } = &mut self.mode {
            if *employee_index + 1 < employees {
                *employee_index += 1;
            }
            return;
        }
        if self.mode == AppMode::Normal {
            let len = self.pane_len();
            let index = self.pane_index_mut();
            if *index + 1 < len {
                *index += 1;
            }
        }
    }

    fn pane_index_mut(&mut self) -> &mut usize {
        match self.pane {
            Pane::Zones => &mut self.zone_index,
            Pane::Alarms => &mut self.alarm_index,
            Pane::Employees => &mut self.employee_index,
            Pane::Contracts => &mut self.contract_index,
        }
    }

    fn pane_len(&self) -> usize {
        match self.pane {
            Pane::Zones => self.registry.zones().len(),
            Pane::Alarms => self.registry.alarm_queue().len(),
            Pane::Employees => self.registry.employees().len(),
            Pane::Contracts => self.registry.suspended_contracts().count(),
        }
    }

    // ============ 区域操作 ============

    fn set_selected_status(&mut self, status: ZoneStatus) {
        if let Some(id) = self.selected_zone().map(|z| z.id) {
            self.registry.set_status(id, status);
            self.message = Some(format!("区域 №{} {}", id, status));
        }
    }

    /// 紧急出警后区域移到列表最前，光标跟随
    fn emergency_dispatch(&mut self) {
        if let Some(id) = self.selected_zone().map(|z| z.id) {
            if self.registry.emergency_dispatch(id) {
                self.zone_index = 0;
            }
        }
    }

    fn alarm_test(&mut self) {
        if let Some(id) = self.selected_zone().map(|z| z.id) {
            self.registry.alarm_test(id);
        }
    }

    fn toggle_select(&mut self) {
        if let Some(id) = self.selected_zone().map(|z| z.id) {
            self.registry.toggle_selection(id);
        }
    }

    fn bulk(&mut self, operation: BulkOperation) {
        if self.registry.selection().is_empty() {
            self.message = Some("未选择区域".to_string());
            return;
        }
        let applied = self.registry.apply_to_selection(operation);
        self.message = Some(format!("{}: {} 个区域", operation.label(), applied));
    }

    // ============ 派遣相关 ============

    /// 为报警队列中选中的区域挑选员工
    pub fn start_dispatch(&mut self) {
        if self.registry.employees().is_empty() {
            self.message = Some("没有可派遣的员工".to_string());
            return;
        }
        if let Some(zone_id) = self.selected_alarm().map(|z| z.id) {
            self.mode = AppMode::Dispatching {
                zone_id,
                employee_index: 0,
            };
        }
    }

    fn confirm_dispatch(&mut self, zone_id: u32, employee_index: usize) {
        let employee_id = self.dispatch_candidates().get(employee_index).map(|e| e.id);
        if let Some(employee_id) = employee_id {
            self.registry.dispatch_employee(zone_id, employee_id);
        }
        self.mode = AppMode::Normal;
    }

    // ============ 辞退相关 ============

    pub fn start_dismiss(&mut self) {
        if let Some(id) = self.selected_employee().map(|e| e.id) {
            self.mode = AppMode::Confirm(ConfirmAction::Dismiss(id));
        }
    }

    fn execute_confirm(&mut self, action: ConfirmAction) {
        match action {
            ConfirmAction::Dismiss(id) => {
                self.registry.remove_employee(id);
            }
        }
        self.mode = AppMode::Normal;
    }

    pub fn cancel(&mut self) {
        self.mode = AppMode::Normal;
        self.message = Some("已取消".to_string());
    }
}
