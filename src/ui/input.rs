//! 键盘事件映射 (Input -> Action)
//!
//! 将按键事件转换为 Action

use crossterm::event::KeyCode;

use super::actions::Action;
use super::state::{App, AppMode, Pane};
use crate::registry::BulkOperation;

/// 根据当前模式、页面和按键获取对应的 Action
pub fn get_action(mode: &AppMode, pane: Pane, key: KeyCode) -> Option<Action> {
    match mode {
        AppMode::Normal => match key {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Tab => Some(Action::NextPane),
            KeyCode::BackTab => Some(Action::PrevPane),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            _ => pane_action(pane, key),
        },
        AppMode::Dispatching { .. } => match key {
            KeyCode::Esc => Some(Action::Cancel),
            KeyCode::Enter => Some(Action::Submit),
            KeyCode::Char('j') | KeyCode::Down => Some(Action::MoveSelectionDown),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::MoveSelectionUp),
            _ => None,
        },
        AppMode::Confirm(_) => match key {
            KeyCode::Char('y') | KeyCode::Char('Y') => Some(Action::Submit),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Some(Action::Cancel),
            _ => None,
        },
    }
}

fn pane_action(pane: Pane, key: KeyCode) -> Option<Action> {
    match (pane, key) {
        (Pane::Zones, KeyCode::Char('a')) => Some(Action::Arm),
        (Pane::Zones, KeyCode::Char('d')) => Some(Action::Disarm),
        (Pane::Zones, KeyCode::Char('e')) => Some(Action::EmergencyDispatch),
        (Pane::Zones, KeyCode::Char('t')) => Some(Action::AlarmTest),
        (Pane::Zones, KeyCode::Char(' ')) => Some(Action::ToggleSelect),
        (Pane::Zones, KeyCode::Char('*')) => Some(Action::SelectAll),
        (Pane::Zones, KeyCode::Char('A')) => Some(Action::Bulk(BulkOperation::Arm)),
        (Pane::Zones, KeyCode::Char('D')) => Some(Action::Bulk(BulkOperation::Disarm)),
        (Pane::Zones, KeyCode::Char('C')) => Some(Action::Bulk(BulkOperation::ChargeBattery)),
        (Pane::Zones, KeyCode::Char('X')) => Some(Action::Bulk(BulkOperation::DischargeBattery)),
        (Pane::Alarms, KeyCode::Enter | KeyCode::Char('g')) => Some(Action::StartDispatch),
        (Pane::Employees, KeyCode::Char('x')) => Some(Action::StartDismiss),
        _ => None,
    }
}

/// 处理按键事件，返回 true 表示退出
pub fn handle_key_event(app: &mut App, key: KeyCode) -> bool {
    match get_action(&app.mode, app.pane, key) {
        Some(action) => app.dispatch(action),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::state::ConfirmAction;

    #[test]
    fn test_zone_keys_only_on_zone_pane() {
        assert_eq!(
            get_action(&AppMode::Normal, Pane::Zones, KeyCode::Char('e')),
            Some(Action::EmergencyDispatch)
        );
        assert_eq!(get_action(&AppMode::Normal, Pane::Employees, KeyCode::Char('e')), None);
        assert_eq!(
            get_action(&AppMode::Normal, Pane::Zones, KeyCode::Char('X')),
            Some(Action::Bulk(BulkOperation::DischargeBattery))
        );
    }

    #[test]
    fn test_global_keys() {
        for pane in Pane::ALL {
            assert_eq!(get_action(&AppMode::Normal, pane, KeyCode::Char('q')), Some(Action::Quit));
            assert_eq!(get_action(&AppMode::Normal, pane, KeyCode::Tab), Some(Action::NextPane));
        }
    }

    #[test]
    fn test_dialog_modes() {
        let dispatching = AppMode::Dispatching {
            zone_id: 1,
            employee_index: 0,
        };
        assert_eq!(get_action(&dispatching, Pane::Alarms, KeyCode::Enter), Some(Action::Submit));
        assert_eq!(get_action(&dispatching, Pane::Alarms, KeyCode::Char('q')), None);

        let confirm = AppMode::Confirm(ConfirmAction::Dismiss(1));
        assert_eq!(get_action(&confirm, Pane::Employees, KeyCode::Char('y')), Some(Action::Submit));
        assert_eq!(get_action(&confirm, Pane::Employees, KeyCode::Esc), Some(Action::Cancel));
    }
}
