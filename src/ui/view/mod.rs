//! 视图层模块
//!
//! 纯读取：把 App 状态映射为终端画面

pub mod components;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};

use super::state::{App, AppMode, ConfirmAction, Pane};
use crate::models::{SecurityZone, format_activity};
use crate::registry::Assignment;
use components::{
    centered_rect, highlight, render_dialog_framework, severity_style, status_icon, status_style,
};

/// 渲染 UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // 标题与统计
            Constraint::Length(3), // 页面切换
            Constraint::Min(10),   // 列表
            Constraint::Length(7), // 通知
            Constraint::Length(3), // 帮助
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    match app.pane {
        Pane::Zones => render_zones(frame, app, chunks[2]),
        Pane::Alarms => render_alarms(frame, app, chunks[2]),
        Pane::Employees => render_employees(frame, app, chunks[2]),
        Pane::Contracts => render_contracts(frame, app, chunks[2]),
    }
    render_toasts(frame, app, chunks[3]);
    render_help(frame, app, chunks[4]);

    match &app.mode {
        AppMode::Dispatching {
            zone_id,
            employee_index,
        } => render_dispatch_dialog(frame, app, *zone_id, *employee_index),
        AppMode::Confirm(action) => render_confirm_dialog(frame, app, action),
        AppMode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let stats = app.registry.stats(app.low_battery_threshold);
    let line = Line::from(vec![
        Span::styled(
            "🛡 GUARDPOST 安保监控  ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("区域 {}  ", stats.total)),
        Span::styled(format!("布防 {}  ", stats.armed), Style::default().fg(Color::Green)),
        Span::styled(format!("报警 {}  ", stats.alarm), Style::default().fg(Color::Red)),
        Span::styled(
            format!("出警 {}  ", stats.emergency),
            Style::default().fg(Color::Red),
        ),
        Span::styled(
            format!("处理中 {}  ", stats.responding),
            Style::default().fg(Color::Blue),
        ),
        Span::styled(
            format!("低电量 {}", stats.low_battery),
            Style::default().fg(Color::Yellow),
        ),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = Pane::ALL
        .iter()
        .map(|pane| match pane {
            Pane::Alarms => format!("{} ({})", pane.title(), app.registry.alarm_queue().len()),
            _ => pane.title().to_string(),
        })
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.pane.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, area);
}

fn zone_line(app: &App, zone: &SecurityZone, selected: bool) -> Line<'static> {
    let marker = if app.registry.is_selected(zone.id) { "[x]" } else { "[ ]" };
    let battery_style = if zone.is_low_battery(app.low_battery_threshold) {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::Green)
    };
    let text = format!(
        "{} №{:<4} {} {:<10} {}",
        marker,
        zone.id,
        status_icon(zone.status),
        zone.status.label(),
        zone.address
    );

    let row_style = if selected { highlight() } else { status_style(zone.status) };
    Line::from(vec![
        Span::styled(text, row_style),
        Span::styled(format!("  {:>3}%", zone.battery_level), battery_style),
        Span::styled(
            format!("  {}", zone.last_activity_display()),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

fn render_zones(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .registry
        .zones()
        .iter()
        .enumerate()
        .map(|(i, zone)| ListItem::new(zone_line(app, zone, i == app.zone_index)))
        .collect();

    let title = format!(
        "安保区域 (已选 {} / {})",
        app.registry.selection().len(),
        app.registry.zones().len()
    );
    render_list(frame, area, items, &title, app.zone_index);
}

fn render_alarms(frame: &mut Frame, app: &App, area: Rect) {
    if app.registry.alarm_queue().is_empty() {
        let empty = Paragraph::new("当前没有待处理的报警")
            .style(Style::default().fg(Color::Green))
            .block(Block::default().title("报警队列").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    // 队列里是入队时的快照
    let items: Vec<ListItem> = app
        .registry
        .alarm_queue()
        .iter()
        .enumerate()
        .map(|(i, zone)| {
            let stale = app.alarm_is_stale(zone.id);
            let text = format!(
                "{} №{:<4} {:<10} {}  ({}){}",
                status_icon(zone.status),
                zone.id,
                zone.status.label(),
                zone.address,
                format_activity(&zone.last_activity),
                if stale { "  [已过时]" } else { "" }
            );
            let style = if i == app.alarm_index {
                highlight()
            } else if stale {
                Style::default().fg(Color::DarkGray)
            } else {
                status_style(zone.status)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    render_list(frame, area, items, "报警队列 (最新在前)", app.alarm_index);
}

fn render_employees(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .registry
        .employees()
        .iter()
        .enumerate()
        .map(|(i, employee)| {
            let on_duty = app
                .registry
                .zones()
                .iter()
                .filter(|z| z.assigned_employee == Some(employee.id))
                .count();
            let text = format!(
                "#{:<3} {:<16} {:<22} {:<20} 负责区域 {}",
                employee.id, employee.full_name, employee.department, employee.rank, on_duty
            );
            let style = if i == app.employee_index {
                highlight()
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    render_list(frame, area, items, "员工名册", app.employee_index);
}

fn render_contracts(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .suspended_contracts()
        .into_iter()
        .enumerate()
        .map(|(i, zone)| {
            let assignee = match app.registry.assignment(zone.id) {
                Assignment::Unassigned => "-".to_string(),
                Assignment::Assigned(employee) => employee.full_name.clone(),
                Assignment::Missing(id) => format!("#{} (已离职)", id),
            };
            let text = format!("№{:<4} {}  负责人: {}", zone.id, zone.address, assignee);
            let style = if i == app.contract_index {
                highlight()
            } else {
                Style::default().fg(Color::DarkGray)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    render_list(frame, area, items, "暂停的合同", app.contract_index);
}

fn render_list(frame: &mut Frame, area: Rect, items: Vec<ListItem>, title: &str, selected: usize) {
    let list = List::new(items).block(Block::default().title(title.to_string()).borders(Borders::ALL));

    let mut state = ListState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_toasts(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .toasts
        .iter()
        .map(|n| {
            Line::from(vec![
                Span::styled(format!("{} ", n.title), severity_style(n.severity)),
                Span::raw(n.description.clone()),
            ])
        })
        .collect();

    let toasts = Paragraph::new(lines)
        .block(Block::default().title("通知").borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(toasts, area);
}

fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match (&app.mode, app.pane) {
        (AppMode::Normal, Pane::Zones) => {
            "[a/d] 布防/撤防  [e] 紧急出警  [t] 报警测试  [空格/*] 选择/全选  [A/D/C/X] 批量  [Tab] 切换  [q] 退出"
        }
        (AppMode::Normal, Pane::Alarms) => "[Enter/g] 派遣员工  [j/k] 导航  [Tab] 切换  [q] 退出",
        (AppMode::Normal, Pane::Employees) => "[x] 辞退  [j/k] 导航  [Tab] 切换  [q] 退出",
        (AppMode::Normal, Pane::Contracts) => "[j/k] 导航  [Tab] 切换  [q] 退出",
        (AppMode::Dispatching { .. }, _) => "[j/k] 选择员工  [Enter] 派遣  [Esc] 取消",
        (AppMode::Confirm(_), _) => "[y] 确认  [n] 取消",
    };

    let text = match app.message.as_deref() {
        Some(message) if !message.is_empty() => format!("{}  |  {}", help_text, message),
        _ => help_text.to_string(),
    };

    let help = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(help, area);
}

fn render_dispatch_dialog(frame: &mut Frame, app: &App, zone_id: u32, employee_index: usize) {
    let area = centered_rect(60, 50, frame.area());
    let address = app
        .registry
        .zone(zone_id)
        .map(|z| z.address.as_str())
        .unwrap_or("?");
    let inner = render_dialog_framework(
        frame,
        area,
        &format!("派遣员工 → №{} {}", zone_id, address),
        Color::Red,
    );

    let items: Vec<ListItem> = app
        .dispatch_candidates()
        .into_iter()
        .enumerate()
        .map(|(i, employee)| {
            let text = format!("{}  {}  {}", employee.full_name, employee.rank, employee.department);
            let style = if i == employee_index {
                highlight()
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(employee_index));
    frame.render_stateful_widget(List::new(items), inner, &mut state);
}

fn render_confirm_dialog(frame: &mut Frame, app: &App, action: &ConfirmAction) {
    let area = centered_rect(50, 20, frame.area());
    frame.render_widget(Clear, area);

    let message = match action {
        ConfirmAction::Dismiss(id) => {
            let name = app
                .registry
                .employee(*id)
                .map(|e| e.full_name.as_str())
                .unwrap_or("?");
            format!("确认辞退 {}？负责的区域不会自动解除指派。", name)
        }
    };

    let dialog = Paragraph::new(format!("{}\n\n[y] 确认  [n] 取消", message))
        .style(Style::default().fg(Color::Red))
        .block(Block::default().title("⚠️ 确认操作").borders(Borders::ALL))
        .wrap(Wrap { trim: true });

    frame.render_widget(dialog, area);
}
