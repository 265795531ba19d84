//! 通用 UI 组件
//!
//! 弹窗框架、居中布局、状态样式

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear},
};

use crate::alerts::Severity;
use crate::models::ZoneStatus;

/// [组件] 弹窗基础框架
pub fn render_dialog_framework(frame: &mut Frame, area: Rect, title: &str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(Style::default().fg(color));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

/// 按百分比取居中的矩形
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

pub fn status_icon(status: ZoneStatus) -> &'static str {
    match status {
        ZoneStatus::Armed => "🛡",
        ZoneStatus::Disarmed => "○",
        ZoneStatus::Alarm => "⚠",
        ZoneStatus::Emergency => "🚨",
        ZoneStatus::Suspended => "⏸",
        ZoneStatus::Responding => "🚓",
    }
}

pub fn status_style(status: ZoneStatus) -> Style {
    match status {
        ZoneStatus::Armed => Style::default().fg(Color::Green),
        ZoneStatus::Disarmed => Style::default().fg(Color::Gray),
        ZoneStatus::Alarm | ZoneStatus::Emergency => {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        }
        ZoneStatus::Suspended => Style::default().fg(Color::DarkGray),
        ZoneStatus::Responding => Style::default().fg(Color::Blue),
    }
}

pub fn severity_style(severity: Severity) -> Style {
    match severity {
        Severity::Info => Style::default().fg(Color::Gray),
        Severity::Destructive => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    }
}

/// 选中行的高亮样式
pub fn highlight() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}
