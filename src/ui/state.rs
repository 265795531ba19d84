//! App 状态定义 (Model)
//!
//! 界面只读取注册表；所有修改都通过 logic.rs 中的 dispatch 转成注册表命令

use std::collections::VecDeque;

use rand::rngs::StdRng;

use crate::alerts::{self, AudioError, AudioPlayer, Notification, Notifier};
use crate::models::{Employee, SecurityZone, compare_rank_desc};
use crate::registry::Registry;
use crate::simulation::AlarmSimulator;

const TOAST_LIMIT: usize = 5;

/// 应用状态
pub struct App {
    pub registry: Registry,
    pub simulator: AlarmSimulator<StdRng>,
    pub toasts: ToastFeed,
    sirens: PendingSirens,
    pub pane: Pane,
    pub zone_index: usize,
    pub alarm_index: usize,
    pub employee_index: usize,
    pub contract_index: usize,
    pub mode: AppMode,
    pub message: Option<String>,
    pub low_battery_threshold: u8,
}

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Zones,
    Alarms,
    Employees,
    Contracts,
}

impl Pane {
    pub const ALL: [Pane; 4] = [Pane::Zones, Pane::Alarms, Pane::Employees, Pane::Contracts];

    pub fn title(self) -> &'static str {
        match self {
            Pane::Zones => "区域",
            Pane::Alarms => "报警队列",
            Pane::Employees => "员工",
            Pane::Contracts => "合同",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// 应用模式
#[derive(Debug, Clone, PartialEq)]
pub enum AppMode {
    Normal,
    /// 为报警区域挑选出警员工
    Dispatching { zone_id: u32, employee_index: usize },
    Confirm(ConfirmAction),
}

/// 确认操作类型
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmAction {
    Dismiss(u32),
}

/// 最近的通知，最新的在前
#[derive(Debug, Default)]
pub struct ToastFeed {
    items: VecDeque<Notification>,
}

impl ToastFeed {
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.front()
    }
}

impl Notifier for ToastFeed {
    fn notify(&mut self, notification: Notification) {
        self.items.push_front(notification);
        self.items.truncate(TOAST_LIMIT);
    }
}

/// 尚未播放的警报声；终端由主循环持有，声音要等绘制之后通过同一个输出发出
#[derive(Debug, Default)]
struct PendingSirens(usize);

impl AudioPlayer for PendingSirens {
    fn play(&mut self) -> Result<(), AudioError> {
        self.0 += 1;
        Ok(())
    }
}

impl App {
    /// 创建应用并启动报警模拟
    pub fn new(registry: Registry, mut simulator: AlarmSimulator<StdRng>, low_battery_threshold: u8) -> Self {
        simulator.start(registry.now());
        Self {
            registry,
            simulator,
            toasts: ToastFeed::default(),
            sirens: PendingSirens::default(),
            pane: Pane::Zones,
            zone_index: 0,
            alarm_index: 0,
            employee_index: 0,
            contract_index: 0,
            mode: AppMode::Normal,
            message: None,
            low_battery_threshold,
        }
    }

    /// 退出前停止模拟
    pub fn shutdown(&mut self) {
        self.simulator.stop();
    }

    /// 定时调用：推进模拟器并执行积压的副作用
    pub fn tick(&mut self) {
        self.simulator.poll(&mut self.registry);
        self.flush_effects();
    }

    pub fn flush_effects(&mut self) {
        let effects = self.registry.take_effects();
        alerts::deliver(effects, &mut self.toasts, &mut self.sirens);
    }

    pub fn pending_sirens(&self) -> usize {
        self.sirens.0
    }

    /// 播放积压的警报声
    pub fn play_sirens<A: AudioPlayer + ?Sized>(&mut self, audio: &mut A) {
        for _ in 0..std::mem::take(&mut self.sirens.0) {
            alerts::play_siren(audio);
        }
    }

    /// 当前选中的区域
    pub fn selected_zone(&self) -> Option<&SecurityZone> {
        self.registry.zones().get(self.zone_index)
    }

    /// 报警队列中选中的条目
    pub fn selected_alarm(&self) -> Option<&SecurityZone> {
        self.registry.alarm_queue().get(self.alarm_index)
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.registry.employees().get(self.employee_index)
    }

    /// 派遣候选人，按军衔从高到低，同级保持名册顺序
    pub fn dispatch_candidates(&self) -> Vec<&Employee> {
        let mut candidates: Vec<&Employee> = self.registry.employees().iter().collect();
        candidates.sort_by(|a, b| compare_rank_desc(&a.rank, &b.rank));
        candidates
    }

    /// 队列条目对应的区域已不再需要派遣（已撤防、已出警或已被删除）
    pub fn alarm_is_stale(&self, zone_id: u32) -> bool {
        !self
            .registry
            .zone(zone_id)
            .is_some_and(|z| z.status.needs_response())
    }

    pub fn suspended_contracts(&self) -> Vec<&SecurityZone> {
        self.registry.suspended_contracts().collect()
    }

    /// 确保各列表的选中索引有效
    pub fn clamp_indices(&mut self) {
        fn clamp(index: &mut usize, len: usize) {
            if len == 0 {
                *index = 0;
            } else if *index >= len {
                *index = len - 1;
            }
        }

        let contracts = self.registry.suspended_contracts().count();
        clamp(&mut self.zone_index, self.registry.zones().len());
        clamp(&mut self.alarm_index, self.registry.alarm_queue().len());
        clamp(&mut self.employee_index, self.registry.employees().len());
        clamp(&mut self.contract_index, contracts);
    }
}
