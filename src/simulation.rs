//! 随机报警模拟
//!
//! 固定周期随机挑一个区域，若处于布防状态则触发报警。
//! start/stop 对应界面的挂载与卸载，时间和随机数都由外部注入。

use chrono::{DateTime, Duration, Local};
use rand::Rng;
use tracing::{debug, warn};

use crate::registry::Registry;

pub const DEFAULT_PERIOD_SECS: u64 = 300;

pub struct AlarmSimulator<R> {
    period: Duration,
    next_due: Option<DateTime<Local>>,
    rng: R,
}

impl<R: Rng> AlarmSimulator<R> {
    pub fn new(period: Duration, rng: R) -> Self {
        Self {
            period,
            next_due: None,
            rng,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    pub fn next_due(&self) -> Option<DateTime<Local>> {
        self.next_due
    }

    /// 开始计时，第一次触发在一个周期之后。到期时间超出可表示范围时不启动
    pub fn start(&mut self, now: DateTime<Local>) {
        self.next_due = now.checked_add_signed(self.period);
        if self.next_due.is_some() {
            debug!(period_secs = self.period.num_seconds(), "alarm simulator started");
        } else {
            warn!(period_secs = self.period.num_seconds(), "alarm period out of range, simulator not started");
        }
    }

    pub fn stop(&mut self) {
        if self.next_due.take().is_some() {
            debug!("alarm simulator stopped");
        }
    }

    /// 到期则执行一次模拟，返回被触发报警的区域 ID。
    /// 错过的多个周期只补一次，下次触发从本次时间起算。
    pub fn poll(&mut self, registry: &mut Registry) -> Option<u32> {
        let now = registry.now();
        let due = self.next_due?;
        if now < due {
            return None;
        }

        self.next_due = now.checked_add_signed(self.period);
        if registry.zones().is_empty() {
            return None;
        }

        let index = self.rng.gen_range(0..registry.zones().len());
        let triggered = registry.trigger_alarm_at(index);
        debug!(index, ?triggered, "alarm simulation tick");
        triggered
    }
}
