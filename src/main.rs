use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use ratatui::prelude::*;
use tracing::info;

use guardpost::alerts::TerminalBell;
use guardpost::clock::SystemClock;
use guardpost::config::Config;
use guardpost::logging;
use guardpost::registry::Registry;
use guardpost::simulation::AlarmSimulator;
use guardpost::ui::{self, App, render};

/// 事件轮询间隔，同时决定模拟器检查的频率
const TICK: Duration = Duration::from_millis(250);

fn main() -> anyhow::Result<()> {
    let config = Config::load(&Config::default_path()?)?;
    let _log_guard = logging::init(&config.log_level, &logging::data_dir()?)?;

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let registry = Registry::with_mock_data(config.zone_count, &mut rng, Box::new(SystemClock));
    let simulator = AlarmSimulator::new(config.alarm_interval(), StdRng::seed_from_u64(rng.next_u64()));
    info!(zones = config.zone_count, seed = ?config.seed, "starting dashboard");

    // 创建应用状态（同时启动报警模拟）
    let mut app = App::new(registry, simulator, config.low_battery_threshold);

    // 设置终端
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // 主循环
    let result = run_app(&mut terminal, &mut app);

    // 停止模拟并恢复终端
    app.shutdown();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    info!("dashboard closed");
    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && ui::handle_key_event(app, key.code) {
                    break;
                }
            }
        }

        app.tick();
        // 响铃走终端后端，与画面共用同一个输出
        app.play_sirens(&mut TerminalBell::new(terminal.backend_mut()));
    }
    Ok(())
}
