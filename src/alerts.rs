//! 通知与警报声
//!
//! 注册表只记录 Effect，由界面层取出后交给 Notifier / AudioPlayer 执行

use std::io::{self, Write};

use thiserror::Error;
use tracing::warn;

/// 通知级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// 一条提示通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }
}

/// 注册表操作产生的副作用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    Siren,
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(#[from] io::Error),
}

pub trait AudioPlayer {
    fn play(&mut self) -> Result<(), AudioError>;
}

/// 终端响铃
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioPlayer for TerminalBell<W> {
    fn play(&mut self) -> Result<(), AudioError> {
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

/// 播放一次警报声，失败只记日志
pub fn play_siren<A: AudioPlayer + ?Sized>(audio: &mut A) {
    if let Err(e) = audio.play() {
        warn!(error = %e, "failed to play alarm sound");
    }
}

/// 执行一批副作用
pub fn deliver<N, A>(effects: Vec<Effect>, notifier: &mut N, audio: &mut A)
where
    N: Notifier + ?Sized,
    A: AudioPlayer + ?Sized,
{
    for effect in effects {
        match effect {
            Effect::Notify(notification) => notifier.notify(notification),
            Effect::Siren => play_siren(audio),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<Notification>);

    impl Notifier for Recorder {
        fn notify(&mut self, notification: Notification) {
            self.0.push(notification);
        }
    }

    struct BrokenSpeaker {
        attempts: usize,
    }

    impl AudioPlayer for BrokenSpeaker {
        fn play(&mut self) -> Result<(), AudioError> {
            self.attempts += 1;
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "blocked").into())
        }
    }

    #[test]
    fn test_audio_failure_is_swallowed() {
        let mut notifier = Recorder::default();
        let mut audio = BrokenSpeaker { attempts: 0 };

        deliver(
            vec![
                Effect::Siren,
                Effect::Notify(Notification::destructive("a", "b")),
            ],
            &mut notifier,
            &mut audio,
        );

        assert_eq!(audio.attempts, 1);
        assert_eq!(notifier.0.len(), 1);
        assert_eq!(notifier.0[0].severity, Severity::Destructive);
    }

    #[test]
    fn test_terminal_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play().unwrap();
        assert_eq!(bell.out, b"\x07");
    }
}
