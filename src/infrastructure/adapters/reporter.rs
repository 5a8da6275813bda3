//! 상태 메시지(성공/오류/경고/안내)를 stderr에 출력하는 리포터.

use std::io::{self, IsTerminal, Write};

use crossterm::execute;
use crossterm::style::{Color, ResetColor, SetForegroundColor};

use crate::application::ports::Reporter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
    Warning,
    Info,
}

impl StatusKind {
    fn marker(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::Error => "❌",
            Self::Warning => "⚠️ ",
            Self::Info => "ℹ️ ",
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Error => Color::Red,
            Self::Warning => Color::Yellow,
            Self::Info => Color::Cyan,
        }
    }
}

/// stdout은 결과 JSON 전용이므로 상태 줄은 모두 stderr로 보낸다.
pub struct ConsoleReporter {
    styled: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 색을 입힌다.
    pub fn new() -> Self {
        Self {
            styled: io::stderr().is_terminal(),
        }
    }

    pub fn success(&self, message: &str) {
        self.status(StatusKind::Success, message);
    }

    pub fn error(&self, message: &str) {
        self.status(StatusKind::Error, message);
    }

    /// 마커 없는 일반 안내 줄.
    pub fn plain(&self, message: &str) {
        eprintln!("{message}");
    }

    fn status(&self, kind: StatusKind, message: &str) {
        let mut stderr = io::stderr();
        let line = format_status(kind, message);
        if self.styled {
            let _ = execute!(stderr, SetForegroundColor(kind.color()));
            let _ = write!(stderr, "{line}");
            let _ = execute!(stderr, ResetColor);
            let _ = writeln!(stderr);
        } else {
            let _ = writeln!(stderr, "{line}");
        }
    }
}

impl Reporter for ConsoleReporter {
    fn warning(&self, message: &str) {
        self.status(StatusKind::Warning, message);
    }

    fn info(&self, message: &str) {
        self.status(StatusKind::Info, message);
    }
}

fn format_status(kind: StatusKind, message: &str) -> String {
    format!("{} {message}", kind.marker())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_prefix_messages() {
        assert_eq!(format_status(StatusKind::Success, "done"), "✅ done");
        assert_eq!(format_status(StatusKind::Error, "boom"), "❌ boom");
        assert!(format_status(StatusKind::Warning, "careful").starts_with("⚠️"));
    }
}
