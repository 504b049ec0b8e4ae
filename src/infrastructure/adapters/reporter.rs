//! 콘솔 리포터 포트 구현 어댑터.

use std::io::{self, IsTerminal};

use crate::application::ports::Reporter;

/// 진행 상황을 stderr로 출력한다. stdout은 결과 JSON 전용이다.
pub struct ConsoleReporter {
    enabled: bool,
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleReporter {
    /// stderr가 TTY일 때만 출력한다.
    pub fn new() -> Self {
        Self::with_enabled(io::stderr().is_terminal())
    }

    pub fn with_enabled(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Reporter for ConsoleReporter {
    fn section(&self, name: &str) {
        if !self.enabled {
            return;
        }
        eprintln!();
        eprintln!("==================== {} ====================", name);
    }

    fn kv(&self, key: &str, value: &str) {
        if self.enabled {
            eprintln!("{:<12}: {}", key, value);
        }
    }

    fn status(&self, scope: &str, message: &str) {
        if self.enabled {
            eprintln!("[{:<12}] {}", scope, message);
        }
    }
}
