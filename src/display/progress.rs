//! Progress display for network-bound operations

use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

const SPINNER_UPDATE_INTERVAL_MS: u64 = 100;
const CLEAR_LINE_WIDTH: usize = 100;
const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner drawn on stdout while a request is in flight.
/// Stays silent when stdout is not a terminal.
pub struct ProgressSpinner {
    message: String,
    running: Arc<AtomicBool>,
    handle: Option<thread::JoinHandle<()>>,
}

impl ProgressSpinner {
    pub fn new(message: String) -> Self {
        Self {
            message,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Relaxed)
    }

    pub fn start(&mut self) {
        if self.handle.is_some() || !io::stdout().is_terminal() {
            return;
        }

        self.running.store(true, Ordering::Relaxed);
        let running = Arc::clone(&self.running);
        let message = self.message.clone();

        let handle = thread::spawn(move || {
            let mut index = 0;

            while running.load(Ordering::Relaxed) {
                print!("\r  {} {}", SPINNER_CHARS[index], message);
                let _ = io::stdout().flush();

                index = (index + 1) % SPINNER_CHARS.len();
                thread::sleep(Duration::from_millis(SPINNER_UPDATE_INTERVAL_MS));
            }

            print!("\r{:<width$}\r", "", width = CLEAR_LINE_WIDTH);
            let _ = io::stdout().flush();
        });

        self.handle = Some(handle);
    }

    /// Stop spinning, optionally printing a completion line
    pub fn stop(&mut self, completion_message: Option<&str>) {
        self.running.store(false, Ordering::Relaxed);

        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }

        if let Some(msg) = completion_message {
            // Leading space keeps emoji from being clipped
            println!(" {}", msg);
        }
    }
}

impl Drop for ProgressSpinner {
    fn drop(&mut self) {
        self.stop(None);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationStatus {
    InProgress,
    Success,
    Warning,
    Error,
}

pub fn status_line(operation: &str, status: OperationStatus) -> String {
    let (symbol, label) = match status {
        OperationStatus::InProgress => ("⏳", "In progress"),
        OperationStatus::Success => ("✅", "Completed"),
        OperationStatus::Warning => ("⚠️", "Warning"),
        OperationStatus::Error => ("❌", "Error"),
    };
    format!(" {} {}: {}", symbol, label, operation)
}

pub fn display_status(operation: &str, status: OperationStatus) {
    println!("{}", status_line(operation, status));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_line() {
        assert_eq!(
            status_line("Fetching tables", OperationStatus::InProgress),
            " ⏳ In progress: Fetching tables"
        );
        assert_eq!(
            status_line("Export", OperationStatus::Success),
            " ✅ Completed: Export"
        );
    }

    #[test]
    fn test_spinner_stop_without_start() {
        let mut spinner = ProgressSpinner::new("Connecting".to_string());
        assert!(!spinner.is_running());
        spinner.stop(None);
        assert!(!spinner.is_running());
    }
}
