//! # Platform Capabilities
//!
//! Clipboard, share sheet and transient notices. Handlers only ever hand
//! these plain text; nothing comes back.

use std::io::Write;
use std::sync::Mutex;

use log::{debug, warn};

pub trait Platform: Send + Sync {
    fn set_clipboard(&self, text: &str);
    fn share(&self, text: &str);
    fn show_toast(&self, message: &str);
}

/// Terminal stand-ins: the clipboard is kept in memory and echoed, shared
/// text goes to stdout and toasts go to stderr.
#[derive(Default)]
pub struct TerminalPlatform {
    clipboard: Mutex<Option<String>>,
}

impl TerminalPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently copied text.
    pub fn clipboard(&self) -> Option<String> {
        match self.clipboard.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Platform for TerminalPlatform {
    fn set_clipboard(&self, text: &str) {
        debug!("Clipboard set ({} bytes)", text.len());
        match self.clipboard.lock() {
            Ok(mut guard) => *guard = Some(text.to_string()),
            Err(poisoned) => *poisoned.into_inner() = Some(text.to_string()),
        }
        println!("--- copied ---\n{text}\n--------------");
    }

    fn share(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if let Err(e) = writeln!(stdout, "--- shared ---\n{text}\n--------------") {
            warn!("Failed to write shared text: {}", e);
        }
    }

    fn show_toast(&self, message: &str) {
        eprintln!("[{message}]");
    }
}
