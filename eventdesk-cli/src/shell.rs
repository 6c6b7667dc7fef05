//! Terminal implementation of the view-model shell.

use std::sync::{Mutex, PoisonError};

use dialoguer::Confirm;
use eventdesk_core::shell::{NoticeKind, Shell};
use owo_colors::OwoColorize;
use tracing::debug;

pub struct TerminalShell {
    assume_yes: bool,
    /// Last route a view-model asked for. Followed once the command is done.
    route: Mutex<Option<String>>,
}

impl TerminalShell {
    pub fn new(assume_yes: bool) -> Self {
        TerminalShell {
            assume_yes,
            route: Mutex::new(None),
        }
    }

    pub fn take_route(&self) -> Option<String> {
        self.route
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

impl Shell for TerminalShell {
    fn go_to(&self, path: &str) {
        debug!(path, "navigate");
        *self.route.lock().unwrap_or_else(PoisonError::into_inner) = Some(path.to_string());
    }

    fn notify(&self, kind: NoticeKind, message: &str) {
        match kind {
            NoticeKind::Success => println!("{}", format!("  {message}").green()),
            NoticeKind::Error => eprintln!("{}", format!("  {message}").red()),
        }
    }

    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let prompt = message.to_string();
        tokio::task::spawn_blocking(move || {
            Confirm::new()
                .with_prompt(prompt)
                .default(false)
                .interact()
                .unwrap_or(false)
        })
        .await
        .unwrap_or(false)
    }
}
