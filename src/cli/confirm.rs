//! Interactive confirmation

use crate::application::Confirm;
use tracing::debug;

/// Asks on the terminal; anything but an explicit yes (including a missing
/// terminal) counts as no.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, question: &str) -> bool {
        dialoguer::Confirm::new()
            .with_prompt(question)
            .default(false)
            .interact()
            .unwrap_or_else(|e| {
                debug!(error = %e, "confirmation unavailable");
                false
            })
    }
}
