//! Interactive confirmation on the terminal.

use crate::screens::Confirm;
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Asks on stderr and reads the answer from stdin; `--yes` skips the question.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdinConfirm {
    pub assume_yes: bool,
}

impl StdinConfirm {
    #[must_use]
    pub const fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        let mut stderr = io::stderr();
        if let Err(e) = write!(stderr, "{prompt} [y/N] ").and_then(|()| stderr.flush()) {
            warn!("Could not show confirmation prompt: {e}");
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Could not read confirmation: {e}");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "ya" | "yes"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answers() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" Ya "));
        assert!(is_yes("YES"));
        assert!(!is_yes(""));
        assert!(!is_yes("n"));
        assert!(!is_yes("tidak"));
    }

    #[test]
    fn test_assume_yes_skips_prompt() {
        assert!(StdinConfirm::new(true).confirm("Hapus?"));
    }
}
