use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::error::CleanupResult;

pub trait Confirm {
    fn confirm(&mut self, summary: &str) -> CleanupResult<bool>;
}

/// Only a literal `yes` (trimmed, any case) counts as consent.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("yes")
}

pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl PromptConfirm<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, summary: &str) -> CleanupResult<bool> {
        write!(self.output, "{} (yes/no): ", summary)?;
        self.output.flush()?;

        let mut answer = String::new();
        // EOF reads as an empty answer
        self.input.read_line(&mut answer)?;

        Ok(is_affirmative(&answer))
    }
}

/// Non-interactive consent, for scheduled runs.
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, summary: &str) -> CleanupResult<bool> {
        tracing::warn!(summary, "confirmation skipped, proceeding");
        Ok(true)
    }
}
