//! Bounded step counter over the intro slides.

use std::num::NonZeroUsize;

use serde::Serialize;

/// Outcome of a sequencer action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "step")]
pub enum Progress {
    /// Moved to the given step; still onboarding.
    Advanced(usize),
    /// Onboarding is done. Reported exactly once per sequencer.
    Completed,
    /// The sequencer already completed; the action was ignored.
    Finished,
}

/// Walks `0..len` one step at a time, or bails out early on skip.
///
/// `step` stays within `0..len` for the whole lifetime of the sequencer.
#[derive(Debug, Clone)]
pub struct OnboardingSequencer {
    step: usize,
    len: NonZeroUsize,
    completed: bool,
}

impl OnboardingSequencer {
    pub fn new(len: NonZeroUsize) -> Self {
        Self {
            step: 0,
            len,
            completed: false,
        }
    }

    /// Current step index.
    pub fn step(&self) -> usize {
        self.step
    }

    /// Total number of steps, fixed at construction.
    pub fn len(&self) -> usize {
        self.len.get()
    }

    /// Whether the current step is the final one.
    pub fn is_last(&self) -> bool {
        self.step + 1 == self.len.get()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// "Continue": next step, or completion on the last one.
    pub fn next(&mut self) -> Progress {
        if self.completed {
            return Progress::Finished;
        }
        if self.is_last() {
            self.completed = true;
            tracing::debug!(steps = self.len(), "Onboarding completed");
            return Progress::Completed;
        }
        self.step += 1;
        tracing::debug!(step = self.step, "Onboarding advanced");
        Progress::Advanced(self.step)
    }

    /// "I already have an account": complete regardless of position.
    pub fn skip(&mut self) -> Progress {
        if self.completed {
            return Progress::Finished;
        }
        self.completed = true;
        tracing::debug!(step = self.step, "Onboarding skipped");
        Progress::Completed
    }
}
