//! Onboarding — the first-run introduction carousel.
//!
//! The sequencer only tracks position. When it reports completion the shell
//! moves the app into the main phase and drops the sequencer.

pub mod sequencer;

pub use sequencer::{OnboardingSequencer, Progress};
