//! Interactive story session for the terminal.
//!
//! Wires the Gemini provider, stdin and a paced stdout writer into a
//! `StoryDriver`. Entry point: `loop_runner::run_story`.

pub mod loop_runner;

pub use loop_runner::run_story;
