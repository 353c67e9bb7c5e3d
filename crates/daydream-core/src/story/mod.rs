//! The interactive story: conversation state, prompt framing, the typewriter
//! renderer and the driver that ties them to an `LlmProvider`.
//!
//! Entry point: `driver::StoryDriver::run`.

pub mod driver;
pub mod error;
pub mod input;
pub mod prompt;
pub mod session;
pub mod typewriter;

pub use driver::StoryDriver;
pub use error::StoryError;
pub use session::StorySession;
pub use typewriter::{Pacer, TokioPacer, Typewriter};
