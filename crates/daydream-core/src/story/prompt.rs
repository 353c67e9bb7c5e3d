//! Fixed story text: the seeded opening question, the continuation frame
//! wrapped around later answers, and the in-fiction failure message.

/// The model-authored turn every session starts with.
pub const OPENING_QUESTION: &str = "What do you want to dream about?";

/// Label shown when asking for the next action.
pub const ACTION_LABEL: &str = ">>";

/// Shown to the reader when the stream fails.
pub const UNPLUGGED_MESSAGE: &str =
    "\n\nYou feel a jolt of electricity as you realize you're being unplugged from the matrix.\n\n";

/// Frame a user answer for sending.
///
/// The answer to the opening question (`turn == 0`) goes out verbatim; every
/// later answer is wrapped in the continuation instruction.
pub fn frame_user_message(turn: u32, text: &str) -> String {
    if turn == 0 {
        text.to_string()
    } else {
        format!("The user wrote: {text}\n\nWrite the next short paragraph.")
    }
}
