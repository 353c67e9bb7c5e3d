//! Line-oriented prompting on an async reader.

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::error::StoryError;
use super::typewriter::{Pacer, Typewriter};

/// Ask until the user gives a non-blank answer.
///
/// Writes `"<label> "` through the typewriter, reads one line, and returns it
/// with surrounding whitespace trimmed. Blank lines re-prompt. End of input
/// is an error: the story cannot continue without a reader.
pub async fn prompt_user<R, W, P>(
    reader: &mut R,
    typewriter: &mut Typewriter<W, P>,
    label: &str,
) -> Result<String, StoryError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    P: Pacer,
{
    let prompt = format!("{label} ");
    let mut line = String::new();
    loop {
        typewriter
            .emit_fragment(&prompt)
            .await
            .map_err(StoryError::Output)?;

        line.clear();
        let read = reader
            .read_line(&mut line)
            .await
            .map_err(StoryError::Input)?;
        if read == 0 {
            return Err(StoryError::InputClosed);
        }

        let answer = line.trim();
        if !answer.is_empty() {
            return Ok(answer.to_string());
        }
    }
}
