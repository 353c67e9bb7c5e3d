//! Conversation driver.
//!
//! Coordinates the story loop: asks the seeded question, sends each answer
//! to the provider as a streaming request, and feeds every text fragment to
//! the typewriter as it arrives. Any failure ends the session; the caller
//! decides the exit status.

use std::io::Write;

use futures_util::StreamExt;
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, warn};

use daydream_types::llm::{LlmError, StreamEvent};

use crate::llm::instrumented::StreamInSpan;
use crate::llm::provider::LlmProvider;

use super::error::StoryError;
use super::input::prompt_user;
use super::prompt::{ACTION_LABEL, OPENING_QUESTION, UNPLUGGED_MESSAGE, frame_user_message};
use super::session::StorySession;
use super::typewriter::{Pacer, Typewriter};

/// Runs one interactive story against an `LlmProvider`.
pub struct StoryDriver<L, R, W, P> {
    provider: L,
    session: StorySession,
    input: R,
    typewriter: Typewriter<W, P>,
    cancel: CancellationToken,
}

impl<L, R, W, P> StoryDriver<L, R, W, P>
where
    L: LlmProvider,
    R: AsyncBufRead + Unpin,
    W: Write,
    P: Pacer,
{
    pub fn new(
        provider: L,
        session: StorySession,
        input: R,
        typewriter: Typewriter<W, P>,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            session,
            input,
            typewriter,
            cancel,
        }
    }

    pub fn session(&self) -> &StorySession {
        &self.session
    }

    pub fn typewriter(&self) -> &Typewriter<W, P> {
        &self.typewriter
    }

    /// Run the story until a fatal error or cancellation.
    ///
    /// Only returns with an error: the loop itself never finishes.
    pub async fn run(&mut self) -> Result<(), StoryError> {
        self.emit("\n").await?;
        let topic = self.prompt(OPENING_QUESTION).await?;
        self.run_turn(&topic).await?;

        loop {
            self.emit("\n").await?;
            let action = self.prompt(ACTION_LABEL).await?;
            self.run_turn(&action).await?;
        }
    }

    /// Ask the user for a line, giving up if the session is cancelled.
    pub async fn prompt(&mut self, label: &str) -> Result<String, StoryError> {
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(StoryError::Cancelled),
            answer = prompt_user(&mut self.input, &mut self.typewriter, label) => answer,
        }
    }

    /// Send one user answer and render the streamed reply.
    ///
    /// The first answer goes out verbatim; later ones are framed as a
    /// continuation. The exchange is added to the history only once the
    /// reply has streamed completely.
    pub async fn run_turn(&mut self, user_text: &str) -> Result<(), StoryError> {
        let message = frame_user_message(self.session.turn_count(), user_text);
        let request = self.session.build_request(&message);

        let span = info_span!(
            "gen_ai.stream",
            gen_ai.system = self.provider.name(),
            gen_ai.request.model = %self.provider.model(),
            gen_ai.request.turn = self.session.turn_count(),
            gen_ai.request.history_len = request.messages.len(),
        );
        let mut stream = StreamInSpan::new(self.provider.stream(request), span);

        self.emit("\n\n").await?;

        let mut reply = String::new();
        loop {
            let next = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Err(StoryError::Cancelled),
                next = stream.next() => next,
            };

            match next {
                None | Some(Ok(StreamEvent::Done)) => break,
                Some(Ok(StreamEvent::TextDelta { text })) => {
                    self.emit(&text).await?;
                    reply.push_str(&text);
                }
                Some(Ok(StreamEvent::Usage(usage))) => {
                    debug!(
                        input_tokens = usage.input_tokens,
                        output_tokens = usage.output_tokens,
                        "token usage"
                    );
                }
                Some(Ok(StreamEvent::MessageDelta { stop_reason })) => {
                    debug!(%stop_reason, "model finished");
                }
                Some(Ok(StreamEvent::Connected)) => {}
                Some(Err(err)) => return Err(self.unplug(err).await),
            }
        }

        self.emit("\n").await?;

        info!(
            turn = self.session.turn_count(),
            reply_len = reply.len(),
            "turn complete"
        );
        self.session.record_exchange(message, reply);
        Ok(())
    }

    /// Tell the reader the dream is over and log what went wrong.
    async fn unplug(&mut self, err: LlmError) -> StoryError {
        if let Err(io) = self.typewriter.emit_fragment(UNPLUGGED_MESSAGE).await {
            warn!(error = %io, "failed to write failure message");
        }
        log_stream_failure(&err);
        StoryError::Stream(err)
    }

    async fn emit(&mut self, text: &str) -> Result<(), StoryError> {
        self.typewriter
            .emit_fragment(text)
            .await
            .map_err(StoryError::Output)
    }
}

/// Log everything the provider told us about a failed stream.
fn log_stream_failure(err: &LlmError) {
    error!(error = %err, "error sending message");

    let Some(details) = err.api_details() else {
        return;
    };

    if let Some(reason) = details.reason() {
        error!(reason, "api error reason");
    }
    for link in details.help_links() {
        error!(url = %link.url, description = %link.description, "api error help link");
    }
    error!(
        code = details.code,
        status = details.status.as_deref().unwrap_or(""),
        message = %details.message,
        "api error status"
    );
    for detail in &details.details {
        error!(%detail, "api error detail");
    }
}
