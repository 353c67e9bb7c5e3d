//! Story session state.
//!
//! Holds the system instruction and the conversation history, and counts
//! completed exchanges so the driver knows which framing to apply.

use daydream_types::llm::{CompletionRequest, Message};

use super::prompt::OPENING_QUESTION;

/// The in-memory conversation for one run of the program.
///
/// History starts with the seeded opening question and grows by one user
/// turn and one model turn per completed exchange. It is never pruned.
#[derive(Debug, Clone)]
pub struct StorySession {
    system_instruction: String,
    model: String,
    history: Vec<Message>,
    /// Completed user+model exchanges.
    turn_count: u32,
}

impl StorySession {
    /// Start a session seeded with the opening question.
    ///
    /// An empty `model` defers to the provider's default.
    pub fn new(system_instruction: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            model: model.into(),
            history: vec![Message::model(OPENING_QUESTION)],
            turn_count: 0,
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Completed exchanges so far.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Build a streaming request: system instruction, full history, then the
    /// new user message.
    pub fn build_request(&self, user_message: &str) -> CompletionRequest {
        let mut messages = self.history.clone();
        messages.push(Message::user(user_message));

        CompletionRequest {
            model: self.model.clone(),
            messages,
            system: Some(self.system_instruction.clone()),
        }
    }

    /// Append a completed exchange to the history.
    ///
    /// Call this only after the whole reply has streamed successfully.
    pub fn record_exchange(&mut self, user_message: String, reply: String) {
        self.history.push(Message::user(user_message));
        self.history.push(Message::model(reply));
        self.turn_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daydream_types::llm::MessageRole;

    #[test]
    fn test_new_session_is_seeded() {
        let session = StorySession::new("You are a dream narrator.", "gemini-1.5-pro-latest");
        assert_eq!(session.turn_count(), 0);
        assert_eq!(session.system_instruction(), "You are a dream narrator.");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].role, MessageRole::Model);
        assert_eq!(session.history()[0].content, OPENING_QUESTION);
    }

    #[test]
    fn test_build_request_appends_user_message() {
        let session = StorySession::new("narrate", "gemini-1.5-pro-latest");
        let request = session.build_request("a forest of glass trees");

        assert_eq!(request.model, "gemini-1.5-pro-latest");
        assert_eq!(request.system.as_deref(), Some("narrate"));
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0], Message::model(OPENING_QUESTION));
        assert_eq!(request.messages[1], Message::user("a forest of glass trees"));
        // Building a request does not touch the history.
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_record_exchange() {
        let mut session = StorySession::new("narrate", "");
        session.record_exchange("forest".to_string(), "The trees chime.".to_string());

        assert_eq!(session.turn_count(), 1);
        assert_eq!(session.history().len(), 3);
        assert_eq!(session.history()[1], Message::user("forest"));
        assert_eq!(session.history()[2], Message::model("The trees chime."));

        session.record_exchange("listen".to_string(), "A bell answers.".to_string());
        assert_eq!(session.turn_count(), 2);
        assert_eq!(session.history().len(), 5);
    }
}
