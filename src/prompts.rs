//! Prompt text sent to the live model.

use crate::llms::base_llm::ChatMessage;
use crate::types::ResponseType;

/// System persona shared by every request.
pub const DOBBY_PERSONA: &str = "You are Dobby, a friendly and enthusiastic helper who explains things in a very simple, fun way that 5-year-olds can understand. Always be positive, use emojis, and make learning fun!";

/// The user-turn prompt for `kind`, with `input` quoted.
pub fn user_prompt(kind: ResponseType, input: &str) -> String {
    match kind {
        ResponseType::Explain => format!(
            "Explain \"{input}\" in a very simple way that a 5-year-old would understand. Use fun examples, simple words, and make it exciting!"
        ),
        ResponseType::Joke => {
            format!("Tell a clean, funny joke about \"{input}\" that kids would love!")
        }
        ResponseType::Riddle => format!(
            "Create a fun riddle about \"{input}\" that's appropriate for children, and then give the answer!"
        ),
        ResponseType::Solve => format!(
            "Help solve this problem: \"{input}\". Explain the solution step by step in a way a 5-year-old could follow!"
        ),
    }
}

/// Persona system message followed by the user prompt.
pub fn build_messages(kind: ResponseType, input: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(DOBBY_PERSONA),
        ChatMessage::user(user_prompt(kind, input)),
    ]
}
