//! System prompts and message builders for AI interactions.
//!
//! This module provides the fixed instructions and fallback texts used by the
//! insight client, and the builders that turn a request into chat messages.

use super::chat::Message;

/// System prompt for entry analysis and questions about the journal.
pub const INSIGHTS_SYSTEM_PROMPT: &str = "You are an AI assistant that provides insights and analysis for journal entries. Your responses should be empathetic, insightful, and helpful. Provide thoughtful analysis while being supportive and encouraging.";

/// System prompt for journal prompt generation.
pub const PROMPTS_SYSTEM_PROMPT: &str = "You are a helpful assistant that generates thoughtful journal prompts to help people reflect on their experiences and emotions.";

/// Returned when the API answers without any usable text.
pub const INSIGHTS_EMPTY_FALLBACK: &str = "I'm sorry, I couldn't generate insights at this time.";

/// Returned when the insight request fails outright.
pub const INSIGHTS_ERROR_FALLBACK: &str =
    "I'm sorry, I couldn't generate insights at this time due to an error.";

/// Returned whenever prompt generation produces nothing.
pub const PROMPTS_FALLBACK: &str = "Here are some general prompts: What made you smile today? What challenged you? What are you grateful for?";

/// Builds messages for an insight request.
///
/// Prior-entry `context`, when non-empty, is sent as its own user message
/// ahead of the prompt.
pub fn insights_messages(prompt: &str, context: &str) -> Vec<Message> {
    let mut messages = vec![Message::system(INSIGHTS_SYSTEM_PROMPT)];

    if !context.is_empty() {
        messages.push(Message::user(format!(
            "Here's some context from previous entries: {}",
            context
        )));
    }

    messages.push(Message::user(prompt));
    messages
}

/// Builds the natural-language request for journal prompts.
///
/// Empty `mood` or `topic` leave their clause out.
pub fn prompt_request(mood: &str, topic: &str) -> String {
    let mut request = String::from("Generate 3-5 thoughtful journal prompts");

    if !mood.is_empty() {
        request.push_str(&format!(" for someone feeling {}", mood));
    }

    if !topic.is_empty() {
        request.push_str(&format!(" related to {}", topic));
    }

    request.push_str(". Make them introspective and encouraging.");
    request
}

/// Builds messages for a prompt generation request.
pub fn prompts_messages(mood: &str, topic: &str) -> Vec<Message> {
    vec![
        Message::system(PROMPTS_SYSTEM_PROMPT),
        Message::user(prompt_request(mood, topic)),
    ]
}

/// The instruction sent when analysing a single stored entry.
pub fn analyze_entry_prompt(content: &str) -> String {
    format!("Please analyze this journal entry: {}", content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insights_messages_without_context() {
        let messages = insights_messages("How was my week?", "");

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[0].content, INSIGHTS_SYSTEM_PROMPT);
        assert_eq!(messages[1], Message::user("How was my week?"));
    }

    #[test]
    fn test_insights_messages_with_context() {
        let messages = insights_messages("How was my week?", "Monday: rain\nTuesday: sun");

        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, "user");
        assert_eq!(
            messages[1].content,
            "Here's some context from previous entries: Monday: rain\nTuesday: sun"
        );
        assert_eq!(messages[2].content, "How was my week?");
    }

    #[test]
    fn test_prompt_request_variants() {
        assert_eq!(
            prompt_request("", ""),
            "Generate 3-5 thoughtful journal prompts. Make them introspective and encouraging."
        );
        assert_eq!(
            prompt_request("anxious", ""),
            "Generate 3-5 thoughtful journal prompts for someone feeling anxious. Make them introspective and encouraging."
        );
        assert_eq!(
            prompt_request("", "work"),
            "Generate 3-5 thoughtful journal prompts related to work. Make them introspective and encouraging."
        );
        assert_eq!(
            prompt_request("hopeful", "family"),
            "Generate 3-5 thoughtful journal prompts for someone feeling hopeful related to family. Make them introspective and encouraging."
        );
    }

    #[test]
    fn test_prompts_messages_structure() {
        let messages = prompts_messages("calm", "");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, PROMPTS_SYSTEM_PROMPT);
        assert!(messages[1].content.contains("feeling calm"));
    }
}
