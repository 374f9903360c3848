use serde::Serialize;

/// Message roles understood by chat-completion endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Assistant,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

const SENTIMENT_SYSTEM: &str =
    "You are a sentiment analysis assistant. Label each comment as Positive, Neutral, or Negative.";

/// Fixed few-shot pairs demonstrating the labeling convention. These are
/// prompt scaffolding, not real conversation history.
const SENTIMENT_EXAMPLES: &[&str] = &[
    "Example: 'The clinic meets my expectations.' → Neutral",
    "Example: 'I appreciated how kind the nurses were.' → Positive",
    "Example: 'I waited over an hour past my appointment.' → Negative",
];

const THEME_SYSTEM: &str =
    "You summarize recurring themes in free-text feedback. Reply with a JSON array of short theme strings and nothing else.";

/// Build the per-comment sentiment classification request: system
/// instruction, the few-shot examples, then the comment wrapped in quotes.
pub fn sentiment_messages(comment: &str) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::new(Role::System, SENTIMENT_SYSTEM)];
    for example in SENTIMENT_EXAMPLES {
        messages.push(ChatMessage::new(Role::Assistant, *example));
    }
    messages.push(ChatMessage::new(Role::User, format!("Comment: \"{comment}\"")));
    messages
}

/// Build the single theme-extraction request over all comments.
pub fn theme_messages(comments: &[String], count: usize) -> Vec<ChatMessage> {
    let joined = comments.join("\n");
    vec![
        ChatMessage::new(Role::System, THEME_SYSTEM),
        ChatMessage::new(
            Role::User,
            format!(
                "Here are the comments, one per line:\n{joined}\n\nReturn the top {count} recurring themes as a JSON array of exactly {count} short strings."
            ),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentiment_message_order() {
        let messages = sentiment_messages("Great service");
        assert_eq!(messages.len(), 5);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::Assistant);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[3].role, Role::Assistant);
        assert_eq!(messages[4].role, Role::User);
    }

    #[test]
    fn test_sentiment_user_turn_quotes_comment() {
        let messages = sentiment_messages("Too slow");
        assert_eq!(messages[4].content, "Comment: \"Too slow\"");
    }

    #[test]
    fn test_sentiment_system_names_all_labels() {
        let messages = sentiment_messages("x");
        for label in ["Positive", "Neutral", "Negative"] {
            assert!(messages[0].content.contains(label));
        }
    }

    #[test]
    fn test_sentiment_few_shots_cover_all_labels() {
        let messages = sentiment_messages("x");
        let examples: String = messages[1..4].iter().map(|m| m.content.as_str()).collect();
        for label in ["Positive", "Neutral", "Negative"] {
            assert!(examples.contains(label));
        }
    }

    #[test]
    fn test_theme_messages_include_every_comment() {
        let comments = vec!["first comment".to_string(), "second comment".to_string()];
        let messages = theme_messages(&comments, 5);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.contains("first comment"));
        assert!(messages[1].content.contains("second comment"));
    }

    #[test]
    fn test_theme_messages_request_exact_count() {
        let comments = vec!["a".to_string()];
        let messages = theme_messages(&comments, 3);
        assert!(messages[1].content.contains("top 3"));
        assert!(messages[1].content.contains("exactly 3"));
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let message = ChatMessage::new(Role::System, "hi");
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "system");
        assert_eq!(json["content"], "hi");
    }
}
