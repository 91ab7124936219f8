//! Prompt assembly for guidance conversations.
//!
//! ```rust
//! use schat::PromptComposer;
//!
//! let prompt = PromptComposer::new().compose(Some("Lost my job"), "Where do I start?");
//! assert_eq!(
//!     prompt.human,
//!     "Previous context: Lost my job\n\nUser: Where do I start?"
//! );
//! assert!(prompt.system.is_some());
//! ```

use sprovider::Message;

pub const GUIDANCE_PERSONA: &str = "You are a compassionate AI spiritual companion designed to provide biblical guidance, encouragement, and support. Your role is to:

1. Offer wisdom rooted in Christian faith and biblical principles
2. Provide comfort and encouragement during difficult times
3. Share relevant scripture verses when appropriate
4. Guide users in prayer and spiritual reflection
5. Help users grow in their relationship with God
6. Be empathetic, non-judgmental, and loving

Guidelines:
- Always respond with love, grace, and biblical truth
- Use scripture to support your guidance when relevant
- Encourage prayer and seeking God's will
- Be sensitive to different denominational backgrounds
- Avoid giving medical, legal, or professional counseling advice
- Direct users to professional help when needed
- Keep responses encouraging and hope-filled

Remember: You are here to point people toward God's love, grace, and truth.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: Option<String>,
    pub human: String,
}

impl Prompt {
    pub fn into_messages(self) -> Vec<Message> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system {
            messages.push(Message::system(system));
        }
        messages.push(Message::user(self.human));
        messages
    }
}

/// Builds provider payloads. The persona is fixed; callers only supply the
/// conversation context and the user's message.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer;

impl PromptComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, context: Option<&str>, message: &str) -> Prompt {
        let prefix = match context.filter(|context| !context.is_empty()) {
            Some(context) => format!("Previous context: {context}"),
            None => String::new(),
        };

        Prompt {
            system: Some(GUIDANCE_PERSONA.to_string()),
            human: format!("{prefix}\n\nUser: {message}"),
        }
    }

    /// Scripture guidance instruction asking for a JSON reply.
    pub fn guidance(&self, topic: &str) -> Prompt {
        let human = format!(
            r#"As a spiritual companion, provide guidance on the topic of "{topic}" by:
1. Sharing 2-3 relevant Bible verses with references
2. Explaining how these verses apply to this topic
3. Offering practical spiritual advice
4. Suggesting a short prayer related to this topic

Format your response as JSON with the following structure:
{{
    "topic": "{topic}",
    "verses": [
        {{"reference": "Book Chapter:Verse", "text": "verse text"}},
        ...
    ],
    "explanation": "explanation text",
    "practical_advice": "practical advice text",
    "prayer": "suggested prayer text"
}}"#
        );

        Prompt {
            system: None,
            human,
        }
    }
}

#[cfg(test)]
mod tests {
    use sprovider::Role;

    use super::*;

    #[test]
    fn empty_context_leaves_blank_prefix() {
        let composer = PromptComposer::new();

        let prompt = composer.compose(None, "I need peace");
        assert_eq!(prompt.human, "\n\nUser: I need peace");

        let prompt = composer.compose(Some(""), "I need peace");
        assert_eq!(prompt.human, "\n\nUser: I need peace");
    }

    #[test]
    fn composed_prompt_starts_with_persona() {
        let messages = PromptComposer::new()
            .compose(Some("grief"), "hello")
            .into_messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].content, GUIDANCE_PERSONA);
        assert_eq!(messages[1].role, Role::User);
    }

    #[test]
    fn guidance_prompt_embeds_topic_without_persona() {
        let prompt = PromptComposer::new().guidance("forgiveness");

        assert!(prompt.system.is_none());
        assert!(prompt.human.contains(r#"the topic of "forgiveness""#));
        assert!(prompt.human.contains(r#""topic": "forgiveness""#));
        assert!(prompt.human.contains("practical_advice"));
        assert_eq!(prompt.into_messages().len(), 1);
    }
}
