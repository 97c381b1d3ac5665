use std::collections::HashMap;

use indoc::indoc;

use crate::{Message, Participant, Role};

/// Label used when a message author is missing from the roster.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// Label introducing the reply the model is expected to write.
pub const ASSISTANT_CUE: &str = "Assistant";

const IDENTITY: &str = "You are an AI assistant taking part in a group conversation.";

const RULES: &str = indoc! {
    "Rules:
    - Reply naturally, as you would in a group chat
    - Take part the way a real person would
    - Address users by name when it is relevant
    - Take the whole conversation into account
    - Never invent information that has not been given
    - Reply in the language the conversation is held in
    - Be concise"
};

/// Renders a conversation window and its roster into a single prompt.
///
/// Building is pure: the same history and roster always give the same text.
#[derive(Clone, Debug)]
pub struct PromptBuilder {
    pub history: Vec<Message>,
    pub roster: Vec<Participant>,
    pub unknown_label: String,
    pub assistant_label: String,
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            roster: Vec::new(),
            unknown_label: UNKNOWN_AUTHOR.to_string(),
            assistant_label: ASSISTANT_CUE.to_string(),
        }
    }
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(mut self, messages: impl IntoIterator<Item = Message>) -> Self {
        self.history.extend(messages);
        self
    }

    pub fn push_message(mut self, message: Message) -> Self {
        self.history.push(message);
        self
    }

    pub fn roster(mut self, participants: impl IntoIterator<Item = Participant>) -> Self {
        self.roster.extend(participants);
        self
    }

    pub fn push_participant(mut self, participant: Participant) -> Self {
        self.roster.push(participant);
        self
    }

    pub fn unknown_label(mut self, label: impl Into<String>) -> Self {
        self.unknown_label = label.into();
        self
    }

    pub fn assistant_label(mut self, label: impl Into<String>) -> Self {
        self.assistant_label = label.into();
        self
    }

    /// Comma separated display names of the human participants, in roster order.
    pub fn participant_list(&self) -> String {
        self.roster
            .iter()
            .filter(|p| p.role == Role::Human)
            .map(|p| p.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// History rendered as `name: content` lines, oldest first.
    ///
    /// Authors missing from the roster or with a blank name get the unknown label.
    pub fn transcript(&self) -> String {
        // later roster entries overwrite earlier ones with the same id
        let names: HashMap<&str, &str> = self
            .roster
            .iter()
            .map(|p| (p.id.as_str(), p.display_name.as_str()))
            .collect();
        self.history
            .iter()
            .map(|m| {
                let name = names
                    .get(m.author_id.as_str())
                    .copied()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(self.unknown_label.as_str());
                format!("{name}: {}", m.content)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn build(&self) -> String {
        let out = format!(
            "{IDENTITY}\n\nParticipants: {}\n\n{RULES}\n\nHistory:\n{}\n\n{}:",
            self.participant_list(),
            self.transcript(),
            self.assistant_label,
        );
        out.trim().to_string()
    }
}

/// Render `history` against `roster` with the default labels.
pub fn build_prompt(history: &[Message], roster: &[Participant]) -> String {
    PromptBuilder::new()
        .history(history.iter().cloned())
        .roster(roster.iter().cloned())
        .build()
}
