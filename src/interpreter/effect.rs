use serde::{Deserialize, Serialize};

/// Something the host surface has to do as a result of an interpreter step.
///
/// Effects are returned in the order the nodes producing them were visited.
/// None of them involves network I/O.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Effect {
    /// Show a bot message.
    Message(String),
    /// Show a bot message with Yes / No buttons.
    RequestConfirmation(String),
    /// Show a bot message with one button per option.
    RequestBranch { text: String, options: Vec<String> },
    /// Open `url` in a new browsing context.
    OpenUrl(String),
    /// The flow is over; route further input to question answering.
    Completed,
}

impl Effect {
    /// The text shown to the user, if this effect carries any.
    pub fn text(&self) -> Option<&str> {
        match self {
            Effect::Message(text) | Effect::RequestConfirmation(text) => Some(text.as_str()),
            Effect::RequestBranch { text, .. } => Some(text.as_str()),
            Effect::OpenUrl(_) | Effect::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Effect::Completed)
    }
}
