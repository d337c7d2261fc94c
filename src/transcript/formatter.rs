use crate::interpreter::Effect;
use itertools::Itertools;

/// Formats interpreter effects into the plain text a chat surface shows.
pub struct TranscriptFormatter;

impl TranscriptFormatter {
    /// Format a single effect. Returns `None` for effects that show nothing.
    pub fn format_effect(effect: &Effect) -> Option<String> {
        match effect {
            Effect::Message(text) => Some(text.clone()),
            Effect::RequestConfirmation(text) => Some(format!("{}\n[Yes] [No]", text)),
            Effect::RequestBranch { text, options } => Some(Self::format_options(text, options)),
            Effect::OpenUrl(url) => Some(format!("(opening {})", url)),
            Effect::Completed => None,
        }
    }

    /// Format every effect that shows something, one entry per bubble.
    pub fn format_all(effects: &[Effect]) -> Vec<String> {
        effects.iter().filter_map(Self::format_effect).collect()
    }

    fn format_options(text: &str, options: &[String]) -> String {
        if options.is_empty() {
            return text.to_string();
        }
        format!("{}\n\nOptions:\n{}", text, options.iter().join("\n"))
    }
}
