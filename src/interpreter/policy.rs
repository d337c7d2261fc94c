//! Reply classification rules for nodes that branch on user input.

use regex::Regex;
use std::sync::LazyLock;

static AFFIRMATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)(yes|y|yeah|yep|sure|ok|okay)(?-u:\b)")
        .expect("affirmative pattern is valid")
});

/// The two ways a confirmation prompt can be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationAnswer {
    Yes,
    No,
}

impl ConfirmationAnswer {
    /// The edge handle that carries this answer.
    pub fn handle(self) -> &'static str {
        match self {
            ConfirmationAnswer::Yes => "yes",
            ConfirmationAnswer::No => "no",
        }
    }
}

/// Anything that does not contain an affirmative word counts as "no".
pub fn classify_confirmation(reply: &str) -> ConfirmationAnswer {
    let normalized = reply.trim().to_lowercase();
    if AFFIRMATIVE.is_match(&normalized) {
        ConfirmationAnswer::Yes
    } else {
        ConfirmationAnswer::No
    }
}

/// Index of the first option whose text appears anywhere in the reply,
/// compared case-insensitively.
pub fn match_option(options: &[String], reply: &str) -> Option<usize> {
    let normalized = reply.trim().to_lowercase();
    options
        .iter()
        .position(|option| normalized.contains(&option.to_lowercase()))
}
