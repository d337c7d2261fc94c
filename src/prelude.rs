//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the
//! convoflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use convoflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let bot = BotRecord::from_file("path/to/bot.json")?;
//! let (mut session, greeting) =
//!     ChatSession::open(bot, OfflineAnswerer, &InterpreterConfig::default());
//! for line in TranscriptFormatter::format_all(&greeting) {
//!     println!("{}", line);
//! }
//! let _ = session.send("Alice");
//! # Ok(())
//! # }
//! ```

// Interpreter
pub use crate::interpreter::{BotIntro, Effect, FlowInterpreter, InterpreterState};

// Flow model
pub use crate::flow::{
    ConversationGraph, FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, FlowNodeKind,
    GraphIssue, IntoFlow,
};

// Host side
pub use crate::config::InterpreterConfig;
pub use crate::data::BotRecord;
pub use crate::pacing::{Pacer, Pacing, PacingChoice};
pub use crate::session::{Answerer, AskRequest, AskResponse, ChatSession, OfflineAnswerer};
pub use crate::ui::UiFlow;

// Error types
pub use crate::error::{AnswerError, FlowConversionError, FlowLoadError};

// Transcript formatting
pub use crate::transcript::TranscriptFormatter;

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
