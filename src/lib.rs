//! # convoflow - Conversation Flow Interpreter
//!
//! **convoflow** runs the node-based conversation scripts that bot builders
//! draw in a visual flow editor. A script is a directed graph of message,
//! question, confirmation, branch and redirect nodes; the interpreter walks
//! it one chat session at a time, collects the user's answers into variables
//! and reports, step by step, what the chat surface has to show.
//!
//! ## Core Workflow
//!
//! 1.  **Load Your Data**: Parse the bot record (or just its flow) from JSON.
//!     The editor's save format is available as [`ui::UiFlow`].
//! 2.  **Convert to the canonical model**: Anything implementing
//!     [`flow::IntoFlow`] can become a [`flow::FlowDefinition`], which is then
//!     indexed into a [`flow::ConversationGraph`].
//! 3.  **Run**: Call [`FlowInterpreter::start`](interpreter::FlowInterpreter::start),
//!     render the returned [`Effect`](interpreter::Effect)s, and pass each
//!     user reply to [`submit_reply`](interpreter::FlowInterpreter::submit_reply)
//!     for as long as the interpreter is awaiting input.
//! 4.  **Fall back**: Once the flow is completed, route further input to
//!     question answering. [`session::ChatSession`] does this routing for you.
//!
//! ## Quick Start
//!
//! ```rust
//! use convoflow::prelude::*;
//!
//! let flow = FlowDefinition {
//!     nodes: vec![
//!         FlowNodeDefinition {
//!             id: "ask".to_string(),
//!             kind: FlowNodeKind::Question {
//!                 text: "What's your name?".to_string(),
//!                 variable: Some("userName".to_string()),
//!             },
//!         },
//!         FlowNodeDefinition {
//!             id: "bye".to_string(),
//!             kind: FlowNodeKind::Message { text: "Nice to meet you!".to_string() },
//!         },
//!     ],
//!     edges: vec![FlowEdgeDefinition {
//!         id: "e1".to_string(),
//!         source: "ask".to_string(),
//!         target: "bye".to_string(),
//!         handle: None,
//!     }],
//! };
//!
//! let mut interpreter = FlowInterpreter::default();
//! let intro = BotIntro::new("Ada", "I answer questions about our shop.");
//!
//! let effects = interpreter.start(Some(ConversationGraph::new(flow)), &intro);
//! assert_eq!(effects, vec![Effect::Message("What's your name?".to_string())]);
//! assert!(interpreter.is_awaiting_input());
//!
//! let effects = interpreter.submit_reply("Alice");
//! assert_eq!(effects[0], Effect::Message("Nice to meet you!".to_string()));
//! assert!(interpreter.is_completed());
//! assert_eq!(interpreter.variables().get("userName").map(String::as_str), Some("Alice"));
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod flow;
pub mod interpreter;
pub mod pacing;
pub mod prelude;
pub mod session;
pub mod transcript;
pub mod ui;
