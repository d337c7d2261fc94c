use serde::{Deserialize, Serialize};

/// The complete, canonical definition of a conversation flow.
/// This is the target structure for any custom data model conversion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowDefinition {
    pub nodes: Vec<FlowNodeDefinition>,
    pub edges: Vec<FlowEdgeDefinition>,
}

/// A single step of the conversation script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNodeDefinition {
    pub id: String,
    pub kind: FlowNodeKind,
}

/// What a node does when the cursor reaches it. Each variant carries only
/// the fields that are meaningful for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FlowNodeKind {
    /// Shows `text` and moves on by itself.
    Message { text: String },
    /// Shows `text` and stores the next reply under `variable`, if set.
    Question {
        text: String,
        variable: Option<String>,
    },
    /// Asks a yes/no question; outgoing edges use the `yes` / `no` handles.
    Confirmation { text: String },
    /// Offers `options`; option `i` leaves through handle `option-i`.
    Branch { text: String, options: Vec<String> },
    /// Announces and opens `url`, then moves on by itself.
    Redirect { url: Option<String> },
    /// Emits nothing and follows its sequential edge.
    Passthrough,
}

impl FlowNodeKind {
    /// Short lowercase name used in logs and diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            FlowNodeKind::Message { .. } => "message",
            FlowNodeKind::Question { .. } => "question",
            FlowNodeKind::Confirmation { .. } => "confirmation",
            FlowNodeKind::Branch { .. } => "branch",
            FlowNodeKind::Redirect { .. } => "redirect",
            FlowNodeKind::Passthrough => "passthrough",
        }
    }

    /// Whether reaching this node leaves the interpreter waiting for a reply.
    pub fn awaits_input(&self) -> bool {
        matches!(
            self,
            FlowNodeKind::Question { .. }
                | FlowNodeKind::Confirmation { .. }
                | FlowNodeKind::Branch { .. }
        )
    }
}

/// A directed connection between two nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdgeDefinition {
    pub id: String,
    pub source: String,
    pub target: String,
    /// `None` or an empty string marks a plain sequential edge.
    pub handle: Option<String>,
}

impl FlowEdgeDefinition {
    /// Returns the handle if it is present and non-empty.
    pub fn handle(&self) -> Option<&str> {
        self.handle.as_deref().filter(|h| !h.is_empty())
    }

    pub fn is_handled(&self) -> bool {
        self.handle().is_some()
    }
}

/// Handle used by the edge leaving a branch node for option `index`.
pub fn option_handle(index: usize) -> String {
    format!("option-{}", index)
}
