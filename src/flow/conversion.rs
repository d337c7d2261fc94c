use super::definition::FlowDefinition;
use crate::error::FlowConversionError;

/// A trait for custom data models that can be converted into a `FlowDefinition`.
///
/// This is the extension point that keeps the interpreter independent of any
/// particular editor's save format. Implement it on your own structs to feed
/// them to [`ConversationGraph::new`](crate::flow::ConversationGraph::new).
///
/// # Example
///
/// ```rust,no_run
/// use convoflow::error::FlowConversionError;
/// use convoflow::flow::{FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, FlowNodeKind, IntoFlow};
///
/// struct Step { id: String, say: String }
/// struct Script { steps: Vec<Step> }
///
/// impl IntoFlow for Script {
///     fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
///         let edges = self
///             .steps
///             .windows(2)
///             .map(|pair| FlowEdgeDefinition {
///                 id: format!("{}-{}", pair[0].id, pair[1].id),
///                 source: pair[0].id.clone(),
///                 target: pair[1].id.clone(),
///                 handle: None,
///             })
///             .collect();
///         let nodes = self
///             .steps
///             .into_iter()
///             .map(|s| FlowNodeDefinition { id: s.id, kind: FlowNodeKind::Message { text: s.say } })
///             .collect();
///         Ok(FlowDefinition { nodes, edges })
///     }
/// }
/// ```
pub trait IntoFlow {
    /// Consumes the object and converts it into a conversation flow.
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError>;
}

impl IntoFlow for FlowDefinition {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        Ok(self)
    }
}
