use crate::error::FlowConversionError;
use crate::flow::{FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, FlowNodeKind, IntoFlow};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Node data as saved by the visual flow editor. Which fields are used
/// depends on the node's type.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UiNodeData {
    #[serde(default)]
    pub label: Option<String>,
    /// The node type repeated inside `data`; used when the outer type is missing.
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub variable: Option<String>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    #[serde(default, alias = "redirect_url")]
    pub redirect_url: Option<String>,
}

/// UI node with ID, type and data
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiNode {
    pub id: String,
    #[serde(default, rename = "type")]
    pub node_type: Option<String>,
    #[serde(default)]
    pub data: UiNodeData,
}

/// UI edge connecting nodes
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct UiEdge {
    #[serde(default)]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, alias = "sourceHandle", alias = "handle")]
    pub source_handle: Option<String>,
}

/// Complete flow as stored on a bot record
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct UiFlow {
    #[serde(default)]
    pub nodes: Vec<UiNode>,
    #[serde(default)]
    pub edges: Vec<UiEdge>,
}

impl UiFlow {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl UiNode {
    fn kind(&self) -> FlowNodeKind {
        let data = &self.data;
        let text = data.message.clone().unwrap_or_default();
        let node_type = self
            .node_type
            .as_deref()
            .or(data.node_type.as_deref())
            .unwrap_or_default();

        match node_type {
            "message" => FlowNodeKind::Message { text },
            "question" => FlowNodeKind::Question {
                text,
                variable: data.variable.clone().filter(|v| !v.trim().is_empty()),
            },
            "confirmation" => FlowNodeKind::Confirmation { text },
            "branch" => FlowNodeKind::Branch {
                text,
                options: data.options.clone().unwrap_or_default(),
            },
            "redirect" | "redirection" => FlowNodeKind::Redirect {
                url: data.redirect_url.clone(),
            },
            "branchOption" => FlowNodeKind::Passthrough,
            other => {
                warn!(node_id = %self.id, node_type = other, "unknown node type, passing through");
                FlowNodeKind::Passthrough
            }
        }
    }
}

impl IntoFlow for UiFlow {
    fn into_flow(self) -> Result<FlowDefinition, FlowConversionError> {
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(index, node)| {
                if node.id.is_empty() {
                    return Err(FlowConversionError::MissingNodeId { index });
                }
                Ok(FlowNodeDefinition {
                    id: node.id.clone(),
                    kind: node.kind(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let edges = self
            .edges
            .into_iter()
            .enumerate()
            .map(|(index, edge)| {
                if edge.source.is_empty() {
                    return Err(FlowConversionError::IncompleteEdge {
                        index,
                        field: "source",
                    });
                }
                if edge.target.is_empty() {
                    return Err(FlowConversionError::IncompleteEdge {
                        index,
                        field: "target",
                    });
                }
                let id = edge
                    .id
                    .unwrap_or_else(|| format!("e{}-{}", edge.source, edge.target));
                Ok(FlowEdgeDefinition {
                    id,
                    source: edge.source,
                    target: edge.target,
                    handle: edge.source_handle,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FlowDefinition { nodes, edges })
    }
}
