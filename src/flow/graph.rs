use super::definition::{FlowDefinition, FlowEdgeDefinition, FlowNodeDefinition, FlowNodeKind};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use std::fmt;

/// An indexed, read-only view of a `FlowDefinition` used during execution.
///
/// Lookups follow declaration order: when an id is declared twice, the first
/// declaration wins, and outgoing edges keep the order they were declared in.
#[derive(Debug, Clone)]
pub struct ConversationGraph {
    flow: FlowDefinition,
    node_index: AHashMap<String, usize>,
    outgoing: AHashMap<String, Vec<usize>>,
    targeted: AHashSet<String>,
}

impl ConversationGraph {
    pub fn new(flow: FlowDefinition) -> Self {
        let mut node_index = AHashMap::new();
        for (i, node) in flow.nodes.iter().enumerate() {
            node_index.entry(node.id.clone()).or_insert(i);
        }

        let mut outgoing: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut targeted = AHashSet::new();
        for (i, edge) in flow.edges.iter().enumerate() {
            outgoing.entry(edge.source.clone()).or_default().push(i);
            targeted.insert(edge.target.clone());
        }

        Self {
            flow,
            node_index,
            outgoing,
            targeted,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flow.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[FlowNodeDefinition] {
        &self.flow.nodes
    }

    pub fn edges(&self) -> &[FlowEdgeDefinition] {
        &self.flow.edges
    }

    pub fn node(&self, id: &str) -> Option<&FlowNodeDefinition> {
        self.node_index.get(id).map(|&i| &self.flow.nodes[i])
    }

    /// All nodes that no edge points at, in declaration order.
    pub fn entry_candidates(&self) -> impl Iterator<Item = &FlowNodeDefinition> {
        self.flow
            .nodes
            .iter()
            .filter(|n| !self.targeted.contains(&n.id))
    }

    /// The node the conversation starts from: the first node without an
    /// incoming edge.
    pub fn entry_node(&self) -> Option<&FlowNodeDefinition> {
        self.entry_candidates().next()
    }

    /// Edges leaving `node_id`, in declaration order.
    pub fn outgoing_edges(&self, node_id: &str) -> Vec<&FlowEdgeDefinition> {
        self.outgoing
            .get(node_id)
            .map(|indices| indices.iter().map(|&i| &self.flow.edges[i]).collect())
            .unwrap_or_default()
    }

    /// The edge an auto-advancing node follows: the first sequential edge,
    /// or the first edge of any kind when every edge carries a handle.
    pub fn sequential_edge(&self, node_id: &str) -> Option<&FlowEdgeDefinition> {
        let edges = self.outgoing_edges(node_id);
        edges
            .iter()
            .find(|e| !e.is_handled())
            .or_else(|| edges.first())
            .copied()
    }

    /// Reports authoring mistakes. The interpreter degrades gracefully on all
    /// of them; this exists for logging and tooling.
    pub fn diagnostics(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        if self.is_empty() {
            return issues;
        }

        let entries: Vec<_> = self.entry_candidates().map(|n| n.id.clone()).collect();
        match entries.len() {
            0 => issues.push(GraphIssue::NoEntryNode),
            1 => {}
            _ => issues.push(GraphIssue::MultipleEntryNodes(entries)),
        }

        for id in self.flow.nodes.iter().map(|n| &n.id).duplicates() {
            issues.push(GraphIssue::DuplicateNode(id.clone()));
        }

        for edge in &self.flow.edges {
            if self.node(&edge.target).is_none() {
                issues.push(GraphIssue::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing_node_id: edge.target.clone(),
                });
            }
            if self.node(&edge.source).is_none() {
                issues.push(GraphIssue::DanglingEdge {
                    edge_id: edge.id.clone(),
                    missing_node_id: edge.source.clone(),
                });
            }
        }

        for node in &self.flow.nodes {
            match &node.kind {
                FlowNodeKind::Branch { options, .. } if options.is_empty() => {
                    issues.push(GraphIssue::BranchWithoutOptions(node.id.clone()));
                }
                FlowNodeKind::Redirect { url }
                    if url.as_deref().is_none_or(|u| u.trim().is_empty()) =>
                {
                    issues.push(GraphIssue::RedirectWithoutUrl(node.id.clone()));
                }
                _ => {}
            }

            if matches!(
                node.kind,
                FlowNodeKind::Confirmation { .. } | FlowNodeKind::Branch { .. }
            ) {
                let outgoing = self.outgoing_edges(&node.id);
                if outgoing.len() > 1 && outgoing.iter().all(|e| !e.is_handled()) {
                    issues.push(GraphIssue::AmbiguousFallback(node.id.clone()));
                }
            }
        }

        issues
    }
}

impl From<FlowDefinition> for ConversationGraph {
    fn from(flow: FlowDefinition) -> Self {
        Self::new(flow)
    }
}

/// A structural problem found by [`ConversationGraph::diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphIssue {
    NoEntryNode,
    MultipleEntryNodes(Vec<String>),
    DuplicateNode(String),
    DanglingEdge {
        edge_id: String,
        missing_node_id: String,
    },
    BranchWithoutOptions(String),
    RedirectWithoutUrl(String),
    /// A confirmation or branch node with more than one unhandled edge; only
    /// the first one can ever be taken.
    AmbiguousFallback(String),
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GraphIssue::NoEntryNode => write!(f, "no node is free of incoming edges"),
            GraphIssue::MultipleEntryNodes(ids) => write!(
                f,
                "several possible entry nodes ({}), '{}' will be used",
                ids.join(", "),
                ids[0]
            ),
            GraphIssue::DuplicateNode(id) => write!(f, "node id '{}' is declared twice", id),
            GraphIssue::DanglingEdge {
                edge_id,
                missing_node_id,
            } => write!(
                f,
                "edge '{}' references missing node '{}'",
                edge_id, missing_node_id
            ),
            GraphIssue::BranchWithoutOptions(id) => {
                write!(f, "branch node '{}' has no options", id)
            }
            GraphIssue::RedirectWithoutUrl(id) => {
                write!(f, "redirect node '{}' has no URL", id)
            }
            GraphIssue::AmbiguousFallback(id) => write!(
                f,
                "node '{}' has several unlabelled edges, only the first is reachable",
                id
            ),
        }
    }
}
