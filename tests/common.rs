//! Common test utilities for building conversation flows.
use convoflow::prelude::*;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[allow(dead_code)]
pub fn message(id: &str, text: &str) -> FlowNodeDefinition {
    FlowNodeDefinition {
        id: id.to_string(),
        kind: FlowNodeKind::Message {
            text: text.to_string(),
        },
    }
}

#[allow(dead_code)]
pub fn question(id: &str, text: &str, variable: Option<&str>) -> FlowNodeDefinition {
    FlowNodeDefinition {
        id: id.to_string(),
        kind: FlowNodeKind::Question {
            text: text.to_string(),
            variable: variable.map(str::to_string),
        },
    }
}

#[allow(dead_code)]
pub fn confirmation(id: &str, text: &str) -> FlowNodeDefinition {
    FlowNodeDefinition {
        id: id.to_string(),
        kind: FlowNodeKind::Confirmation {
            text: text.to_string(),
        },
    }
}

#[allow(dead_code)]
pub fn branch(id: &str, text: &str, options: &[&str]) -> FlowNodeDefinition {
    FlowNodeDefinition {
        id: id.to_string(),
        kind: FlowNodeKind::Branch {
            text: text.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
        },
    }
}

#[allow(dead_code)]
pub fn redirect(id: &str, url: Option<&str>) -> FlowNodeDefinition {
    FlowNodeDefinition {
        id: id.to_string(),
        kind: FlowNodeKind::Redirect {
            url: url.map(str::to_string),
        },
    }
}

/// A plain sequential edge.
#[allow(dead_code)]
pub fn edge(source: &str, target: &str) -> FlowEdgeDefinition {
    FlowEdgeDefinition {
        id: format!("{}->{}", source, target),
        source: source.to_string(),
        target: target.to_string(),
        handle: None,
    }
}

#[allow(dead_code)]
pub fn handled_edge(source: &str, handle: &str, target: &str) -> FlowEdgeDefinition {
    FlowEdgeDefinition {
        id: format!("{}:{}->{}", source, handle, target),
        source: source.to_string(),
        target: target.to_string(),
        handle: Some(handle.to_string()),
    }
}

#[allow(dead_code)]
pub fn graph(nodes: Vec<FlowNodeDefinition>, edges: Vec<FlowEdgeDefinition>) -> ConversationGraph {
    ConversationGraph::new(FlowDefinition { nodes, edges })
}

#[allow(dead_code)]
pub fn intro() -> BotIntro {
    BotIntro::new("Ada", "I help with orders.")
}

/// Starts a fresh interpreter on `graph` and returns it with the start effects.
#[allow(dead_code)]
pub fn started(graph: ConversationGraph) -> (FlowInterpreter, Vec<Effect>) {
    let mut interpreter = FlowInterpreter::default();
    let effects = interpreter.start(Some(graph), &intro());
    (interpreter, effects)
}

/// Only the texts of `Message` effects, in order.
#[allow(dead_code)]
pub fn messages(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Message(text) => Some(text.clone()),
            _ => None,
        })
        .collect()
}

/// `Sales` / `Support` branch used by several tests.
///
/// `menu` (branch) --option-0--> `sales`, --option-1--> `support`
#[allow(dead_code)]
pub fn create_branch_graph() -> ConversationGraph {
    graph(
        vec![
            branch("menu", "What do you need?", &["Sales", "Support"]),
            message("sales", "Connecting you to sales."),
            message("support", "Connecting you to support."),
        ],
        vec![
            handled_edge("menu", "option-0", "sales"),
            handled_edge("menu", "option-1", "support"),
        ],
    )
}

/// Yes / no confirmation.
///
/// `confirm` --yes--> `yes_node`, --no--> `no_node`
#[allow(dead_code)]
pub fn create_confirmation_graph() -> ConversationGraph {
    graph(
        vec![
            confirmation("confirm", "Shall we continue?"),
            message("yes_node", "Great!"),
            message("no_node", "Maybe later then."),
        ],
        vec![
            handled_edge("confirm", "yes", "yes_node"),
            handled_edge("confirm", "no", "no_node"),
        ],
    )
}

/// A pacer that remembers every delay it was asked for.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingPacer {
    pub delays: Arc<Mutex<Vec<Duration>>>,
}

#[allow(dead_code)]
impl RecordingPacer {
    pub fn recorded(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, delay: Duration) {
        self.delays.lock().unwrap().push(delay);
    }
}

/// Sample bot record in the backend's JSON format.
#[allow(dead_code)]
pub const ONBOARDING_BOT_JSON: &str = r#"{
    "_id": "64f1c0ffee",
    "name": "Ada",
    "description": "I help with orders.",
    "voiceEnabled": false,
    "languages": ["English"],
    "primaryPurpose": "support",
    "conversationalTone": "friendly",
    "conversationFlow": {
        "nodes": [
            { "id": "1", "type": "message", "position": { "x": 250, "y": 50 },
              "data": { "label": "Welcome", "type": "message", "message": "Welcome!" } },
            { "id": "2", "type": "question",
              "data": { "label": "Name", "type": "question", "message": "What's your name?", "variable": "userName" } },
            { "id": "3", "type": "branch",
              "data": { "label": "Topic", "type": "branch", "message": "Pick a topic", "options": ["Billing", "Shipping"] } },
            { "id": "4", "type": "redirection",
              "data": { "label": "Docs", "type": "redirection", "redirectUrl": "https://example.com/billing" } },
            { "id": "5", "type": "confirmation",
              "data": { "label": "Track", "type": "confirmation", "message": "Track your parcel?" } },
            { "id": "6", "type": "message",
              "data": { "label": "Tracking", "type": "message", "message": "Here is your tracking link." } }
        ],
        "edges": [
            { "id": "e1-2", "source": "1", "target": "2" },
            { "id": "e2-3", "source": "2", "target": "3", "sourceHandle": null },
            { "id": "e3-4", "source": "3", "target": "4", "sourceHandle": "option-0" },
            { "id": "e3-5", "source": "3", "target": "5", "sourceHandle": "option-1" },
            { "id": "e5-6", "source": "5", "target": "6", "sourceHandle": "yes" }
        ]
    }
}"#;
