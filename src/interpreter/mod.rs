use crate::config::InterpreterConfig;
use crate::flow::{ConversationGraph, FlowEdgeDefinition, FlowNodeKind, option_handle};
use crate::pacing::{Pacer, Pacing};
use ahash::{AHashMap, AHashSet};
use tracing::{debug, info, warn};

mod effect;
pub mod policy;

pub use effect::Effect;
use policy::{classify_confirmation, match_option};

/// Closing line when an auto-advancing node runs out of edges.
pub const FLOW_END_MESSAGE: &str = "Now feel free to ask me any questions!";
/// Closing line when a reply leads nowhere.
pub const REPLY_END_MESSAGE: &str = "Thank you! Now feel free to ask me any questions.";
/// Prompt used for a branch node that has no text of its own.
pub const BRANCH_FALLBACK_PROMPT: &str = "Please choose one of the following options:";
/// Prompt repeated when a reply matches none of a branch node's options.
pub const BRANCH_REPROMPT: &str = "Please choose one of the provided options:";

/// Who the bot is, for the greeting shown when there is no flow to run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BotIntro {
    pub name: String,
    pub description: String,
}

impl BotIntro {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn greeting(&self) -> String {
        format!(
            "Hello! I'm {}. {} How can I help you today?",
            self.name, self.description
        )
    }
}

/// Per-session execution state. Never shared between sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterpreterState {
    /// The node that was entered last.
    pub current_node_id: Option<String>,
    /// True while a question, confirmation or branch prompt is unanswered.
    pub awaiting_input: bool,
    /// True once the flow has nothing left to run.
    pub completed: bool,
    /// Replies collected by question nodes, keyed by variable name.
    pub variables: AHashMap<String, String>,
}

/// Walks a `ConversationGraph`, one chat session at a time.
///
/// `start` and `submit_reply` run every automatic continuation before they
/// return, so afterwards the interpreter is either awaiting input or
/// completed. Malformed graphs never produce errors: every failed lookup
/// ends the flow instead.
pub struct FlowInterpreter {
    graph: Option<ConversationGraph>,
    state: InterpreterState,
    pacing: Pacing,
    pacer: Box<dyn Pacer>,
}

impl Default for FlowInterpreter {
    fn default() -> Self {
        Self::new(&InterpreterConfig::default())
    }
}

impl FlowInterpreter {
    pub fn new(config: &InterpreterConfig) -> Self {
        Self {
            graph: None,
            state: InterpreterState::default(),
            pacing: config.pacing,
            pacer: config.pacing_mode.into_pacer(),
        }
    }

    /// Replaces the pacer chosen by the config.
    pub fn with_pacer(mut self, pacer: Box<dyn Pacer>) -> Self {
        self.pacer = pacer;
        self
    }

    pub fn is_awaiting_input(&self) -> bool {
        self.state.awaiting_input
    }

    pub fn is_completed(&self) -> bool {
        self.state.completed
    }

    pub fn variables(&self) -> &AHashMap<String, String> {
        &self.state.variables
    }

    pub fn current_node_id(&self) -> Option<&str> {
        self.state.current_node_id.as_deref()
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    pub fn graph(&self) -> Option<&ConversationGraph> {
        self.graph.as_ref()
    }

    /// Begins a session. Any previous session state is discarded.
    ///
    /// Without a graph, or without a node free of incoming edges, the flow is
    /// completed immediately and the only effect is the bot's greeting.
    pub fn start(&mut self, graph: Option<ConversationGraph>, intro: &BotIntro) -> Vec<Effect> {
        self.state = InterpreterState::default();
        self.graph = graph.filter(|g| !g.is_empty());

        let mut effects = Vec::new();
        let entry = self.graph.as_ref().and_then(|graph| {
            for issue in graph.diagnostics() {
                warn!(%issue, "conversation flow issue");
            }
            graph.entry_node().map(|n| n.id.clone())
        });

        match entry {
            Some(entry_id) => {
                debug!(node_id = %entry_id, "starting conversation flow");
                self.advance(entry_id, &mut effects);
            }
            None => {
                debug!("no conversation flow to run, greeting instead");
                self.state.completed = true;
                effects.push(Effect::Message(intro.greeting()));
            }
        }
        effects
    }

    /// Feeds the user's reply to the node awaiting it.
    ///
    /// Does nothing unless the interpreter is awaiting input; in particular
    /// a completed flow is never touched again.
    pub fn submit_reply(&mut self, reply: &str) -> Vec<Effect> {
        self.respond(reply, None)
    }

    /// Picks an option of the branch prompt by position, as a button would.
    ///
    /// The `option-<index>` edge is followed directly, so overlapping option
    /// texts cannot send the user down another option's path. Without such an
    /// edge the option text goes through the usual reply matching. Out of
    /// range indices and non-branch prompts are ignored.
    pub fn choose_option(&mut self, index: usize) -> Vec<Effect> {
        if self.state.completed || !self.state.awaiting_input {
            return Vec::new();
        }
        let option = self
            .state
            .current_node_id
            .as_deref()
            .and_then(|id| self.graph.as_ref().and_then(|g| g.node(id)))
            .and_then(|node| match &node.kind {
                FlowNodeKind::Branch { options, .. } => options.get(index).cloned(),
                _ => None,
            });
        match option {
            Some(option) => self.respond(&option, Some(index)),
            None => {
                debug!(index, "no such option on the current prompt");
                Vec::new()
            }
        }
    }

    fn respond(&mut self, reply: &str, chosen: Option<usize>) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.state.completed || !self.state.awaiting_input {
            debug!(
                completed = self.state.completed,
                "ignoring reply, no prompt is outstanding"
            );
            return effects;
        }

        let current = self.state.current_node_id.clone().and_then(|id| {
            self.graph
                .as_ref()
                .and_then(|g| g.node(&id))
                .map(|n| (n.id.clone(), n.kind.clone()))
        });
        let Some((node_id, kind)) = current else {
            warn!("awaiting input without a current node");
            self.complete(Some(REPLY_END_MESSAGE), &mut effects);
            return effects;
        };

        if let FlowNodeKind::Question {
            variable: Some(variable),
            ..
        } = &kind
        {
            if !variable.is_empty() {
                debug!(%variable, "storing reply");
                self.state
                    .variables
                    .insert(variable.clone(), reply.to_string());
            }
        }

        let candidates: Vec<FlowEdgeDefinition> = self
            .graph
            .as_ref()
            .map(|g| g.outgoing_edges(&node_id).into_iter().cloned().collect())
            .unwrap_or_default();
        let handled: Vec<&FlowEdgeDefinition> =
            candidates.iter().filter(|e| e.is_handled()).collect();

        let next_edge = match &kind {
            FlowNodeKind::Confirmation { .. } => {
                let answer = classify_confirmation(reply);
                debug!(node_id = %node_id, answer = answer.handle(), "confirmation answered");
                if handled.is_empty() {
                    candidates.first()
                } else {
                    match handled
                        .iter()
                        .find(|e| e.handle() == Some(answer.handle()))
                    {
                        Some(edge) => Some(*edge),
                        None => {
                            debug!(node_id = %node_id, "no edge for this answer, ending flow");
                            self.complete(Some(REPLY_END_MESSAGE), &mut effects);
                            return effects;
                        }
                    }
                }
            }
            FlowNodeKind::Branch { options, .. } => {
                let edge_for = |index: usize| {
                    let handle = option_handle(index);
                    candidates
                        .iter()
                        .find(|e| e.handle() == Some(handle.as_str()))
                };
                let selected = chosen
                    .and_then(edge_for)
                    .or_else(|| match_option(options, reply).and_then(edge_for));
                match selected {
                    Some(edge) => Some(edge),
                    None if options.is_empty() && !handled.is_empty() => {
                        warn!(node_id = %node_id, "branch has no options to choose from, ending flow");
                        self.complete(Some(REPLY_END_MESSAGE), &mut effects);
                        return effects;
                    }
                    None if !handled.is_empty() => {
                        debug!(node_id = %node_id, "reply matched no option, asking again");
                        effects.push(Effect::RequestBranch {
                            text: BRANCH_REPROMPT.to_string(),
                            options: options.clone(),
                        });
                        return effects;
                    }
                    None => candidates.first(),
                }
            }
            _ => candidates.first(),
        };

        let target = next_edge.map(|e| e.target.clone()).filter(|target| {
            let exists = self.node_exists(target);
            if !exists {
                warn!(node_id = %node_id, %target, "edge points at a missing node");
            }
            exists
        });

        match target {
            Some(target) => {
                self.state.awaiting_input = false;
                self.state.current_node_id = Some(target.clone());
                self.pacer.pause(self.pacing.reply_delay());
                self.advance(target, &mut effects);
            }
            None => self.complete(Some(REPLY_END_MESSAGE), &mut effects),
        }
        effects
    }

    fn node_exists(&self, id: &str) -> bool {
        self.graph.as_ref().is_some_and(|g| g.node(id).is_some())
    }

    /// Enters `node_id` and keeps following sequential edges for as long as
    /// the nodes reached do not need a reply.
    fn advance(&mut self, mut node_id: String, effects: &mut Vec<Effect>) {
        // Auto-advancing nodes always take the same edge, so meeting one twice
        // means the flow would never stop.
        let mut visited = AHashSet::new();

        loop {
            let Some(kind) = self
                .graph
                .as_ref()
                .and_then(|g| g.node(&node_id))
                .map(|n| n.kind.clone())
            else {
                warn!(%node_id, "cursor points at a missing node");
                self.complete(Some(FLOW_END_MESSAGE), effects);
                return;
            };

            if !kind.awaits_input() && !visited.insert(node_id.clone()) {
                warn!(%node_id, "flow loops without asking for input, ending it");
                self.complete(Some(FLOW_END_MESSAGE), effects);
                return;
            }

            self.state.current_node_id = Some(node_id.clone());
            debug!(%node_id, kind = kind.name(), "entering node");

            let closing = match kind {
                FlowNodeKind::Message { text } => {
                    effects.push(Effect::Message(text));
                    self.pacer.pause(self.pacing.message_delay());
                    Some(FLOW_END_MESSAGE)
                }
                FlowNodeKind::Question { text, .. } => {
                    effects.push(Effect::Message(text));
                    self.state.awaiting_input = true;
                    return;
                }
                FlowNodeKind::Confirmation { text } => {
                    effects.push(Effect::RequestConfirmation(text));
                    self.state.awaiting_input = true;
                    return;
                }
                FlowNodeKind::Branch { text, options } => {
                    let text = if text.trim().is_empty() {
                        BRANCH_FALLBACK_PROMPT.to_string()
                    } else {
                        text
                    };
                    effects.push(Effect::RequestBranch { text, options });
                    self.state.awaiting_input = true;
                    return;
                }
                FlowNodeKind::Redirect { url } => {
                    match url.filter(|u| !u.trim().is_empty()) {
                        Some(url) => {
                            effects.push(Effect::Message(format!("Redirecting to: {}", url)));
                            self.pacer.pause(self.pacing.redirect_delay());
                            effects.push(Effect::OpenUrl(url));
                        }
                        None => warn!(%node_id, "redirect node without URL, skipping it"),
                    }
                    None
                }
                FlowNodeKind::Passthrough => Some(FLOW_END_MESSAGE),
            };

            let next = self
                .graph
                .as_ref()
                .and_then(|g| g.sequential_edge(&node_id))
                .map(|e| e.target.clone());
            match next {
                Some(target) if self.node_exists(&target) => node_id = target,
                Some(target) => {
                    warn!(%node_id, %target, "edge points at a missing node");
                    self.complete(closing, effects);
                    return;
                }
                None => {
                    self.complete(closing, effects);
                    return;
                }
            }
        }
    }

    fn complete(&mut self, closing: Option<&str>, effects: &mut Vec<Effect>) {
        self.state.completed = true;
        self.state.awaiting_input = false;
        if let Some(message) = closing {
            effects.push(Effect::Message(message.to_string()));
        }
        effects.push(Effect::Completed);
        info!(
            variables = self.state.variables.len(),
            "conversation flow completed"
        );
    }
}
