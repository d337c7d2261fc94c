//! The host side of a chat: runs the bot's conversation flow first, then
//! hands every further question to a question-answering collaborator.

use crate::config::InterpreterConfig;
use crate::data::BotRecord;
use crate::error::AnswerError;
use crate::flow::FlowNodeKind;
use crate::interpreter::{Effect, FlowInterpreter};
use crate::transcript::TranscriptFormatter;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Shown when the answering service has nothing to say.
pub const NO_ANSWER_MESSAGE: &str = "Sorry, I don't have an answer for that.";
/// Shown when the answering service could not be reached.
pub const ANSWER_FAILED_MESSAGE: &str = "Something went wrong. Please try again.";

/// Body of `POST /api/bots/ask`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest<'a> {
    pub question: &'a str,
    pub bot_id: Option<&'a str>,
}

/// Reply of `POST /api/bots/ask`. Either field may carry the text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl AskResponse {
    pub fn into_text(self) -> String {
        self.answer
            .filter(|a| !a.is_empty())
            .or(self.message.filter(|m| !m.is_empty()))
            .unwrap_or_else(|| NO_ANSWER_MESSAGE.to_string())
    }
}

/// Free-form question answering, used once the conversation flow is over.
pub trait Answerer: Send {
    fn ask(&mut self, request: &AskRequest<'_>) -> Result<AskResponse, AnswerError>;
}

/// Answers nothing. For hosts without a backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineAnswerer;

impl Answerer for OfflineAnswerer {
    fn ask(&mut self, _request: &AskRequest<'_>) -> Result<AskResponse, AnswerError> {
        Ok(AskResponse::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
}

/// One open chat with a bot.
pub struct ChatSession<A: Answerer> {
    bot: BotRecord,
    interpreter: FlowInterpreter,
    answerer: A,
    transcript: Vec<TranscriptEntry>,
}

impl<A: Answerer> ChatSession<A> {
    /// Opens a chat and runs the flow up to its first prompt.
    ///
    /// A flow that cannot be converted is treated like a missing one: the bot
    /// greets the user and goes straight to question answering.
    pub fn open(bot: BotRecord, answerer: A, config: &InterpreterConfig) -> (Self, Vec<Effect>) {
        Self::with_interpreter(bot, answerer, FlowInterpreter::new(config))
    }

    /// Like [`ChatSession::open`], with a preconfigured interpreter.
    pub fn with_interpreter(
        bot: BotRecord,
        answerer: A,
        mut interpreter: FlowInterpreter,
    ) -> (Self, Vec<Effect>) {
        let graph = bot.graph().unwrap_or_else(|e| {
            warn!(error = %e, "conversation flow could not be loaded, ignoring it");
            None
        });
        let effects = interpreter.start(graph, &bot.intro());

        let mut session = Self {
            bot,
            interpreter,
            answerer,
            transcript: Vec::new(),
        };
        session.record_bot(&effects);
        (session, effects)
    }

    pub fn bot(&self) -> &BotRecord {
        &self.bot
    }

    pub fn interpreter(&self) -> &FlowInterpreter {
        &self.interpreter
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// Handles a line typed by the user. Blank input is ignored.
    pub fn send(&mut self, text: &str) -> Vec<Effect> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::User,
            text: text.to_string(),
        });

        let effects = if self.interpreter.is_awaiting_input() {
            self.interpreter.submit_reply(text)
        } else if self.interpreter.is_completed() {
            vec![Effect::Message(self.answer(text))]
        } else {
            debug!("input arrived while the flow was neither waiting nor done");
            Vec::new()
        };
        self.record_bot(&effects);
        effects
    }

    /// The Yes / No buttons of a confirmation prompt.
    pub fn press_confirmation(&mut self, yes: bool) -> Vec<Effect> {
        if !self.current_kind_is(|k| matches!(k, FlowNodeKind::Confirmation { .. })) {
            return Vec::new();
        }
        self.send(if yes { "Yes" } else { "No" })
    }

    /// One of the option buttons of a branch prompt.
    pub fn choose_option(&mut self, index: usize) -> Vec<Effect> {
        let option = self
            .interpreter
            .current_node_id()
            .and_then(|id| self.interpreter.graph().and_then(|g| g.node(id)))
            .and_then(|node| match &node.kind {
                FlowNodeKind::Branch { options, .. } => options.get(index).cloned(),
                _ => None,
            });
        let Some(option) = option.filter(|_| self.interpreter.is_awaiting_input()) else {
            return Vec::new();
        };
        self.transcript.push(TranscriptEntry {
            speaker: Speaker::User,
            text: option,
        });
        let effects = self.interpreter.choose_option(index);
        self.record_bot(&effects);
        effects
    }

    fn current_kind_is(&self, pred: impl Fn(&FlowNodeKind) -> bool) -> bool {
        self.interpreter.is_awaiting_input()
            && self
                .interpreter
                .current_node_id()
                .and_then(|id| self.interpreter.graph().and_then(|g| g.node(id)))
                .is_some_and(|node| pred(&node.kind))
    }

    fn answer(&mut self, question: &str) -> String {
        let request = AskRequest {
            question,
            bot_id: self.bot.id.as_deref(),
        };
        match self.answerer.ask(&request) {
            Ok(response) => response.into_text(),
            Err(e) => {
                warn!(error = %e, "question answering failed");
                ANSWER_FAILED_MESSAGE.to_string()
            }
        }
    }

    fn record_bot(&mut self, effects: &[Effect]) {
        self.transcript.extend(
            TranscriptFormatter::format_all(effects)
                .into_iter()
                .map(|text| TranscriptEntry {
                    speaker: Speaker::Bot,
                    text,
                }),
        );
    }
}
