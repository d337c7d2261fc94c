use crate::error::FlowLoadError;
use crate::flow::{ConversationGraph, IntoFlow};
use crate::interpreter::BotIntro;
use crate::ui::UiFlow;
use serde::{Deserialize, Serialize};
use std::fs;

/// A bot as returned by the backend's bot endpoint.
///
/// The backend has served both camelCase and snake_case field names over
/// time; both are accepted.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct BotRecord {
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "is_voice_enabled", alias = "voice_enabled")]
    pub voice_enabled: bool,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default, alias = "primary_purpose")]
    pub primary_purpose: String,
    #[serde(default, alias = "conversation_tone", alias = "conversational_tone")]
    pub conversational_tone: String,
    #[serde(default, alias = "conversation_flow")]
    pub conversation_flow: Option<UiFlow>,
}

impl BotRecord {
    /// Load a bot record from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, FlowLoadError> {
        let content = fs::read_to_string(path).map_err(|source| FlowLoadError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, FlowLoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn intro(&self) -> BotIntro {
        BotIntro::new(self.name.clone(), self.description.clone())
    }

    /// Converts the stored flow, if any, into an executable graph.
    pub fn graph(&self) -> Result<Option<ConversationGraph>, FlowLoadError> {
        match &self.conversation_flow {
            Some(flow) => Ok(Some(ConversationGraph::new(flow.clone().into_flow()?))),
            None => Ok(None),
        }
    }
}
