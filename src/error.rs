use thiserror::Error;

/// Errors that can occur when converting a custom user format into a `FlowDefinition`.
#[derive(Error, Debug, Clone)]
pub enum FlowConversionError {
    #[error("Node at position {index} has no id")]
    MissingNodeId { index: usize },

    #[error("Edge at position {index} is missing its {field}")]
    IncompleteEdge { index: usize, field: &'static str },

    #[error("Invalid custom data: {0}")]
    ValidationError(String),
}

/// Errors that can occur while loading a bot record or a flow from disk or a string.
#[derive(Error, Debug)]
pub enum FlowLoadError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to convert flow: {0}")]
    Conversion(#[from] FlowConversionError),
}

/// Errors raised by a question-answering collaborator.
#[derive(Error, Debug, Clone)]
pub enum AnswerError {
    #[error("Question-answering request failed: {0}")]
    Transport(String),

    #[error("Question-answering response could not be decoded: {0}")]
    Decode(String),
}
