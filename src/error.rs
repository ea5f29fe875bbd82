//! Error handling

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // Transport errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Server { status: u16, detail: Option<String> },

    // Payload errors
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Response violates contract v{version}: {reason}")]
    Contract { version: u8, reason: String },

    // Caller errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    pub fn contract(reason: impl Into<String>) -> Self {
        ClientError::Contract {
            version: crate::constants::CONTRACT_VERSION,
            reason: reason.into(),
        }
    }

    /// Whether resubmitting the same action may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ClientError::Network(_) | ClientError::Server { .. })
    }

    /// Message shown to the user for a failed action.
    ///
    /// Backend `detail` strings replace the generic text only for actions
    /// that surface them.
    pub fn user_message(&self, action: UserAction) -> String {
        match self {
            ClientError::Server { detail: Some(detail), .. } if action.surfaces_detail() => {
                detail.clone()
            }
            ClientError::InvalidInput(msg) => msg.clone(),
            _ => action.generic_message().to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Parse(err.to_string())
        } else {
            ClientError::Network(err.to_string())
        }
    }
}

impl From<crate::logic::parameters::ParameterError> for ClientError {
    fn from(err: crate::logic::parameters::ParameterError) -> Self {
        ClientError::InvalidInput(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Parse(err.to_string())
    }
}

/// User-triggered actions, used to pick the generic failure message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Predict,
    Sample,
    Stats,
    Health,
    Forecast,
    Upload,
    UseSample,
    Preview,
    Analyze,
    Clean,
    Compare,
    Train,
    Download,
}

impl UserAction {
    /// Upload, sample loading and cleaning show the backend's own reason
    pub fn surfaces_detail(self) -> bool {
        matches!(self, UserAction::Upload | UserAction::UseSample | UserAction::Clean)
    }

    pub fn generic_message(self) -> &'static str {
        match self {
            UserAction::Predict => "Failed to get prediction. Please check inputs.",
            UserAction::Sample => "Failed to fetch sample.",
            UserAction::Stats => "Failed to fetch stats.",
            UserAction::Health => "Backend unreachable.",
            UserAction::Forecast => "Failed to forecast pH.",
            UserAction::Upload => "Upload failed. Please try again.",
            UserAction::UseSample => "Failed to load sample data.",
            UserAction::Preview => "Could not load preview. You can still proceed.",
            UserAction::Analyze => "Failed to load analysis. Session might be expired.",
            UserAction::Clean => "Failed to apply cleaning strategies.",
            UserAction::Compare => "Failed to load comparison data.",
            UserAction::Train => "Model training failed. Please try again.",
            UserAction::Download => "Failed to download model.",
        }
    }
}
