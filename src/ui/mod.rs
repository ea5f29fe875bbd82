//! UI Module - Terminal views
//!
//! Every panel is resolved into a `ViewState` once, then rendered by the
//! function for its variant.

pub mod render;

use serde::Serialize;

use crate::error::{Result, UserAction};

/// What a panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum ViewState<T> {
    Loading,
    Error(String),
    Empty,
    Populated(T),
}

impl<T> ViewState<T> {
    /// `Ok(None)` is the empty state; errors become the user-facing message
    pub fn resolve(result: Result<Option<T>>, action: UserAction) -> Self {
        match result {
            Ok(Some(value)) => ViewState::Populated(value),
            Ok(None) => ViewState::Empty,
            Err(e) => {
                log::debug!("{:?} failed: {}", action, e);
                ViewState::Error(e.user_message(action))
            }
        }
    }

    pub fn from_result(result: Result<T>, action: UserAction) -> Self {
        Self::resolve(result.map(Some), action)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(msg) => ViewState::Error(msg),
            ViewState::Empty => ViewState::Empty,
            ViewState::Populated(value) => ViewState::Populated(f(value)),
        }
    }

    pub fn populated(&self) -> Option<&T> {
        match self {
            ViewState::Populated(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ViewState::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;

    #[test]
    fn test_resolve_variants() {
        let ok: ViewState<u8> = ViewState::resolve(Ok(Some(3)), UserAction::Stats);
        assert_eq!(ok.populated(), Some(&3));

        let empty: ViewState<u8> = ViewState::resolve(Ok(None), UserAction::Stats);
        assert_eq!(empty, ViewState::Empty);

        let err: ViewState<u8> = ViewState::from_result(
            Err(ClientError::Network("refused".into())),
            UserAction::Predict,
        );
        assert_eq!(
            err,
            ViewState::Error("Failed to get prediction. Please check inputs.".to_string())
        );
        assert!(err.is_error());
    }

    #[test]
    fn test_map_keeps_state() {
        let state: ViewState<u8> = ViewState::Loading;
        assert_eq!(state.map(|v| v * 2), ViewState::Loading);
        assert_eq!(ViewState::Populated(2).map(|v| v * 2), ViewState::Populated(4));
    }

    #[test]
    fn test_serialized_shape() {
        let state = ViewState::Populated(1);
        assert_eq!(
            serde_json::to_value(&state).unwrap(),
            serde_json::json!({"state": "populated", "data": 1})
        );
    }
}
