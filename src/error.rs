//! Error types shared by the page components

use thiserror::Error;

/// Errors raised while wiring effects onto the page
#[derive(Debug, Error)]
pub enum FxError {
    /// A schedule attribute could not be parsed as an instant
    #[error("invalid timestamp in `{field}`: {value:?}")]
    InvalidTimestamp { field: &'static str, value: String },

    /// Event end precedes its start
    #[error("event ends ({ends_at} ms) before it starts ({starts_at} ms)")]
    InvertedSchedule { starts_at: i64, ends_at: i64 },

    /// Settings block present but not valid JSON for `Settings`
    #[error("malformed settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// A browser call failed
    #[error("browser call failed: {0}")]
    Js(String),
}

pub type FxResult<T> = Result<T, FxError>;

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FxError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FxError::Js(format!("{value:?}"))
    }
}
