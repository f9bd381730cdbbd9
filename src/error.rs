//! Error types.
//!
//! A missing piece of page furniture is not an error: widgets see it as an
//! absent `Option` and switch the feature off.  These types cover the
//! remaining failures, which come from the host itself.

use thiserror::Error;

/// Failures talking to the host document.
#[derive(Debug, Error)]
pub enum SiteError {
    #[error("no global `window` object")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    /// A DOM call threw; the payload is the stringified JS exception.
    #[error("DOM call `{call}` failed: {message}")]
    Dom { call: &'static str, message: String },

    #[error("logging already initialised")]
    LoggingInit,
}

/// A selector outside the subset understood by the in-memory page.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected character `{found}` at byte {at} in `{selector}`")]
    Unexpected {
        selector: String,
        found: char,
        at: usize,
    },

    #[error("unterminated attribute selector in `{0}`")]
    UnterminatedAttribute(String),
}

#[cfg(target_arch = "wasm32")]
impl From<SiteError> for wasm_bindgen::JsValue {
    fn from(err: SiteError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
