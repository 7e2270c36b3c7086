use thiserror::Error;

/// Errors raised by navigation operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    /// Another overlay already holds the page scroll lock.
    #[error("Scroll lock already held by '{holder}'")]
    ScrollLockHeld { holder: String },

    /// The slug is not in the published collection.
    #[error("Unknown case study: {0}")]
    UnknownSlug(String),

    /// A key name that the keyboard parser does not recognize.
    #[error("Unknown key: {0}")]
    UnknownKey(String),
}

impl NavError {
    pub fn unknown_slug(slug: impl Into<String>) -> Self {
        Self::UnknownSlug(slug.into())
    }
}
