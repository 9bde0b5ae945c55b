use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(Cow<'static, str>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a validation failure with a static message.
    pub fn validation(msg: impl Into<Cow<'static, str>>) -> Self {
        CoreError::Validation(msg.into())
    }
}
