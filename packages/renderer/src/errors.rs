use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("Component '{component_type}' failed to render: {message}")]
    ComponentFailed {
        component_type: String,
        message: String,
    },

    #[error("Field '{field}' has the wrong shape: {details}")]
    InvalidField { field: String, details: String },

    #[error("Invalid patch: {0}")]
    InvalidPatch(String),
}

pub type RenderResult<T> = Result<T, RenderError>;
