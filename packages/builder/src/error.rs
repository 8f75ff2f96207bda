use thiserror::Error;

use mediakit_api::ApiError;
use mediakit_common::CommonError;
use mediakit_editor::EditorError;

#[derive(Debug, Error)]
pub enum BuilderError {
    #[error("Configuration error: {0}")]
    Config(#[from] CommonError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

pub type BuilderResult<T> = std::result::Result<T, BuilderError>;
