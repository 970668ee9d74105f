use thiserror::Error;

use crate::api::ApiError;
use crate::dom::{DomError, NodeId};
use postboard_types::UserId;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Element not found: {0}")]
    MissingElement(&'static str),

    #[error("Not an element node: {0:?}")]
    NotAnElement(NodeId),

    #[error("No option for user {0} in the select menu")]
    NoSuchOption(UserId),

    #[error("Render pass superseded by a newer selection")]
    Superseded,

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Dom(#[from] DomError),
}

impl RenderError {
    pub fn is_missing_argument(&self) -> bool {
        matches!(self, RenderError::MissingArgument(_))
    }
}

pub type RenderResult<T> = Result<T, RenderError>;
