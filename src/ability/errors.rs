use miette::Diagnostic;
use serde_json::Value;
use thiserror::Error;

use crate::ability::rules::BoxError;

pub type Result<T> = std::result::Result<T, AbilityError>;

#[derive(Debug, Error, Diagnostic)]
pub enum AbilityError {
    #[error("{0}")]
    #[diagnostic(
        code(cancan::invalid_argument),
        help("Pass a non-empty action, and either set `Options::type_name` or implement `Resource::type_name`")
    )]
    InvalidArgument(String),

    #[error("Access denied: cannot {action} {}", .type_name.as_deref().unwrap_or("nothing"))]
    #[diagnostic(code(cancan::access_denied))]
    AccessDenied {
        action: String,
        type_name: Option<String>,
        resource: Option<Value>,
    },

    #[error("Rule evaluation failed: {0}")]
    #[diagnostic(code(cancan::evaluation))]
    Evaluation(#[source] BoxError),

    #[error("Serialization error: {0}")]
    #[diagnostic(
        code(cancan::serde),
        help("Resources and options must serialize to a JSON value")
    )]
    Serialization(#[from] serde_json::Error),
}

impl AbilityError {
    pub(crate) fn action_required() -> Self {
        AbilityError::InvalidArgument(
            "action required, for example: ctx.can('read', doc)".to_string(),
        )
    }

    pub(crate) fn type_required() -> Self {
        AbilityError::InvalidArgument(
            "Fail get type from obj argument, please present its by options, for example: ctx.can('read', topic, { type: 'topic' })"
                .to_string(),
        )
    }

    pub fn is_access_denied(&self) -> bool {
        matches!(self, AbilityError::AccessDenied { .. })
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AbilityError::InvalidArgument(_))
    }
}
