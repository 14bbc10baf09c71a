//! Client-level errors.

use pawcare_api::ApiError;
use thiserror::Error;

use crate::db::DbError;
use crate::session::TokenError;
use crate::workflow::WorkflowError;

/// Message shown when the backend answers 401/403.
pub const NOT_AUTHORIZED_MESSAGE: &str = "You are not authorized to do that";

/// Any failure of a client action.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Storage error: {0}")]
    Db(#[from] DbError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error("Invalid token: {0}")]
    Token(#[from] TokenError),

    #[error("Store lock poisoned")]
    LockPoisoned,
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// True when the backend refused the request as unauthorized.
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.is_forbidden())
    }

    /// True when the backend reported the resource missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Api(e) if e.is_not_found())
    }

    /// Text for the error notification.
    pub fn user_message(&self) -> String {
        if self.is_forbidden() {
            NOT_AUTHORIZED_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for ClientError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        ClientError::LockPoisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_message() {
        let err: ClientError = ApiError::Forbidden { status: 403 }.into();
        assert!(err.is_forbidden());
        assert_eq!(err.user_message(), NOT_AUTHORIZED_MESSAGE);
    }

    #[test]
    fn test_other_messages_pass_through() {
        let err: ClientError = WorkflowError::EmptyBasket.into();
        assert!(!err.is_forbidden());
        assert_eq!(err.user_message(), "Basket is empty");
    }
}
