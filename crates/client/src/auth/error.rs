use thiserror::Error;

use crate::error::ApiError;

use super::claims::ClaimsError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// The backend rejected the email/password combination.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The backend issued a token the client cannot decode.
    #[error("access token is malformed: {0}")]
    MalformedToken(#[from] ClaimsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Fold the transport-level rejection of a login attempt into
/// [`AuthError::InvalidCredentials`]; other failures pass through.
pub(crate) fn classify_login_error(err: ApiError) -> AuthError {
    match err {
        ApiError::Unauthenticated => AuthError::InvalidCredentials,
        ApiError::Status { status: 401 | 403, .. } => AuthError::InvalidCredentials,
        other => AuthError::Api(other),
    }
}
