use std::fmt;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// None of the provider ID token, provider access token, pending token or
    /// request URI was supplied, so there is nothing for the backend to verify.
    MissingCredentialProof,
    InvalidArgument(String),
    Network(String),
    InvalidCredential(String),
    InvalidResponse(String),
}

impl AuthError {
    /// Transport failures are the only errors worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AuthError::Network(_))
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::MissingCredentialProof => write!(
                f,
                "One of IDToken, accessToken, pendingToken, or requestURI must be supplied"
            ),
            AuthError::InvalidArgument(message) => write!(f, "Invalid argument: {message}"),
            AuthError::Network(message) => write!(f, "Network error: {message}"),
            AuthError::InvalidCredential(message) => write!(f, "Invalid credential: {message}"),
            AuthError::InvalidResponse(message) => write!(f, "Invalid response: {message}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<serde_json::Error> for AuthError {
    fn from(error: serde_json::Error) -> Self {
        AuthError::InvalidResponse(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_proof_is_not_retryable() {
        assert!(!AuthError::MissingCredentialProof.is_retryable());
        assert!(!AuthError::InvalidCredential("INVALID_IDP_RESPONSE".into()).is_retryable());
        assert!(AuthError::Network("connection reset".into()).is_retryable());
    }

    #[test]
    fn display_names_the_accepted_proofs() {
        let message = AuthError::MissingCredentialProof.to_string();
        assert!(message.contains("pendingToken"));
        assert!(message.contains("requestURI"));
    }
}
