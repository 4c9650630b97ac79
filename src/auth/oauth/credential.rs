use url::Url;

use crate::auth::api::VerifyAssertionRequest;
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::model::AuthRequestConfiguration;

/// Credential obtained from a federated identity provider.
///
/// A credential carries whatever the provider handed back: tokens from a
/// native SDK, a pending token from an earlier backend round trip, or the
/// callback URL of a headful redirect flow. [`prepare_verify_assertion`]
/// copies it into a [`VerifyAssertionRequest`].
///
/// [`prepare_verify_assertion`]: OAuthCredential::prepare_verify_assertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthCredential {
    provider_id: String,
    id_token: Option<String>,
    access_token: Option<String>,
    secret: Option<String>,
    raw_nonce: Option<String>,
    pending_token: Option<String>,
    session_id: Option<String>,
    request_uri: Option<String>,
}

impl OAuthCredential {
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            id_token: None,
            access_token: None,
            secret: None,
            raw_nonce: None,
            pending_token: None,
            session_id: None,
            request_uri: None,
        }
    }

    /// Builds a credential from the URL the provider redirected back to
    /// during a headful sign-in flow.
    pub fn from_redirect(
        provider_id: impl Into<String>,
        session_id: impl Into<String>,
        callback_url: &str,
    ) -> AuthResult<Self> {
        Url::parse(callback_url).map_err(|err| {
            AuthError::InvalidArgument(format!("invalid callback URL {callback_url}: {err}"))
        })?;
        let mut credential = Self::new(provider_id);
        credential.session_id = Some(session_id.into());
        credential.request_uri = Some(callback_url.to_string());
        Ok(credential)
    }

    pub fn with_id_token(mut self, value: impl Into<String>) -> Self {
        self.id_token = Some(value.into());
        self
    }

    pub fn with_access_token(mut self, value: impl Into<String>) -> Self {
        self.access_token = Some(value.into());
        self
    }

    pub fn with_secret(mut self, value: impl Into<String>) -> Self {
        self.secret = Some(value.into());
        self
    }

    pub fn with_raw_nonce(mut self, nonce: Option<String>) -> Self {
        self.raw_nonce = nonce;
        self
    }

    pub fn with_pending_token(mut self, value: impl Into<String>) -> Self {
        self.pending_token = Some(value.into());
        self
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn id_token(&self) -> Option<&str> {
        self.id_token.as_deref()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn secret(&self) -> Option<&str> {
        self.secret.as_deref()
    }

    pub fn raw_nonce(&self) -> Option<&str> {
        self.raw_nonce.as_deref()
    }

    pub fn pending_token(&self) -> Option<&str> {
        self.pending_token.as_deref()
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn request_uri(&self) -> Option<&str> {
        self.request_uri.as_deref()
    }

    /// Copies the fields this credential carries into `request`.
    ///
    /// Fields the credential does not carry are left untouched.
    pub fn prepare_verify_assertion(&self, request: &mut VerifyAssertionRequest) {
        fill(&mut request.provider_id_token, &self.id_token);
        fill(&mut request.provider_access_token, &self.access_token);
        fill(&mut request.provider_oauth_token_secret, &self.secret);
        fill(&mut request.provider_raw_nonce, &self.raw_nonce);
        fill(&mut request.pending_token, &self.pending_token);
        fill(&mut request.session_id, &self.session_id);
        fill(&mut request.request_uri, &self.request_uri);
    }
}

fn fill(target: &mut Option<String>, source: &Option<String>) {
    if let Some(value) = source {
        *target = Some(value.clone());
    }
}

impl VerifyAssertionRequest {
    /// Creates a request for the credential's provider, pre-filled from it.
    pub fn from_credential(
        credential: &OAuthCredential,
        config: &AuthRequestConfiguration,
    ) -> AuthResult<Self> {
        let mut request = VerifyAssertionRequest::new(credential.provider_id(), config)?;
        credential.prepare_verify_assertion(&mut request);
        Ok(request)
    }
}
