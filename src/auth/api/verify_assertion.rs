use serde::Serialize;
use serde_json::{Map, Value};
use url::form_urlencoded::Serializer;

use crate::auth::error::{AuthError, AuthResult};
use crate::auth::model::AuthRequestConfiguration;

/// Sent as `requestUri` when the caller has no redirect URI. The backend
/// requires the field but ignores its value in that case.
pub const DEFAULT_REQUEST_URI: &str = "http://localhost";

// Keys of the url-encoded `postBody` sub-document.
const PROVIDER_ID_KEY: &str = "providerId";
const PROVIDER_ID_TOKEN_KEY: &str = "id_token";
const PROVIDER_NONCE_KEY: &str = "nonce";
const PROVIDER_ACCESS_TOKEN_KEY: &str = "access_token";
const PROVIDER_OAUTH_TOKEN_SECRET_KEY: &str = "oauth_token_secret";
const IDENTIFIER_KEY: &str = "identifier";

/// Response-shaping flags applied when a [`VerifyAssertionRequest`] is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AssertionOptions {
    /// Ask the backend to return the ID and refresh tokens directly.
    pub return_secure_token: bool,
    /// Ask the backend to echo the IdP credential back.
    pub return_idp_credential: bool,
    /// Create the account when no user matches the assertion.
    pub auto_create: bool,
}

impl Default for AssertionOptions {
    fn default() -> Self {
        Self {
            return_secure_token: true,
            return_idp_credential: true,
            auto_create: true,
        }
    }
}

impl AssertionOptions {
    pub fn with_return_secure_token(mut self, value: bool) -> Self {
        self.return_secure_token = value;
        self
    }

    pub fn with_return_idp_credential(mut self, value: bool) -> Self {
        self.return_idp_credential = value;
        self
    }

    pub fn with_auto_create(mut self, value: bool) -> Self {
        self.auto_create = value;
        self
    }
}

/// Parameters for the `signInWithIdp` (verify assertion) endpoint.
///
/// The provider ID is fixed at construction. Everything else is optional and
/// may be set through the public fields or the chainable `with_*` helpers
/// before calling [`encode`](Self::encode). At least one of
/// `provider_id_token`, `provider_access_token`, `pending_token` or
/// `request_uri` has to be present for the request to encode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyAssertionRequest {
    provider_id: String,
    /// ID token issued by the IdP.
    pub provider_id_token: Option<String>,
    /// Access token issued by the IdP.
    pub provider_access_token: Option<String>,
    /// Raw nonce the IdP ID token was bound to.
    pub provider_raw_nonce: Option<String>,
    /// OAuth1 token secret (Twitter and similar providers).
    pub provider_oauth_token_secret: Option<String>,
    /// Continuation token from a flow the backend already partially processed.
    pub pending_token: Option<String>,
    /// URI the IdP redirected back to. It may carry the federated login result.
    pub request_uri: Option<String>,
    /// STS access token of the signed-in user. Only set when linking.
    pub access_token: Option<String>,
    /// Maps this request to an in-progress headful flow.
    pub session_id: Option<String>,
    /// Email originally entered in the UI.
    pub input_email: Option<String>,
    pub tenant_id: Option<String>,
    pub options: AssertionOptions,
}

impl VerifyAssertionRequest {
    /// Creates a request for `provider_id` with the default [`AssertionOptions`].
    pub fn new(
        provider_id: impl Into<String>,
        config: &AuthRequestConfiguration,
    ) -> AuthResult<Self> {
        Self::with_options(provider_id, config, AssertionOptions::default())
    }

    /// Creates a request for `provider_id` with explicit response-shaping options.
    pub fn with_options(
        provider_id: impl Into<String>,
        config: &AuthRequestConfiguration,
        options: AssertionOptions,
    ) -> AuthResult<Self> {
        let provider_id = provider_id.into();
        if provider_id.trim().is_empty() {
            return Err(AuthError::InvalidArgument(
                "providerId must not be empty".into(),
            ));
        }

        Ok(Self {
            provider_id,
            provider_id_token: None,
            provider_access_token: None,
            provider_raw_nonce: None,
            provider_oauth_token_secret: None,
            pending_token: None,
            request_uri: None,
            access_token: None,
            session_id: None,
            input_email: None,
            tenant_id: config.tenant_id.clone(),
            options,
        })
    }

    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn with_provider_id_token(mut self, value: impl Into<String>) -> Self {
        self.provider_id_token = Some(value.into());
        self
    }

    pub fn with_provider_access_token(mut self, value: impl Into<String>) -> Self {
        self.provider_access_token = Some(value.into());
        self
    }

    pub fn with_provider_raw_nonce(mut self, value: impl Into<String>) -> Self {
        self.provider_raw_nonce = Some(value.into());
        self
    }

    pub fn with_provider_oauth_token_secret(mut self, value: impl Into<String>) -> Self {
        self.provider_oauth_token_secret = Some(value.into());
        self
    }

    pub fn with_pending_token(mut self, value: impl Into<String>) -> Self {
        self.pending_token = Some(value.into());
        self
    }

    pub fn with_request_uri(mut self, value: impl Into<String>) -> Self {
        self.request_uri = Some(value.into());
        self
    }

    /// Links the assertion to the user owning this STS access token.
    pub fn with_access_token(mut self, value: impl Into<String>) -> Self {
        self.access_token = Some(value.into());
        self
    }

    pub fn with_session_id(mut self, value: impl Into<String>) -> Self {
        self.session_id = Some(value.into());
        self
    }

    pub fn with_input_email(mut self, value: impl Into<String>) -> Self {
        self.input_email = Some(value.into());
        self
    }

    pub fn with_tenant_id(mut self, value: impl Into<String>) -> Self {
        self.tenant_id = Some(value.into());
        self
    }

    fn has_credential_proof(&self) -> bool {
        self.provider_id_token.is_some()
            || self.provider_access_token.is_some()
            || self.pending_token.is_some()
            || self.request_uri.is_some()
    }

    fn post_body_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = vec![(PROVIDER_ID_KEY, self.provider_id.as_str())];
        if let Some(id_token) = self.provider_id_token.as_deref() {
            pairs.push((PROVIDER_ID_TOKEN_KEY, id_token));
        }
        if let Some(nonce) = self.provider_raw_nonce.as_deref() {
            pairs.push((PROVIDER_NONCE_KEY, nonce));
        }
        if let Some(access_token) = self.provider_access_token.as_deref() {
            pairs.push((PROVIDER_ACCESS_TOKEN_KEY, access_token));
        }
        if let Some(secret) = self.provider_oauth_token_secret.as_deref() {
            pairs.push((PROVIDER_OAUTH_TOKEN_SECRET_KEY, secret));
        }
        if let Some(email) = self.input_email.as_deref() {
            pairs.push((IDENTIFIER_KEY, email));
        }
        pairs
    }

    /// Validates the request and builds the JSON body expected by the backend.
    ///
    /// Fails with [`AuthError::MissingCredentialProof`] when no proof of
    /// identity was supplied. No partial payload is produced in that case.
    pub fn encode(&self) -> AuthResult<VerifyAssertionPayload> {
        if !self.has_credential_proof() {
            log::warn!(
                "verifyAssertion request for {} carries no credential proof",
                self.provider_id
            );
            return Err(AuthError::MissingCredentialProof);
        }

        let mut serializer = Serializer::new(String::new());
        serializer.extend_pairs(self.post_body_pairs());
        let post_body = serializer.finish();

        log::debug!(
            "encoded verifyAssertion request for {} (proof: {})",
            self.provider_id,
            self.proof_kind()
        );

        Ok(VerifyAssertionPayload {
            request_uri: self
                .request_uri
                .clone()
                .unwrap_or_else(|| DEFAULT_REQUEST_URI.to_string()),
            post_body: (!post_body.is_empty()).then_some(post_body),
            pending_token: self.pending_token.clone(),
            id_token: self.access_token.clone(),
            return_secure_token: self.options.return_secure_token,
            return_idp_credential: self.options.return_idp_credential,
            session_id: self.session_id.clone(),
            tenant_id: self.tenant_id.clone(),
            auto_create: self.options.auto_create,
        })
    }

    fn proof_kind(&self) -> &'static str {
        if self.provider_id_token.is_some() {
            "id_token"
        } else if self.provider_access_token.is_some() {
            "access_token"
        } else if self.pending_token.is_some() {
            "pending_token"
        } else {
            "request_uri"
        }
    }
}

/// Wire body of the verify assertion call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VerifyAssertionPayload {
    #[serde(rename = "requestUri")]
    pub request_uri: String,
    #[serde(rename = "postBody", skip_serializing_if = "Option::is_none")]
    pub post_body: Option<String>,
    #[serde(rename = "pendingToken", skip_serializing_if = "Option::is_none")]
    pub pending_token: Option<String>,
    /// The user's STS access token. The backend schema calls it `idToken`;
    /// the name mismatch is deliberate and must be kept for compatibility.
    #[serde(rename = "idToken", skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    #[serde(rename = "returnSecureToken", skip_serializing_if = "is_false")]
    pub return_secure_token: bool,
    #[serde(rename = "returnIdpCredential", skip_serializing_if = "is_false")]
    pub return_idp_credential: bool,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(rename = "tenantId", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(rename = "autoCreate")]
    pub auto_create: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl VerifyAssertionPayload {
    /// Serializes the payload into the JSON object posted to the backend.
    pub fn to_json(&self) -> AuthResult<Map<String, Value>> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map),
            other => Err(AuthError::InvalidResponse(format!(
                "verifyAssertion payload serialized to a non-object: {other}"
            ))),
        }
    }
}
