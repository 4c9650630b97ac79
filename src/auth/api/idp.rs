use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::auth::api::verify_assertion::VerifyAssertionRequest;
use crate::auth::error::{AuthError, AuthResult};
use crate::auth::model::AuthRequestConfiguration;

pub(crate) const VERIFY_ASSERTION_PATH: &str = "accounts:signInWithIdp";

/// Second factor enrolled on the account, returned when sign-in requires MFA.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct MfaEnrollmentInfo {
    #[serde(rename = "mfaEnrollmentId")]
    pub mfa_enrollment_id: Option<String>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "phoneInfo")]
    pub phone_info: Option<String>,
    #[serde(rename = "enrolledAt")]
    pub enrolled_at: Option<String>,
}

/// Fields returned by the verify assertion endpoint.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct VerifyAssertionResponse {
    #[serde(rename = "federatedId")]
    pub federated_id: Option<String>,
    #[serde(rename = "providerId")]
    pub provider_id: Option<String>,
    #[serde(rename = "localId")]
    pub local_id: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "emailVerified")]
    pub email_verified: Option<bool>,
    #[serde(rename = "displayName")]
    pub display_name: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
    #[serde(rename = "fullName")]
    pub full_name: Option<String>,
    #[serde(rename = "photoUrl")]
    pub photo_url: Option<String>,
    #[serde(rename = "idToken")]
    pub id_token: Option<String>,
    #[serde(rename = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(rename = "expiresIn")]
    pub expires_in: Option<String>,
    #[serde(rename = "oauthAccessToken")]
    pub oauth_access_token: Option<String>,
    #[serde(rename = "oauthIdToken")]
    pub oauth_id_token: Option<String>,
    #[serde(rename = "oauthTokenSecret")]
    pub oauth_token_secret: Option<String>,
    #[serde(rename = "oauthExpireIn")]
    pub oauth_expire_in: Option<i64>,
    #[serde(rename = "pendingToken")]
    pub pending_token: Option<String>,
    #[serde(rename = "isNewUser")]
    pub is_new_user: Option<bool>,
    #[serde(rename = "needConfirmation")]
    pub need_confirmation: Option<bool>,
    #[serde(rename = "rawUserInfo")]
    pub raw_user_info: Option<String>,
    #[serde(rename = "errorMessage")]
    pub error_message: Option<String>,
    #[serde(rename = "mfaPendingCredential")]
    pub mfa_pending_credential: Option<String>,
    #[serde(rename = "mfaInfo")]
    pub mfa_info: Option<Vec<MfaEnrollmentInfo>>,
}

impl VerifyAssertionResponse {
    /// The IdP account matches an existing user that must confirm the link.
    pub fn needs_confirmation(&self) -> bool {
        self.need_confirmation.unwrap_or(false)
    }

    /// Lifetime of the returned ID token, when the backend reported one.
    pub fn expires_in_duration(&self) -> Option<Duration> {
        self.expires_in
            .as_deref()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
    }

    /// Parses the provider profile the backend forwards as a JSON string.
    pub fn raw_user_info_json(&self) -> Option<Value> {
        self.raw_user_info
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorBody>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Sends a verify assertion request to the Identity Toolkit backend.
///
/// The request is encoded before any I/O, so a request without credential
/// proof fails with [`AuthError::MissingCredentialProof`] and never reaches the
/// network. Failed calls are not retried.
pub async fn verify_assertion(
    client: &Client,
    config: &AuthRequestConfiguration,
    request: &VerifyAssertionRequest,
) -> AuthResult<VerifyAssertionResponse> {
    let payload = request.encode()?;
    let url = config.endpoint_url(VERIFY_ASSERTION_PATH)?;

    let response = client
        .post(&url)
        .json(&payload)
        .send()
        .await
        .map_err(|err| AuthError::Network(err.to_string()))?;

    let status = response.status();
    if status.is_success() {
        response
            .json::<VerifyAssertionResponse>()
            .await
            .map_err(|err| AuthError::InvalidResponse(err.to_string()))
    } else {
        let body = response.text().await.unwrap_or_default();
        let error = map_error(status, &body);
        log::warn!(
            "verifyAssertion for {} rejected ({status}): {error}",
            request.provider_id()
        );
        Err(error)
    }
}

fn map_error(status: StatusCode, body: &str) -> AuthError {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(message) = parsed.error.and_then(|error| error.message) {
            return AuthError::InvalidCredential(message);
        }
    }

    AuthError::InvalidCredential(format!("Request failed with status {status}: {body}"))
}


#[cfg(all(test, not(target_arch = "wasm32")))]
mod http_tests {
    use super::*;
    use crate::test_support::{start_mock_server, test_configuration};
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test(flavor = "current_thread")]
    async fn posts_encoded_payload_and_parses_response() {
        let server = start_mock_server();
        let config = test_configuration(&server).with_tenant_id("tenant-7");

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:signInWithIdp")
                .query_param("key", "test-key")
                .json_body(json!({
                    "requestUri": "http://localhost",
                    "postBody": "providerId=google.com&id_token=google-id-token",
                    "returnSecureToken": true,
                    "returnIdpCredential": true,
                    "tenantId": "tenant-7",
                    "autoCreate": true
                }));
            then.status(200).json_body(json!({
                "federatedId": "https://accounts.google.com/1234",
                "providerId": "google.com",
                "localId": "uid-1",
                "email": "ada@example.com",
                "idToken": "firebase-id-token",
                "refreshToken": "refresh",
                "expiresIn": "3600",
                "isNewUser": true
            }));
        });

        let request = VerifyAssertionRequest::new("google.com", &config)
            .unwrap()
            .with_provider_id_token("google-id-token");
        let response = verify_assertion(&Client::new(), &config, &request)
            .await
            .expect("verify assertion should succeed");

        mock.assert();
        assert_eq!(response.local_id.as_deref(), Some("uid-1"));
        assert_eq!(response.is_new_user, Some(true));
        assert_eq!(response.id_token.as_deref(), Some("firebase-id-token"));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn missing_proof_never_reaches_the_network() {
        let server = start_mock_server();
        let config = test_configuration(&server);

        let mock = server.mock(|when, then| {
            when.method(POST).path("/v1/accounts:signInWithIdp");
            then.status(200).json_body(json!({}));
        });

        let request = VerifyAssertionRequest::new("github.com", &config).unwrap();
        let result = verify_assertion(&Client::new(), &config, &request).await;

        assert_eq!(result, Err(AuthError::MissingCredentialProof));
        mock.assert_hits(0);
    }

    #[tokio::test(flavor = "current_thread")]
    async fn backend_rejection_maps_error_message() {
        let server = start_mock_server();
        let config = test_configuration(&server);

        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1/accounts:signInWithIdp")
                .query_param("key", "test-key");
            then.status(400)
                .body("{\"error\":{\"message\":\"INVALID_IDP_RESPONSE\"}}");
        });

        let request = VerifyAssertionRequest::new("facebook.com", &config)
            .unwrap()
            .with_provider_access_token("fb-token");
        let result = verify_assertion(&Client::new(), &config, &request).await;

        mock.assert();
        assert!(matches!(
            result,
            Err(AuthError::InvalidCredential(message)) if message == "INVALID_IDP_RESPONSE"
        ));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn undecodable_success_body_is_reported() {
        let server = start_mock_server();
        let config = test_configuration(&server);

        server.mock(|when, then| {
            when.method(POST).path("/v1/accounts:signInWithIdp");
            then.status(200).body("not json");
        });

        let request = VerifyAssertionRequest::new("google.com", &config)
            .unwrap()
            .with_pending_token("pending");
        let result = verify_assertion(&Client::new(), &config, &request).await;

        assert!(matches!(result, Err(AuthError::InvalidResponse(_))));
    }
}
