use crate::auth::error::{AuthError, AuthResult};

pub(crate) const DEFAULT_IDENTITY_TOOLKIT_ENDPOINT: &str =
    "https://identitytoolkit.googleapis.com/v1";

/// Routing and scoping context shared by every Identity Toolkit request.
///
/// The assertion payload builder only reads `tenant_id`; the API key and
/// endpoint are consumed when the payload is dispatched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthRequestConfiguration {
    pub api_key: String,
    pub identity_toolkit_endpoint: String,
    pub tenant_id: Option<String>,
}

impl AuthRequestConfiguration {
    /// Creates a configuration targeting the production Identity Toolkit endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_toolkit_endpoint: DEFAULT_IDENTITY_TOOLKIT_ENDPOINT.to_string(),
            tenant_id: None,
        }
    }

    /// Overrides the Identity Toolkit base URL, e.g. to point at the emulator.
    pub fn with_identity_toolkit_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.identity_toolkit_endpoint = endpoint.into();
        self
    }

    /// Scopes requests built from this configuration to a tenant.
    pub fn with_tenant_id(mut self, tenant_id: impl Into<String>) -> Self {
        self.tenant_id = Some(tenant_id.into());
        self
    }

    pub(crate) fn api_key(&self) -> AuthResult<&str> {
        if self.api_key.trim().is_empty() {
            return Err(AuthError::InvalidArgument("Missing API key".into()));
        }
        Ok(&self.api_key)
    }

    pub(crate) fn endpoint_url(&self, path: &str) -> AuthResult<String> {
        let api_key = self.api_key()?;
        Ok(format!(
            "{}/{}?key={}",
            self.identity_toolkit_endpoint.trim_end_matches('/'),
            path,
            api_key
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_url_joins_base_path_and_key() {
        let config = AuthRequestConfiguration::new("test-key")
            .with_identity_toolkit_endpoint("http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/");
        assert_eq!(
            config.endpoint_url("accounts:signInWithIdp").unwrap(),
            "http://127.0.0.1:9099/identitytoolkit.googleapis.com/v1/accounts:signInWithIdp?key=test-key"
        );
    }

    #[test]
    fn blank_api_key_is_rejected() {
        let config = AuthRequestConfiguration::new("  ");
        assert!(matches!(
            config.endpoint_url("accounts:signInWithIdp"),
            Err(AuthError::InvalidArgument(_))
        ));
    }

    #[test]
    fn defaults_to_production_endpoint_without_tenant() {
        let config = AuthRequestConfiguration::new("key");
        assert_eq!(config.identity_toolkit_endpoint, DEFAULT_IDENTITY_TOOLKIT_ENDPOINT);
        assert_eq!(config.tenant_id, None);
        assert_eq!(
            config.with_tenant_id("tenant-a").tenant_id.as_deref(),
            Some("tenant-a")
        );
    }
}
