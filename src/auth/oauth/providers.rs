use super::credential::OAuthCredential;

pub struct GoogleAuthProvider;

impl GoogleAuthProvider {
    pub const PROVIDER_ID: &'static str = "google.com";

    /// Google sign-in hands back an ID token, an access token, or both.
    pub fn credential(id_token: Option<String>, access_token: Option<String>) -> OAuthCredential {
        let mut credential = OAuthCredential::new(Self::PROVIDER_ID);
        if let Some(id_token) = id_token {
            credential = credential.with_id_token(id_token);
        }
        if let Some(access_token) = access_token {
            credential = credential.with_access_token(access_token);
        }
        credential
    }
}

pub struct FacebookAuthProvider;

impl FacebookAuthProvider {
    pub const PROVIDER_ID: &'static str = "facebook.com";

    pub fn credential(access_token: impl Into<String>) -> OAuthCredential {
        OAuthCredential::new(Self::PROVIDER_ID).with_access_token(access_token)
    }
}

pub struct GitHubAuthProvider;

impl GitHubAuthProvider {
    pub const PROVIDER_ID: &'static str = "github.com";

    pub fn credential(access_token: impl Into<String>) -> OAuthCredential {
        OAuthCredential::new(Self::PROVIDER_ID).with_access_token(access_token)
    }
}

pub struct TwitterAuthProvider;

impl TwitterAuthProvider {
    pub const PROVIDER_ID: &'static str = "twitter.com";

    /// Twitter still uses OAuth 1.0a: the token travels with its secret.
    pub fn credential(token: impl Into<String>, secret: impl Into<String>) -> OAuthCredential {
        OAuthCredential::new(Self::PROVIDER_ID)
            .with_access_token(token)
            .with_secret(secret)
    }
}

/// Credentials for generic OAuth/OIDC providers (`oidc.*`, `apple.com`, ...).
pub struct OAuthProvider;

impl OAuthProvider {
    pub fn credential(
        provider_id: impl Into<String>,
        id_token: Option<String>,
        access_token: Option<String>,
    ) -> OAuthCredential {
        Self::credential_with_nonce(provider_id, id_token, None, access_token)
    }

    /// Builds a credential whose ID token is bound to `raw_nonce`.
    pub fn credential_with_nonce(
        provider_id: impl Into<String>,
        id_token: Option<String>,
        raw_nonce: Option<String>,
        access_token: Option<String>,
    ) -> OAuthCredential {
        let mut credential = OAuthCredential::new(provider_id).with_raw_nonce(raw_nonce);
        if let Some(id_token) = id_token {
            credential = credential.with_id_token(id_token);
        }
        if let Some(access_token) = access_token {
            credential = credential.with_access_token(access_token);
        }
        credential
    }
}
