#![doc = include_str!("README.md")]
mod api;
mod error;
mod model;
mod oauth;

#[doc(inline)]
pub use api::{
    verify_assertion, AssertionOptions, MfaEnrollmentInfo, VerifyAssertionPayload,
    VerifyAssertionRequest, VerifyAssertionResponse, DEFAULT_REQUEST_URI,
};

#[doc(inline)]
pub use error::{AuthError, AuthResult};

#[doc(inline)]
pub use model::AuthRequestConfiguration;

#[doc(inline)]
pub use oauth::{
    FacebookAuthProvider, GitHubAuthProvider, GoogleAuthProvider, OAuthCredential, OAuthProvider,
    TwitterAuthProvider,
};
