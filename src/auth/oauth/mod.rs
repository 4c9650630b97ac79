mod credential;
mod providers;

pub use credential::OAuthCredential;
pub use providers::{
    FacebookAuthProvider, GitHubAuthProvider, GoogleAuthProvider, OAuthProvider,
    TwitterAuthProvider,
};
