mod idp;
mod verify_assertion;

pub use idp::{verify_assertion, MfaEnrollmentInfo, VerifyAssertionResponse};
pub use verify_assertion::{
    AssertionOptions, VerifyAssertionPayload, VerifyAssertionRequest, DEFAULT_REQUEST_URI,
};
