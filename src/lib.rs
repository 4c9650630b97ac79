#![doc = include_str!("RUSTDOC.md")]

pub mod auth;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
