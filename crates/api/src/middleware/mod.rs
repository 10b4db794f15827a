//! Request middleware extractors.
//!
//! - [`identity::CallerIdentity`] -- Extracts the gateway-verified caller id
//!   from the `x-user-id` header.

pub mod identity;
