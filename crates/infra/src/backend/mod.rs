//! Hosted backend adapters
//!
//! One module per concern: the shared document-store client, the identity
//! provider, object storage, and a typed repository per collection.

pub mod blogs;
pub mod client;
pub mod identity;
pub mod listings;
pub mod messages;
pub mod partners;
pub mod profiles;
pub mod registrations;
pub mod storage;
