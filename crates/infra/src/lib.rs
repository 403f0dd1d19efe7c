//! # Hubgate Infra
//!
//! Infrastructure adapters for the hosted backend.
//!
//! This crate contains:
//! - REST clients for the document store, identity provider, and object
//!   storage
//! - Typed repositories implementing the core ports over those clients
//! - The keyring-backed local profile cache
//! - The configuration loader
//!
//! ## Architecture
//! - Implements `hubgate-core` ports; no business logic of its own
//! - All network I/O and platform integration lives here

pub mod backend;
pub mod cache;
pub mod config;

pub use backend::blogs::DocBlogRepository;
pub use backend::client::{DocQuery, DocStoreClient, DocStoreConfig};
pub use backend::identity::RestIdentityProvider;
pub use backend::listings::DocListingRepository;
pub use backend::messages::DocMessageRepository;
pub use backend::partners::DocPartnerRepository;
pub use backend::profiles::DocProfileRepository;
pub use backend::registrations::DocRegistrationRepository;
pub use backend::storage::HttpObjectStorage;
pub use cache::profile_cache::KeyringProfileCache;
