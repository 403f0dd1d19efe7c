//! # Hubgate Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - The identity session cache, role gate, and approval workflow
//! - Port/adapter interfaces (traits) for the hosted backend
//! - Pure filtering/search helpers backing the list screens
//!
//! ## Architecture Principles
//! - Only depends on `hubgate-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod auth;
pub mod content;
pub mod iam;

// Re-export specific items to avoid ambiguity
pub use auth::approval::{ApprovalError, ApprovalService};
pub use auth::gate::{evaluate, GateDecision, Redirect};
pub use auth::ports::{IdentityProvider, ProfileCache};
pub use auth::session::SessionService;
pub use content::ports::{
    BlogRepository, ListingRepository, MessageRepository, ObjectStorage, PartnerRepository,
};
pub use iam::ports::{ProfileRepository, RegistrationRepository};
