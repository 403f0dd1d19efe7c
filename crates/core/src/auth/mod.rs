//! Session, access control, and the registration approval workflow

pub mod approval;
pub mod gate;
pub mod ports;
pub mod session;
