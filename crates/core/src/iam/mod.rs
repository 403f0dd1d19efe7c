//! Identity and access management ports

pub mod ports;
