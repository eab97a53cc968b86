//! Port traits decoupling the domain from I/O.

pub mod broker_port;
pub mod config_port;
pub mod data_port;
