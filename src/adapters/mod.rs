//! Concrete adapter implementations for ports.

pub mod console_broker;
pub mod csv_table_adapter;
pub mod file_config_adapter;
