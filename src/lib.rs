pub mod api;
pub mod charts;
pub mod comparator;
pub mod config;
pub mod error;
pub mod harness;
pub mod oracle;
pub mod recorder;
pub mod viz;
// cmd and reports are binary modules, declared in main.rs.
