pub mod clock;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod labels;
pub mod model;
pub mod records;
pub mod registry;
pub mod schedule;
pub mod temporal;
