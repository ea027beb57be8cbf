pub mod aggregate;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod error;
pub mod report;

pub use dashboard::Dashboard;
pub use data::{load_dataset, Transaction};
pub use error::{EmptyResultError, ParseError};
