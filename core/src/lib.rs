pub mod catalog;
pub mod codec;
pub mod error;
pub mod log_store;
pub mod models;
pub mod service;
pub mod storage;
pub mod summary;

pub use error::{Result, TrackerError};
