pub mod cache;
pub mod client;
pub mod error;
pub mod operation;
pub mod response;
