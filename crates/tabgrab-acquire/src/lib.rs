pub mod client;
pub mod download;
pub mod error;
pub mod locate;
pub mod search;

pub use client::Client;
pub use error::AcquireError;
