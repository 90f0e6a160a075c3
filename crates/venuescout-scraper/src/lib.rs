pub mod client;
pub mod error;
pub mod phone;

pub use client::{PageClient, PhoneLookup};
pub use error::ScraperError;
pub use phone::extract_phone;
