mod client;
mod error;
mod file;
mod types;

pub use client::{FlightSource, SantaApi, DEFAULT_INFO_URL};
pub use error::ApiError;
pub use file::SavedResponses;
