pub mod client;
pub mod districts;
pub mod error;
pub mod extract;
pub mod listing;
pub mod outcome;
pub mod pagination;
pub mod profile;
pub mod qa;
mod retry;
pub mod reviews;

pub use client::DirectoryClient;
pub use error::ScrapeError;
pub use listing::ListingWalker;
pub use outcome::ParseOutcome;
pub use profile::{aggregate, resolve_record};
