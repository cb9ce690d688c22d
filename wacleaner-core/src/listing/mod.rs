mod lister;
mod request;

pub use lister::{Lister, ListingConfig, list_files};
pub use request::{ListingRequest, ListingResult};
