mod executor;
mod progress;

pub use executor::{DeleteConfig, Deleter};
pub use progress::{DeleteMessage, DeleteProgress, DeleteReport};
