pub use crate::errors::VgError;

pub mod cli;
pub mod errors;
pub mod filters;
pub mod location;
pub mod signature;
pub mod stream;
pub mod style;
