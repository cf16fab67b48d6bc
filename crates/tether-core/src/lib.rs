mod error;
pub use error::{Error, IntoError};

pub mod schema;
pub use schema::{Builder, Registry, Resolver, Schema};

/// A Result type alias that uses tether's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
