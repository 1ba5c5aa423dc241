pub mod error;
pub mod logger;
pub mod server;

#[cfg(test)]
mod tests;

pub use error::{Result, ServerError};
pub use server::{Server, session_limits};
