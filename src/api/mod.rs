pub mod analyze;
pub mod error;
pub mod health;

pub use error::ApiError;
pub use health::health_handler;
