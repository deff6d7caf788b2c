pub mod config;
pub mod error;
pub mod events;
pub mod types;

pub use config::AbaConfig;
pub use error::{AbaError, Result};
pub use events::{DomainEvent, EventBus};
pub use types::*;
