//! # clipvote-core
//!
//! Domain layer for the clip voting service: entities, value objects,
//! domain errors, and the repository traits (ports) the infrastructure
//! layer implements.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types
pub use error::DomainError;
pub use value_objects::{ClipRef, Handle, RequestedVote, VoteAction, VoteDirection};
