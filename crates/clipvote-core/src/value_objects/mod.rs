//! Value objects - immutable domain primitives

mod clip_ref;
mod handle;
mod vote;

pub use clip_ref::ClipRef;
pub use handle::Handle;
pub use vote::{RequestedVote, VoteAction, VoteDirection};
