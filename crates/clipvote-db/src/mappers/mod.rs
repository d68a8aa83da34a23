//! Model <-> entity mappers
//!
//! Rows fall back through `TryFrom` because handles and directions are
//! stored as text: values written by this service always parse, but
//! the conversion surfaces corruption instead of panicking.

mod clip;
mod rate_limit;
mod vote;
mod voter_profile;
