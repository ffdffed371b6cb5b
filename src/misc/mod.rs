//! Sequence utilities
mod convergent_seq;

pub use convergent_seq::*;
