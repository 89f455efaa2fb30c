pub mod candidate;
pub mod job;

pub use candidate::{Candidate, NewCandidate};
pub use job::{Job, NewJob};
