//! Creating and listing candidates and jobs.

pub mod handlers;
pub mod service;
