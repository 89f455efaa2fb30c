//! Scoring stored candidates against stored jobs, one pair or ranked lists.

pub mod bulk;
pub mod handlers;
pub mod service;
