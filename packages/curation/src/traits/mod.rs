//! Core trait abstractions for the curation library.
//!
//! These traits define the seams the pipeline depends on: where raw
//! items come from, which model backend runs inference, and where
//! artifacts and subscribers live.

pub mod inference;
pub mod ingestor;
pub mod store;
