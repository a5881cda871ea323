//! Domain data types for the curation pipeline.

pub mod article;
pub mod config;
pub mod subscriber;
