//! Shared utilities

pub mod id_generator;
