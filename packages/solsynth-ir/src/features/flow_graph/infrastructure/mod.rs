//! Flow Graph infrastructure

pub mod cfg_builder;

pub use cfg_builder::{display_name, CfgBuilder, ENTRY_SUFFIX, ERROR_EXIT_SUFFIX, SUCCESS_EXIT_SUFFIX};
