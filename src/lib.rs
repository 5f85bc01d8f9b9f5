//! Lead Scout — guided lead-discovery workflow core.

pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod parse;
pub mod search;
pub mod session;
pub mod suggest;
pub mod workflow;
