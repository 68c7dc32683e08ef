//! Dashboard component modules
//!
//! Contains all individual rendering components

pub mod details;
pub mod footer;
pub mod header;
pub mod logs;
pub mod modules;
pub mod overlay;
pub mod tree;
