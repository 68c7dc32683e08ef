//! Modular dashboard implementation
//!
//! State, key handling, outcome updaters and rendering live in separate modules

pub mod components;
pub mod input;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

// Re-export main types and functions for external use
pub use renderer::render_dashboard;
pub use state::{DashboardState, Intent, Outcome};
