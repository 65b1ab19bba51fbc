//! Modular dashboard implementation
//!
//! Split into state, update logic and rendering components

pub mod components;
pub mod renderer;
pub mod state;
pub mod updaters;
pub mod utils;

pub use renderer::render_dashboard;
pub use state::{DashboardState, DashboardView, LoadState, SessionInfo};
