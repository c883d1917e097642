//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`layout`]: Screen regions, soft wrapping and hit-testing
//! - [`toolbar`]: Toolbar buttons and their actions
//! - [`style`]: Theming and colors

pub mod layout;
pub mod style;
pub mod toolbar;

mod overlays;
mod render;
mod status;

pub use render::render;

#[cfg(test)]
mod tests;
