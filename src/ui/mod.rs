//! UI module for appointment-chat.
//!
//! This module contains all UI rendering logic including:
//! - Main layout: message list, input box, controls, key hints
//! - Message bubbles
//! - Gradient utilities
//! - Text wrapping

pub mod bubble;
mod gradient;
pub mod render;
pub mod text;

pub use gradient::gradient_color;
pub use render::ui;
