//! appointment-chat - a terminal chat client for an appointment-scheduling agent.
//!
//! This library exposes the core modules for testing and reuse.

pub mod app;
pub mod backend;
pub mod config;
pub mod conversation;
pub mod input;
pub mod logging;
pub mod message;
pub mod ui;
