//! Recon screen: MVI state machine, controller, and terminal presentation.

pub mod app;
pub mod controller;
pub mod mvi;
pub mod recon;
pub mod render;
pub mod theme;
