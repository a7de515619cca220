//! Host-side simulation of the Taranis LCD
//!
//! Provides an LCD mirror implementing `DisplayBackend`, which keeps a copy
//! of the last published frame plus a refresh flag that a viewer thread can
//! poll, and a demo frame used by the `lcd-demo` binary.

pub mod demo;
pub mod mirror;

pub use demo::{render_demo_frame, DemoState};
pub use mirror::LcdSimulator;
