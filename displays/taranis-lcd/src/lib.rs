//! Packed greyscale framebuffer renderer for the Taranis LCD
//!
//! This crate provides:
//! - `Framebuffer` owning a 4 bit per pixel buffer, two pixels per byte
//! - Masking, point, stippled line and text-line inversion primitives
//! - Icon (1bpp, multi-frame) and pre-rendered bitmap (4bpp) drawing
//! - `LcdFlags` composite attributes (force, erase, fill-white, invert, blink, grey)
//! - `DisplayBackend` trait used to publish a completed frame
//!
//! # Buffer layout
//!
//! ```text
//!            x = 0      x = 1      x = W-1
//! row-pair 0 [y1 | y0] [y1 | y0] .. [y1 | y0]
//! row-pair 1 [y3 | y2] [y3 | y2] .. [y3 | y2]
//!            bits 7-4 / bits 3-0
//! ```
//!
//! Even rows live in the low nibble, odd rows in the high nibble. Every
//! drawing primitive clips against the buffer and silently drops anything
//! outside it; none of them return errors.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod blink;
pub mod config;
pub mod flags;
pub mod framebuffer;
#[cfg(feature = "graphics")]
pub mod graphics;
pub mod image;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use blink::BlinkTimer;
pub use config::{DisplaySettings, DISPLAY_BUF_SIZE, LCD_H, LCD_LINES, LCD_W};
pub use flags::{LcdFlags, DOTTED, SOLID};
pub use framebuffer::Framebuffer;
pub use image::{Bitmap, Icon, ImageError};

/// Framebuffer sized for the Taranis 212x64 panel
pub type TaranisFramebuffer = Framebuffer<LCD_W, { LCD_H / 2 }>;
