//! Display backend trait
//!
//! Defines the frame-publish interface between the renderer and whatever
//! moves a finished frame to the panel (SPI transfer, simulator mirror).

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Frame length does not match the panel's buffer size
    FrameSizeMismatch,
    /// Display not initialized
    NotInitialized,
}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => f.write_str("display communication error"),
            Self::FrameSizeMismatch => f.write_str("frame size does not match display buffer"),
            Self::NotInitialized => f.write_str("display not initialized"),
        }
    }
}

impl core::error::Error for DisplayError {}

/// Display backend trait
///
/// A backend receives complete frames only. The renderer never hands over a
/// buffer while it is still drawing into it.
pub trait DisplayBackend {
    /// Transfer a complete packed frame
    fn refresh(&mut self, frame: &[u8]) -> Result<(), DisplayError>;

    /// Set the LCD reference voltage / contrast
    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError>;

    /// Get the panel dimensions
    ///
    /// Returns (width, height) in pixels
    fn dimensions(&self) -> (u16, u16);

    /// Check if the display is ready
    fn is_ready(&self) -> bool;
}
