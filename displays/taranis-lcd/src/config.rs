//! Display geometry and persisted display settings
//!
//! Geometry is fixed at compile time for the target panel. The only
//! runtime setting is the LCD contrast, which is stored in EEPROM as
//! postcard-serialized data when the `serde` feature is enabled.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Panel width in pixels
pub const LCD_W: usize = 212;

/// Panel height in pixels
pub const LCD_H: usize = 64;

/// Size of the packed display buffer in bytes (two pixels per byte)
pub const DISPLAY_BUF_SIZE: usize = (LCD_H / 2) * LCD_W;

/// Height of one text line in pixels
pub const FONT_HEIGHT: usize = 8;

/// Number of text lines on the panel
pub const LCD_LINES: usize = LCD_H / FONT_HEIGHT;

/// Lowest accepted contrast value
pub const CONTRAST_MIN: u8 = 10;

/// Highest accepted contrast value
pub const CONTRAST_MAX: u8 = 45;

/// Factory contrast
pub const CONTRAST_DEFAULT: u8 = 25;

/// Maximum size of encoded settings
pub const SETTINGS_MAX_SIZE: usize = 8;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Output buffer too small or serializer failure
    Encode,
    /// Stored bytes are not valid settings
    Decode,
}

impl core::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Encode => f.write_str("failed to encode display settings"),
            Self::Decode => f.write_str("stored display settings are invalid"),
        }
    }
}

impl core::error::Error for SettingsError {}

/// Runtime display settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplaySettings {
    /// LCD reference voltage / contrast
    contrast: u8,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self::new(CONTRAST_DEFAULT)
    }
}

impl DisplaySettings {
    /// Create settings, clamping contrast to the accepted range
    pub const fn new(contrast: u8) -> Self {
        Self {
            contrast: clamp_contrast(contrast),
        }
    }

    /// Current contrast
    pub const fn contrast(&self) -> u8 {
        self.contrast
    }

    /// Update contrast (clamped)
    pub fn set_contrast(&mut self, contrast: u8) {
        self.contrast = clamp_contrast(contrast);
    }

    /// Serialize into `buffer`, returning the used prefix
    #[cfg(feature = "serde")]
    pub fn to_bytes<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a mut [u8], SettingsError> {
        postcard::to_slice(self, buffer).map_err(|_| SettingsError::Encode)
    }

    /// Deserialize settings read back from storage
    ///
    /// Out-of-range contrast values (e.g. from an older layout) are clamped.
    #[cfg(feature = "serde")]
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SettingsError> {
        let raw: Self = postcard::from_bytes(bytes).map_err(|_| SettingsError::Decode)?;
        Ok(Self::new(raw.contrast))
    }
}

const fn clamp_contrast(contrast: u8) -> u8 {
    if contrast < CONTRAST_MIN {
        CONTRAST_MIN
    } else if contrast > CONTRAST_MAX {
        CONTRAST_MAX
    } else {
        contrast
    }
}
