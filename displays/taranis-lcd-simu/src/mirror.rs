//! LCD mirror
//!
//! Receives completed frames from the renderer and keeps them for viewers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use taranis_lcd::config::{SettingsError, SETTINGS_MAX_SIZE};
use taranis_lcd::{DisplayBackend, DisplayError, DisplaySettings, DISPLAY_BUF_SIZE, LCD_H, LCD_W};
use tracing::{debug, trace};

/// Characters used for ASCII previews, lightest to darkest
const ASCII_RAMP: &[u8] = b" .:-=+*#%@";

/// Simulated LCD panel
///
/// Holds the last published frame. The refresh flag is raised on every
/// publish and cleared by whoever consumes the frame.
#[derive(Debug)]
pub struct LcdSimulator {
    lcd_buf: Box<[u8]>,
    refresh: Arc<AtomicBool>,
    settings: DisplaySettings,
    ready: bool,
    frames: u64,
}

impl Default for LcdSimulator {
    fn default() -> Self {
        Self::new()
    }
}

impl LcdSimulator {
    /// Create a powered-up panel showing a blank frame
    pub fn new() -> Self {
        Self {
            lcd_buf: vec![0; DISPLAY_BUF_SIZE].into_boxed_slice(),
            refresh: Arc::new(AtomicBool::new(true)),
            settings: DisplaySettings::default(),
            ready: true,
            frames: 0,
        }
    }

    /// Create a panel with persisted settings applied
    pub fn with_settings(settings: DisplaySettings) -> Self {
        Self {
            settings,
            ..Self::new()
        }
    }

    /// Shared handle to the refresh flag, for a viewer thread
    pub fn refresh_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.refresh)
    }

    /// Consume the refresh flag, returning whether a new frame arrived
    pub fn take_refresh(&self) -> bool {
        self.refresh.swap(false, Ordering::AcqRel)
    }

    /// Power the panel down or up; a powered-down panel rejects frames
    pub fn set_powered(&mut self, on: bool) {
        self.ready = on;
    }

    /// Last published frame
    pub fn frame(&self) -> &[u8] {
        &self.lcd_buf
    }

    /// Number of frames published so far
    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    /// Current contrast
    pub fn contrast(&self) -> u8 {
        self.settings.contrast()
    }

    /// Current settings
    pub fn settings(&self) -> DisplaySettings {
        self.settings
    }

    /// Encode the current settings as they would be written to EEPROM
    pub fn store_settings(&self) -> Result<Vec<u8>, SettingsError> {
        let mut buffer = [0u8; SETTINGS_MAX_SIZE];
        let used = self.settings.to_bytes(&mut buffer)?;
        Ok(used.to_vec())
    }

    /// Create a panel from settings read back from EEPROM
    pub fn restore_settings(bytes: &[u8]) -> Result<Self, SettingsError> {
        let settings = DisplaySettings::from_bytes(bytes)?;
        debug!(contrast = settings.contrast(), "Settings restored");
        Ok(Self::with_settings(settings))
    }

    /// Level of pixel `(x, y)` in the last published frame
    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        if x >= LCD_W || y >= LCD_H {
            return None;
        }
        let byte = self.lcd_buf[(y / 2) * LCD_W + x];
        Some(if y & 1 != 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Render the last frame as text, one line per pixel row
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity((LCD_W + 1) * LCD_H);
        for y in 0..LCD_H {
            for x in 0..LCD_W {
                let level = self.pixel(x, y).unwrap_or(0) as usize;
                let idx = level * (ASCII_RAMP.len() - 1) / 15;
                out.push(ASCII_RAMP[idx] as char);
            }
            out.push('\n');
        }
        out
    }
}

impl DisplayBackend for LcdSimulator {
    fn refresh(&mut self, frame: &[u8]) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        if frame.len() != self.lcd_buf.len() {
            debug!(
                expected = self.lcd_buf.len(),
                got = frame.len(),
                "Rejected frame of wrong size"
            );
            return Err(DisplayError::FrameSizeMismatch);
        }

        self.lcd_buf.copy_from_slice(frame);
        self.frames += 1;
        self.refresh.store(true, Ordering::Release);
        trace!(frame = self.frames, "Frame published");
        Ok(())
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        self.settings.set_contrast(contrast);
        debug!(
            requested = contrast,
            applied = self.settings.contrast(),
            "Contrast set"
        );
        Ok(())
    }

    fn dimensions(&self) -> (u16, u16) {
        (LCD_W as u16, LCD_H as u16)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }
}
