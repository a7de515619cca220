//! Packed 4bpp framebuffer and its drawing primitives
//!
//! The buffer is stored as `ROWS` row-pairs of `W` bytes. Byte `x` of
//! row-pair `r` holds pixel `(x, 2r)` in bits 0-3 and pixel `(x, 2r + 1)` in
//! bits 4-7.

use crate::backend::{DisplayBackend, DisplayError};
use crate::flags::{next_pattern, LcdFlags, DOTTED};

/// Row-pairs covered by one text line (8 pixel rows)
const LINE_ROW_PAIRS: usize = 4;

/// Packed greyscale framebuffer
///
/// `W` is the width in pixels and `ROWS` the number of row-pairs, so the
/// panel height is `2 * ROWS`.
#[derive(Clone, PartialEq, Eq)]
pub struct Framebuffer<const W: usize, const ROWS: usize> {
    rows: [[u8; W]; ROWS],
    /// Blink phase used by `draw_icon` for `LcdFlags::BLINK`
    blink_on: bool,
}

impl<const W: usize, const ROWS: usize> Default for Framebuffer<W, ROWS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const ROWS: usize> core::fmt::Debug for Framebuffer<W, ROWS> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &W)
            .field("height", &Self::HEIGHT)
            .field("blink_on", &self.blink_on)
            .finish_non_exhaustive()
    }
}

impl<const W: usize, const ROWS: usize> Framebuffer<W, ROWS> {
    /// Width in pixels
    pub const WIDTH: usize = W;
    /// Height in pixels
    pub const HEIGHT: usize = ROWS * 2;
    /// Buffer size in bytes
    pub const SIZE: usize = W * ROWS;
    /// Number of 8 pixel text lines
    pub const LINES: usize = ROWS / LINE_ROW_PAIRS;

    /// Create a cleared framebuffer
    pub const fn new() -> Self {
        Self {
            rows: [[0; W]; ROWS],
            blink_on: false,
        }
    }

    /// Clear every pixel
    pub fn clear(&mut self) {
        for row in self.rows.iter_mut() {
            row.fill(0);
        }
    }

    /// Packed buffer contents, row-pair major
    pub fn as_bytes(&self) -> &[u8] {
        self.rows.as_flattened()
    }

    /// Mutable access to the packed buffer
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.rows.as_flattened_mut()
    }

    /// Set the blink phase for the frame being drawn
    pub fn set_blink_phase(&mut self, on: bool) {
        self.blink_on = on;
    }

    /// Current blink phase
    pub const fn blink_phase(&self) -> bool {
        self.blink_on
    }

    #[inline]
    fn contains(x: i32, y: i32) -> bool {
        x >= 0 && (x as usize) < W && y >= 0 && (y as usize) < Self::HEIGHT
    }

    /// Byte offset of pixel `(x, y)`; caller guarantees it is in range
    #[inline]
    fn offset(x: usize, y: usize) -> usize {
        (y / 2) * W + x
    }

    /// Combine `mask` into the byte at `offset`
    ///
    /// FORCE sets the masked bits, ERASE clears them, anything else toggles
    /// them. With FILL_WHITE, a nibble that already has any bit set is left
    /// untouched. Offsets past the end of the buffer are ignored.
    pub fn apply_mask(&mut self, offset: usize, mask: u8, flags: LcdFlags) {
        let Some(byte) = self.as_bytes_mut().get_mut(offset) else {
            return;
        };

        let mut mask = mask;
        if flags.contains(LcdFlags::FILL_WHITE) {
            if *byte & 0x0F != 0 {
                mask &= 0xF0;
            }
            if *byte & 0xF0 != 0 {
                mask &= 0x0F;
            }
        }

        if flags.contains(LcdFlags::FORCE) {
            *byte |= mask;
        } else if flags.contains(LcdFlags::ERASE) {
            *byte &= !mask;
        } else {
            *byte ^= mask;
        }
    }

    /// Draw a single pixel
    ///
    /// Coordinates outside the panel are ignored.
    pub fn plot(&mut self, x: i32, y: i32, flags: LcdFlags) {
        if !Self::contains(x, y) {
            return;
        }
        let offset = Self::offset(x as usize, y as usize);
        self.apply_mask(offset, flags.pixel_mask(y), flags);
    }

    /// Read back the 4 bit value of a pixel
    pub fn pixel(&self, x: i32, y: i32) -> Option<u8> {
        if !Self::contains(x, y) {
            return None;
        }
        let byte = self.as_bytes()[Self::offset(x as usize, y as usize)];
        Some(if y & 1 != 0 { byte >> 4 } else { byte & 0x0F })
    }

    /// Overwrite a pixel with an exact 4 bit level
    pub fn set_pixel(&mut self, x: i32, y: i32, level: u8) {
        if !Self::contains(x, y) {
            return;
        }
        let offset = Self::offset(x as usize, y as usize);
        let shift = if y & 1 != 0 { 4 } else { 0 };
        self.apply_mask(offset, 0x0F << shift, LcdFlags::ERASE);
        self.apply_mask(offset, (level & 0x0F) << shift, LcdFlags::FORCE);
    }

    /// Draw a horizontal stippled line of `w` pixels starting at `(x, y)`
    ///
    /// Bit 0 of `pattern` decides whether the current pixel is drawn; the
    /// pattern is rotated right after every pixel. The span is truncated at
    /// the right edge. Pixels left of column 0 are skipped but still consume
    /// pattern bits.
    pub fn hline(&mut self, x: i32, y: i32, w: i32, pattern: u8, flags: LcdFlags) {
        if y < 0 || y as usize >= Self::HEIGHT || w <= 0 {
            return;
        }

        let mut x = i64::from(x);
        let mut w = i64::from(w);
        let mut pattern = pattern;

        if x < 0 {
            let skipped = (-x).min(w);
            pattern = pattern.rotate_right((skipped % 8) as u32);
            w -= skipped;
            x = 0;
        }

        let width = W as i64;
        if w <= 0 || x >= width {
            return;
        }
        if x + w > width {
            w = width - x;
        }

        let mask = flags.pixel_mask(y);
        let start = Self::offset(x as usize, y as usize);
        for offset in start..start + w as usize {
            if pattern & 1 != 0 {
                self.apply_mask(offset, mask, flags);
            }
            pattern = next_pattern(pattern);
        }
    }

    /// Draw a vertical stippled line of `h` pixels starting at `(x, y)`
    ///
    /// A negative `h` extends upwards from `y`. The line is clipped to the
    /// panel. A `DOTTED` pattern is phase-locked to odd rows so dotted
    /// lines stay aligned however they are clipped or split.
    pub fn vline(&mut self, x: i32, y: i32, h: i32, pattern: u8, flags: LcdFlags) {
        if x < 0 || x as usize >= W {
            return;
        }

        let mut y = i64::from(y);
        let mut h = i64::from(h);
        if h < 0 {
            y += h;
            h = -h;
        }
        if y < 0 {
            h += y;
            y = 0;
        }

        let height = Self::HEIGHT as i64;
        if h <= 0 || y >= height {
            return;
        }
        if y + h > height {
            h = height - y;
        }

        let mut pattern = pattern;
        if pattern == DOTTED && y % 2 == 0 {
            pattern = !pattern;
        }

        for row in y..y + h {
            if pattern & 1 != 0 {
                self.plot(x, row as i32, flags);
            }
            pattern = next_pattern(pattern);
        }
    }

    /// Invert every pixel of text line `line` (8 pixel rows)
    ///
    /// No clipping is performed: `line` must be below `Self::LINES`. An
    /// out-of-range line is a caller bug and panics on the slice index.
    pub fn invert_line_unchecked(&mut self, line: usize) {
        let first = line * LINE_ROW_PAIRS;
        for row in self.rows[first..first + LINE_ROW_PAIRS].iter_mut() {
            for byte in row.iter_mut() {
                *byte ^= 0xFF;
            }
        }
    }

    /// Hand the completed frame to a display backend
    pub fn publish<B: DisplayBackend>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.refresh(self.as_bytes())
    }
}
