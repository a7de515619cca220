//! Icon and bitmap source formats
//!
//! Icons are 1 bit per pixel, stored as vertical 8 pixel strips:
//! ```text
//! ┌───────┬────────┬──────────────────────────────────────────┐
//! │ WIDTH │ HEIGHT │ FRAME 0 │ FRAME 1 │ ...                    │
//! │ 1B    │ 1B     │ w * ceil(h/8) bytes per frame            │
//! └───────┴────────┴──────────────────────────────────────────┘
//! ```
//! Within a frame, strip `s` column `c` is byte `s * w + c`; bit `k` of it
//! is pixel `(c, s * 8 + k)`.
//!
//! Bitmaps are pre-rendered in the display's own packing: `ceil(h/2)` rows
//! of `w` bytes, each byte holding two vertically adjacent pixels.

use crate::flags::LcdFlags;
use crate::framebuffer::Framebuffer;

/// Size of the width/height header
const HEADER_LEN: usize = 2;

/// Image parsing errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ImageError {
    /// Fewer than two bytes, no width/height header
    MissingHeader,
    /// Data shorter than the header announces
    Truncated,
}

/// Multi-frame 1bpp icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Icon<'a> {
    width: u8,
    height: u8,
    data: &'a [u8],
}

impl<'a> Icon<'a> {
    /// Parse an icon, requiring at least one complete frame
    pub fn parse(data: &'a [u8]) -> Result<Self, ImageError> {
        let (&[width, height], frames) = split_header(data)?;
        let icon = Self {
            width,
            height,
            data: frames,
        };
        if icon.frame_len() == 0 || icon.frame_count() == 0 {
            return Err(ImageError::Truncated);
        }
        Ok(icon)
    }

    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of 8 pixel strips per frame
    pub const fn strips(&self) -> usize {
        (self.height as usize + 7) / 8
    }

    /// Bytes per frame
    pub const fn frame_len(&self) -> usize {
        self.width as usize * self.strips()
    }

    /// Number of complete frames in the data
    pub fn frame_count(&self) -> usize {
        self.data.len().checked_div(self.frame_len()).unwrap_or(0)
    }

    /// Data of frame `index`, if complete
    pub fn frame(&self, index: usize) -> Option<&'a [u8]> {
        let len = self.frame_len();
        let start = index.checked_mul(len)?;
        self.data.get(start..start.checked_add(len)?)
    }
}

/// Pre-rendered 4bpp bitmap in display packing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Bitmap<'a> {
    width: u8,
    height: u8,
    data: &'a [u8],
}

impl<'a> Bitmap<'a> {
    /// Parse a bitmap, requiring every packed row to be present
    pub fn parse(data: &'a [u8]) -> Result<Self, ImageError> {
        let bitmap = Self::parse_header(data)?;
        if bitmap.data.len() < bitmap.packed_rows() * bitmap.width as usize {
            return Err(ImageError::Truncated);
        }
        Ok(bitmap)
    }

    /// Parse only the header; rows may be short
    fn parse_header(data: &'a [u8]) -> Result<Self, ImageError> {
        let (&[width, height], rows) = split_header(data)?;
        Ok(Self {
            width,
            height,
            data: rows,
        })
    }

    /// Width in pixels
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Height in pixels
    pub const fn height(&self) -> u8 {
        self.height
    }

    /// Number of packed rows (row-pairs)
    pub const fn packed_rows(&self) -> usize {
        (self.height as usize + 1) / 2
    }

    /// Bytes of packed row `row` from column `offset`, at most `len` long
    ///
    /// Shorter (or empty) if the data ends early.
    pub fn row(&self, row: usize, offset: usize, len: usize) -> &'a [u8] {
        let start = row * self.width as usize + offset;
        let end = (start + len).min(self.data.len());
        self.data.get(start..end).unwrap_or(&[])
    }
}

fn split_header(data: &[u8]) -> Result<(&[u8; HEADER_LEN], &[u8]), ImageError> {
    let (header, rest) = data
        .split_first_chunk::<HEADER_LEN>()
        .ok_or(ImageError::MissingHeader)?;
    Ok((header, rest))
}

impl<const W: usize, const ROWS: usize> Framebuffer<W, ROWS> {
    /// Draw frame `index` of a 1bpp icon with its top-left corner at `(x, y)`
    ///
    /// Source bits are inverted with `INVERS`, or with `BLINK` during the on
    /// phase. Set bits toggle the destination pixel; every bit of the last
    /// strip is drawn, so unused bits must be zero in the source. Malformed
    /// data or a missing frame draws nothing.
    pub fn draw_icon(&mut self, x: i32, y: i32, data: &[u8], index: usize, flags: LcdFlags) {
        let Ok(icon) = Icon::parse(data) else {
            return;
        };
        let Some(frame) = icon.frame(index) else {
            return;
        };

        let invert = flags.contains(LcdFlags::INVERS)
            || (flags.contains(LcdFlags::BLINK) && self.blink_phase());

        let width = icon.width() as usize;
        for (strip, columns) in frame.chunks_exact(width).enumerate() {
            let top = y.saturating_add(strip as i32 * 8);
            for (col, &byte) in columns.iter().enumerate() {
                let bits = if invert { !byte } else { byte };
                for bit in 0..8 {
                    if bits & (1 << bit) != 0 {
                        self.plot(
                            x.saturating_add(col as i32),
                            top.saturating_add(bit),
                            LcdFlags::empty(),
                        );
                    }
                }
            }
        }
    }

    /// Copy a pre-rendered bitmap with its top-left corner at `(x, y)`
    ///
    /// `offset` skips source columns and `width` limits the copied columns
    /// (0 means the full bitmap width). At an even `y` source bytes are
    /// copied as-is; at an odd `y` every source byte is split across two
    /// destination row-pairs. The blit stops at the end of the buffer.
    pub fn draw_bitmap(&mut self, x: i32, y: i32, data: &[u8], offset: usize, width: usize) {
        let Ok(bitmap) = Bitmap::parse_header(data) else {
            return;
        };
        if y < 0 {
            return;
        }

        let native = bitmap.width() as usize;
        let mut offset = offset;
        let mut width = if width == 0 || width > native {
            native
        } else {
            width
        };

        let mut x = i64::from(x);
        if x < 0 {
            let skipped = usize::try_from(-x).unwrap_or(usize::MAX);
            offset = offset.saturating_add(skipped);
            width = width.saturating_sub(skipped);
            x = 0;
        }
        if width == 0 {
            return;
        }
        if offset >= native {
            return;
        }
        width = width.min(native - offset);

        let x = x as usize;
        if x >= W {
            return;
        }
        width = width.min(W - x);

        let y = y as usize;
        let odd = y & 1 != 0;
        for row in 0..bitmap.packed_rows() {
            let start = (row + y / 2) * W + x;
            for (i, &src) in bitmap.row(row, offset, width).iter().enumerate() {
                let dst = start + i;
                if dst >= Self::SIZE {
                    return;
                }
                let bytes = self.as_bytes_mut();
                if odd {
                    bytes[dst] = (bytes[dst] & 0x0F) | ((src & 0x0F) << 4);
                    if let Some(below) = bytes.get_mut(dst + W) {
                        *below = (*below & 0xF0) | (src >> 4);
                    }
                } else {
                    bytes[dst] = src;
                }
            }
        }
    }
}
