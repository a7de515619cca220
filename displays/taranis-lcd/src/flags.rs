//! Composite drawing attributes
//!
//! `LcdFlags` combines the compositing policy (force, erase or toggle), a
//! couple of special cases used by the UI (fill-white, invert, blink) and a
//! 4 bit grey channel stored in bits 16-19.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Solid line pattern
pub const SOLID: u8 = 0xFF;

/// Dotted line pattern (one pixel on, one off)
pub const DOTTED: u8 = 0x55;

/// Bits of the grey channel
pub const COLOUR_MASK: u32 = 0x000F_0000;

const GREY_SHIFT: u32 = 16;

/// Drawing attribute set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LcdFlags(u32);

impl LcdFlags {
    /// Blink: icons are inverted during the "on" half of the blink period
    pub const BLINK: Self = Self(0x01);
    /// Always invert icon source bits
    pub const INVERS: Self = Self(0x02);
    /// Clear the target bits
    pub const ERASE: Self = Self(0x04);
    /// Set the target bits
    pub const FORCE: Self = Self(0x08);
    /// Never touch a nibble that already has a bit set (title bar)
    pub const FILL_WHITE: Self = Self(0x10);

    /// No attributes: toggle the target bits
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Build flags from their raw representation
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Grey level attribute (0 = full intensity, 15 = nothing drawn)
    ///
    /// Levels above 15 are truncated to their low 4 bits.
    pub const fn grey(level: u8) -> Self {
        Self(((level as u32) << GREY_SHIFT) & COLOUR_MASK)
    }

    /// Combine two flag sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether every bit of `other` is set
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Grey level carried in the colour channel
    pub const fn grey_level(self) -> u8 {
        ((self.0 & COLOUR_MASK) >> GREY_SHIFT) as u8
    }

    /// Nibble mask for a pixel on row `y`, narrowed by the grey channel
    ///
    /// Odd rows use the high nibble, even rows the low nibble.
    pub const fn pixel_mask(self, y: i32) -> u8 {
        let colour = self.0 & COLOUR_MASK;
        if y & 1 != 0 {
            0xF0 - (colour >> 12) as u8
        } else {
            0x0F - (colour >> 16) as u8
        }
    }
}

impl BitOr for LcdFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for LcdFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for LcdFlags {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Rotate a stipple pattern right by one, the shifted-out bit re-entering at bit 7
#[inline]
pub(crate) const fn next_pattern(pattern: u8) -> u8 {
    pattern.rotate_right(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_toggle() {
        let flags = LcdFlags::default();
        assert_eq!(flags, LcdFlags::empty());
        assert!(!flags.contains(LcdFlags::FORCE));
        assert!(!flags.contains(LcdFlags::ERASE));
    }

    #[test]
    fn test_combine() {
        let flags = LcdFlags::FORCE | LcdFlags::FILL_WHITE;
        assert!(flags.contains(LcdFlags::FORCE));
        assert!(flags.contains(LcdFlags::FILL_WHITE));
        assert!(!flags.contains(LcdFlags::ERASE));
        assert!(!flags.contains(LcdFlags::FORCE | LcdFlags::ERASE));

        let mut flags = LcdFlags::BLINK;
        flags |= LcdFlags::INVERS;
        assert_eq!(flags.bits(), 0x03);
        assert_eq!(flags & LcdFlags::INVERS, LcdFlags::INVERS);
    }

    #[test]
    fn test_grey_channel() {
        assert_eq!(LcdFlags::grey(0).bits(), 0);
        assert_eq!(LcdFlags::grey(5).bits(), 0x0005_0000);
        assert_eq!(LcdFlags::grey(0x1F).grey_level(), 0x0F);
        assert_eq!((LcdFlags::FORCE | LcdFlags::grey(7)).grey_level(), 7);
    }

    #[test]
    fn test_pixel_mask_full_intensity() {
        let flags = LcdFlags::FORCE;
        assert_eq!(flags.pixel_mask(0), 0x0F);
        assert_eq!(flags.pixel_mask(1), 0xF0);
        assert_eq!(flags.pixel_mask(-1), 0xF0);
    }

    #[test]
    fn test_pixel_mask_grey() {
        let flags = LcdFlags::grey(3);
        assert_eq!(flags.pixel_mask(2), 0x0C);
        assert_eq!(flags.pixel_mask(3), 0xC0);

        let flags = LcdFlags::grey(15);
        assert_eq!(flags.pixel_mask(4), 0x00);
        assert_eq!(flags.pixel_mask(5), 0x00);
    }

    #[test]
    fn test_pattern_rotation() {
        assert_eq!(next_pattern(0x01), 0x80);
        assert_eq!(next_pattern(0x80), 0x40);
        assert_eq!(next_pattern(DOTTED), 0xAA);
        assert_eq!(next_pattern(SOLID), SOLID);
    }
}
