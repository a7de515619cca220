//! `embedded-graphics` integration
//!
//! Lets text, shapes and images from the embedded-graphics ecosystem be
//! drawn into the packed framebuffer. Pixels are written with their exact
//! `Gray4` luma; the compositing flags do not apply here.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Gray4, GrayColor};
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Size};

use crate::framebuffer::Framebuffer;

impl<const W: usize, const ROWS: usize> OriginDimensions for Framebuffer<W, ROWS> {
    fn size(&self) -> Size {
        Size::new(W as u32, Self::HEIGHT as u32)
    }
}

impl<const W: usize, const ROWS: usize> DrawTarget for Framebuffer<W, ROWS> {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.luma());
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let level = color.luma() & 0x0F;
        self.as_bytes_mut().fill(level | (level << 4));
        Ok(())
    }
}
