//! Demo frame
//!
//! A small screen exercising every primitive: a title bar, dotted column
//! separators, a blinking icon, a pre-rendered greyscale bitmap and an
//! inverted selection line.

use embedded_graphics::mono_font::ascii::FONT_5X8;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::{Gray4, GrayColor};
use embedded_graphics::prelude::Point;
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use taranis_lcd::{BlinkTimer, LcdFlags, TaranisFramebuffer, DOTTED, LCD_W, SOLID};

/// 7x8 battery icon, two frames (full, empty)
pub const BATTERY_ICON: [u8; 16] = [
    7, 8, //
    0x7E, 0x7E, 0x7E, 0x7E, 0x7E, 0x42, 0x18, // full
    0x7E, 0x42, 0x42, 0x42, 0x42, 0x7E, 0x18, // empty
];

/// 8x4 horizontal grey ramp in display packing
pub const GRADIENT_BITMAP: [u8; 18] = [
    8, 4, //
    0x00, 0x22, 0x44, 0x66, 0x88, 0xAA, 0xCC, 0xFF, //
    0x00, 0x22, 0x44, 0x66, 0x88, 0xAA, 0xCC, 0xFF,
];

/// Height of the title bar in pixels
const TITLE_HEIGHT: i32 = 8;

/// Column of the dotted separator
const SEPARATOR_X: i32 = LCD_W as i32 / 2;

/// State carried from frame to frame
#[derive(Debug, Clone, Default)]
pub struct DemoState {
    /// Blink timer, advanced by the frame loop
    pub blink: BlinkTimer,
    /// Selected menu line (text line index, 1-based below the title)
    pub selected_line: usize,
    /// Battery low warning
    pub battery_low: bool,
}

/// Draw one complete demo frame
pub fn render_demo_frame(fb: &mut TaranisFramebuffer, state: &DemoState) {
    fb.clear();
    fb.set_blink_phase(state.blink.is_on_phase());

    let style = MonoTextStyle::new(&FONT_5X8, Gray4::WHITE);
    Text::with_baseline("TARANIS", Point::new(2, 0), style, Baseline::Top)
        .draw(fb)
        .ok();

    // Title bar background, leaving the text untouched
    for y in 0..TITLE_HEIGHT {
        fb.hline(
            0,
            y,
            LCD_W as i32,
            SOLID,
            LcdFlags::FORCE | LcdFlags::FILL_WHITE | LcdFlags::grey(10),
        );
    }

    let battery_flags = if state.battery_low {
        LcdFlags::BLINK
    } else {
        LcdFlags::empty()
    };
    let battery_frame = usize::from(state.battery_low);
    fb.draw_icon(
        LCD_W as i32 - 9,
        0,
        &BATTERY_ICON,
        battery_frame,
        battery_flags,
    );

    fb.vline(SEPARATOR_X, TITLE_HEIGHT, 64, DOTTED, LcdFlags::FORCE);

    let menu = ["Model", "Mixer", "Outputs", "Telemetry"];
    for (i, entry) in menu.iter().enumerate() {
        let top = TITLE_HEIGHT * (i as i32 + 1);
        Text::with_baseline(entry, Point::new(2, top), style, Baseline::Top)
            .draw(fb)
            .ok();
    }

    fb.draw_bitmap(SEPARATOR_X + 8, TITLE_HEIGHT + 3, &GRADIENT_BITMAP, 0, 0);
    fb.hline(SEPARATOR_X + 8, TITLE_HEIGHT + 8, 40, 0x33, LcdFlags::FORCE);

    if (1..TaranisFramebuffer::LINES).contains(&state.selected_line) {
        fb.invert_line_unchecked(state.selected_line);
    }
}
