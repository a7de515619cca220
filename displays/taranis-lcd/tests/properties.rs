//! Clipping and packing properties of the drawing primitives

use proptest::prelude::*;
use taranis_lcd::{LcdFlags, TaranisFramebuffer, DOTTED, LCD_H, LCD_W, SOLID};

const W: i32 = LCD_W as i32;
const H: i32 = LCD_H as i32;

fn any_flags() -> impl Strategy<Value = LcdFlags> {
    (0u32..0x20, 0u8..16).prop_map(|(bits, grey)| LcdFlags::from_bits(bits) | LcdFlags::grey(grey))
}

fn outside_panel() -> impl Strategy<Value = (i32, i32)> {
    prop_oneof![
        (-1000..0, -1000..1000),
        (W..W + 1000, -1000..1000),
        (-1000..1000, -1000..0),
        (-1000..1000, H..H + 1000),
    ]
}

/// Unpack the buffer into one level per pixel
fn unpack(fb: &TaranisFramebuffer) -> Vec<u8> {
    (0..H)
        .flat_map(|y| (0..W).map(move |x| (x, y)))
        .map(|(x, y)| fb.pixel(x, y).unwrap())
        .collect()
}

proptest! {
    #[test]
    fn plot_outside_panel_is_noop((x, y) in outside_panel(), flags in any_flags()) {
        let mut fb = TaranisFramebuffer::new();
        fb.hline(0, 3, W, 0x5A, LcdFlags::FORCE);
        let before = fb.clone();

        fb.plot(x, y, flags);
        prop_assert!(fb == before);
    }

    #[test]
    fn plot_never_leaks_into_neighbour_nibble(
        x in 0..W,
        y in 0..H,
        grey in 0u8..16,
        neighbour in 0u8..16,
    ) {
        let mut fb = TaranisFramebuffer::new();
        let other = y ^ 1;
        fb.set_pixel(x, other, neighbour);

        fb.plot(x, y, LcdFlags::FORCE | LcdFlags::grey(grey));
        prop_assert_eq!(fb.pixel(x, other), Some(neighbour));
        fb.plot(x, y, LcdFlags::ERASE);
        prop_assert_eq!(fb.pixel(x, y), Some(0));
        prop_assert_eq!(fb.pixel(x, other), Some(neighbour));
        fb.plot(x, y, LcdFlags::FORCE);
        prop_assert_eq!(fb.pixel(x, y), Some(0x0F));
        prop_assert_eq!(fb.pixel(x, other), Some(neighbour));

        let bytes_touched = fb
            .as_bytes()
            .iter()
            .filter(|&&b| b != 0)
            .count();
        prop_assert_eq!(bytes_touched, 1);
    }

    #[test]
    fn hline_solid_draws_exactly_width(x in 0..W, y in 0..H, w in 1..W * 2) {
        let mut fb = TaranisFramebuffer::new();
        fb.hline(x, y, w, SOLID, LcdFlags::FORCE);

        let expected = w.min(W - x);
        let lit: Vec<i32> = (0..W).filter(|&px| fb.pixel(px, y) == Some(0x0F)).collect();
        prop_assert_eq!(lit.len() as i32, expected);
        prop_assert_eq!(lit[0], x);
        prop_assert_eq!(*lit.last().unwrap(), x + expected - 1);
    }

    #[test]
    fn hline_alternating_phase_follows_start(x in 0..W, y in 0..H, w in 1..64i32) {
        let mut fb = TaranisFramebuffer::new();
        fb.hline(x, y, w, 0b1010_1010, LcdFlags::FORCE);

        for px in x..(x + w).min(W) {
            let drawn = fb.pixel(px, y) == Some(0x0F);
            prop_assert_eq!(drawn, (px - x) % 2 == 1, "pixel {}", px);
        }
    }

    #[test]
    fn vline_negative_height_matches_normalised(
        x in 0..W,
        y in -20..H + 20,
        h in 1..H + 20,
        pattern in any::<u8>(),
    ) {
        let mut up = TaranisFramebuffer::new();
        up.vline(x, y, -h, pattern, LcdFlags::FORCE);

        let mut down = TaranisFramebuffer::new();
        down.vline(x, y - h, h, pattern, LcdFlags::FORCE);

        prop_assert!(up == down);
    }

    #[test]
    fn vline_dotted_split_matches_single(
        x in 0..W,
        top in -8..H,
        first in 0..40i32,
        second in 0..40i32,
    ) {
        let split = top + first;
        let bottom = split + second;

        let mut whole = TaranisFramebuffer::new();
        whole.vline(x, top, bottom - top, DOTTED, LcdFlags::FORCE);

        let mut parts = TaranisFramebuffer::new();
        parts.vline(x, top, split - top, DOTTED, LcdFlags::FORCE);
        parts.vline(x, split, bottom - split, DOTTED, LcdFlags::FORCE);

        prop_assert!(whole == parts);
    }

    #[test]
    fn bitmap_odd_row_matches_even_row_shifted(
        x in 0..W - 4,
        row_pair in 0..(H / 2 - 3),
        cells in any::<[u8; 8]>(),
    ) {
        let mut data = vec![4u8, 4];
        data.extend_from_slice(&cells);

        let y = row_pair * 2;
        let mut even = TaranisFramebuffer::new();
        even.draw_bitmap(x, y, &data, 0, 0);
        let mut odd = TaranisFramebuffer::new();
        odd.draw_bitmap(x, y + 1, &data, 0, 0);

        for dy in 0..4 {
            for dx in 0..4 {
                prop_assert_eq!(even.pixel(x + dx, y + dy), odd.pixel(x + dx, y + dy + 1));
            }
        }
    }
}

#[test]
fn hline_past_right_edge_is_truncated() {
    let mut fb = TaranisFramebuffer::new();
    fb.hline(0, 0, W + 5, SOLID, LcdFlags::FORCE);

    let pixels = unpack(&fb);
    assert_eq!(pixels.iter().filter(|&&p| p == 0x0F).count(), LCD_W);
    assert!(pixels[..LCD_W].iter().all(|&p| p == 0x0F));
}

#[test]
fn plot_negative_coordinates_leave_buffer_identical() {
    let mut fb = TaranisFramebuffer::new();
    fb.plot(0, 0, LcdFlags::FORCE);
    let before = fb.clone();

    fb.plot(-1, 0, LcdFlags::FORCE);
    fb.plot(0, -1, LcdFlags::FORCE);
    assert_eq!(fb.as_bytes(), before.as_bytes());
}

#[test]
fn checkerboard_bitmap_even_and_odd_rows() {
    // 2x2 checkerboard: (0,0) and (1,1) dark
    let checkerboard = [2u8, 2, 0x0F, 0xF0];

    let mut even = TaranisFramebuffer::new();
    even.draw_bitmap(10, 0, &checkerboard, 0, 0);
    assert_eq!(&even.as_bytes()[10..12], &checkerboard[2..]);

    let mut odd = TaranisFramebuffer::new();
    odd.draw_bitmap(10, 1, &checkerboard, 0, 0);

    // Same pixels one row lower, split across two row-pairs
    assert_eq!(&odd.as_bytes()[10..12], &[0xF0, 0x00]);
    assert_eq!(&odd.as_bytes()[LCD_W + 10..LCD_W + 12], &[0x00, 0x0F]);

    for dy in 0..2 {
        for dx in 0..2 {
            assert_eq!(
                even.pixel(10 + dx, dy),
                odd.pixel(10 + dx, dy + 1),
                "pixel ({}, {})",
                dx,
                dy
            );
        }
    }
}

#[test]
fn icon_and_invert_line_compose() {
    // 8x8 solid block
    let mut icon = vec![8u8, 8];
    icon.extend_from_slice(&[0xFF; 8]);

    let mut fb = TaranisFramebuffer::new();
    fb.draw_icon(0, 0, &icon, 0, LcdFlags::empty());
    fb.invert_line_unchecked(0);

    let pixels = unpack(&fb);
    for y in 0..8 {
        for x in 0..W {
            let expected = if x < 8 { 0 } else { 0x0F };
            assert_eq!(pixels[(y * W + x) as usize], expected);
        }
    }
    assert!(pixels[8 * LCD_W..].iter().all(|&p| p == 0));
}
