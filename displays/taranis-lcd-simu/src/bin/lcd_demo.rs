//! Frame-loop demo
//!
//! Draws the demo screen for a number of refresh cycles, publishes each
//! frame to the simulated LCD and prints the last one as ASCII.

use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Parser;
use taranis_lcd::{DisplayBackend, TaranisFramebuffer};
use taranis_lcd_simu::{render_demo_frame, DemoState, LcdSimulator};
use tracing::info;
use tracing::metadata::LevelFilter;

/// Refresh period of the frame loop
const FRAME_PERIOD_MS: u32 = 100;

#[derive(Debug, Parser)]
struct Args {
    /// Number of frames to render
    #[arg(long, default_value_t = 10)]
    frames: u32,
    /// LCD contrast, overriding the stored value
    #[arg(long)]
    contrast: Option<u8>,
    /// File standing in for the settings EEPROM
    #[arg(long)]
    eeprom: Option<PathBuf>,
    /// Selected menu line (0 for none)
    #[arg(long, default_value_t = 2)]
    select: usize,
    /// Show the low battery warning
    #[arg(long)]
    battery_low: bool,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let level = if args.verbose {
        LevelFilter::TRACE
    } else {
        LevelFilter::INFO
    };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut lcd = match args.eeprom.as_ref().filter(|path| path.exists()) {
        Some(path) => LcdSimulator::restore_settings(&fs::read(path)?)?,
        None => LcdSimulator::new(),
    };
    if let Some(contrast) = args.contrast {
        lcd.set_contrast(contrast)?;
    }
    info!(contrast = lcd.contrast(), "LCD ready");

    let mut fb = TaranisFramebuffer::new();
    let mut state = DemoState {
        selected_line: args.select,
        battery_low: args.battery_low,
        ..DemoState::default()
    };

    let mut last_frame = String::new();
    for _ in 0..args.frames {
        render_demo_frame(&mut fb, &state);
        fb.publish(&mut lcd)?;

        if lcd.take_refresh() {
            last_frame = lcd.to_ascii();
        }
        state.blink.advance_ms(FRAME_PERIOD_MS);
    }

    if let Some(path) = &args.eeprom {
        fs::write(path, lcd.store_settings()?)?;
        info!(path = %path.display(), "Settings stored");
    }

    info!(frames = lcd.frame_count(), "Done");
    print!("{}", last_frame);
    Ok(())
}
