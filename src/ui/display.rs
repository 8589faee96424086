//! SSD1306 OLED display wrapper.
//!
//! Implements [`DisplaySink`] on a 128×64 buffered SSD1306.  Every render
//! clears the frame buffer, draws the whole screen and flushes it.
//!
//! ```text
//! ┌────────────────────────────┐
//! │ Title                  87% │  title bar
//! ├────────────────────────────┤
//! │ > item                     │  list rows, or icon + wrapped message
//! │   item                     │
//! │ ...                  Load  │  option row (confirm screens)
//! └────────────────────────────┘
//! ```

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Alignment, Text};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

use super::presenter::wrap;
use super::{DisplaySink, Icon};

/// Type alias for the concrete display driver.
///
/// Generic over the I²C implementation so callers pass in their HAL's
/// I²C peripheral.
pub type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

const WIDTH: i32 = 128;
const CHAR_WIDTH: i32 = 6;
const LINE_HEIGHT: i32 = 10;
/// Characters per full-width line.
const COLUMNS: usize = (WIDTH / CHAR_WIDTH) as usize;
/// Baseline of the title text.
const TITLE_BASELINE: i32 = 8;
/// Baseline of the first body row.
const BODY_BASELINE: i32 = 22;
/// Menu rows that fit below the title bar.
const VISIBLE_ROWS: usize = 5;
/// Icon box (px) on notice and confirm screens.
const ICON_SIZE: u32 = 16;
/// Left edge of message text next to an icon.
const MESSAGE_X: i32 = ICON_SIZE as i32 + 4;
/// Baseline of the option row.
const OPTIONS_BASELINE: i32 = 62;

/// Initialise the SSD1306 display and clear the screen.
pub fn init<I2C>(i2c: I2C) -> Display<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    let interface = I2CDisplayInterface::new(i2c);
    let mut display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
        .into_buffered_graphics_mode();
    let _ = display.init();
    display.clear_buffer();
    let _ = display.flush();
    display
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

fn stroke() -> PrimitiveStyle<BinaryColor> {
    PrimitiveStyle::with_stroke(BinaryColor::On, 1)
}

/// [`DisplaySink`] over an SSD1306. Draw errors are dropped.
pub struct OledSink<I2C> {
    display: Display<I2C>,
}

impl<I2C> OledSink<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    pub fn new(display: Display<I2C>) -> Self {
        Self { display }
    }

    /// Clear, then draw the title bar. An empty title hides the bar.
    fn begin(&mut self, title: &str, battery: &str) {
        self.display.clear_buffer();
        if title.is_empty() {
            return;
        }

        let _ = Text::new(title, Point::new(0, TITLE_BASELINE), text_style()).draw(&mut self.display);
        let _ = Text::with_alignment(
            battery,
            Point::new(WIDTH - 1, TITLE_BASELINE),
            text_style(),
            Alignment::Right,
        )
        .draw(&mut self.display);
        let _ = Line::new(
            Point::new(0, TITLE_BASELINE + 3),
            Point::new(WIDTH - 1, TITLE_BASELINE + 3),
        )
        .into_styled(stroke())
        .draw(&mut self.display);
    }

    fn finish(&mut self) {
        let _ = self.display.flush();
    }

    fn draw_icon(&mut self, icon: Icon, top_left: Point) {
        let s = ICON_SIZE as i32;
        let d = &mut self.display;
        match icon {
            Icon::Logo => {
                let _ = Rectangle::new(top_left, Size::new(ICON_SIZE, ICON_SIZE))
                    .into_styled(stroke())
                    .draw(d);
                let _ = Circle::new(top_left + Point::new(4, 4), 8)
                    .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                    .draw(d);
            }
            Icon::Information => {
                let _ = Circle::new(top_left, ICON_SIZE).into_styled(stroke()).draw(d);
                let _ = Text::new("i", top_left + Point::new(5, 12), text_style()).draw(d);
            }
            Icon::Error => {
                let _ = Triangle::new(
                    top_left + Point::new(s / 2, 0),
                    top_left + Point::new(0, s - 1),
                    top_left + Point::new(s - 1, s - 1),
                )
                .into_styled(stroke())
                .draw(d);
                let _ = Text::new("!", top_left + Point::new(5, 14), text_style()).draw(d);
            }
            Icon::Check => {
                let _ = Line::new(top_left + Point::new(1, s / 2), top_left + Point::new(s / 3, s - 2))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
                    .draw(d);
                let _ = Line::new(top_left + Point::new(s / 3, s - 2), top_left + Point::new(s - 1, 2))
                    .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 2))
                    .draw(d);
            }
            Icon::Reset => {
                let _ = Circle::new(top_left, ICON_SIZE).into_styled(stroke()).draw(d);
                let _ = Triangle::new(
                    top_left + Point::new(s / 2 - 3, 0),
                    top_left + Point::new(s / 2 + 3, 0),
                    top_left + Point::new(s / 2, 4),
                )
                .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
                .draw(d);
            }
        }
    }

    /// Icon on the left, message wrapped beside it.
    fn draw_message(&mut self, icon: Icon, message: &str, top: i32, max_lines: usize) {
        self.draw_icon(icon, Point::new(0, top));
        let columns = ((WIDTH - MESSAGE_X) / CHAR_WIDTH) as usize;
        for (row, line) in wrap(message, columns).iter().take(max_lines).enumerate() {
            let y = top + 8 + row as i32 * LINE_HEIGHT;
            let _ = Text::new(line, Point::new(MESSAGE_X, y), text_style()).draw(&mut self.display);
        }
    }
}

impl<I2C> DisplaySink for OledSink<I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    fn render_list(&mut self, title: &str, battery: &str, items: &[&str], selected: usize) {
        self.begin(title, battery);

        // Scroll so the selection stays on screen.
        let first = (selected + 1).saturating_sub(VISIBLE_ROWS);
        for (row, (index, item)) in items
            .iter()
            .enumerate()
            .skip(first)
            .take(VISIBLE_ROWS)
            .enumerate()
        {
            let y = BODY_BASELINE + row as i32 * LINE_HEIGHT;
            let marker = if index == selected { ">" } else { " " };
            let mut line: heapless::String<{ COLUMNS + 2 }> = heapless::String::new();
            let _ = line.push_str(marker);
            let _ = line.push_str(" ");
            for c in item.chars().take(COLUMNS - 2) {
                let _ = line.push(c);
            }
            let _ = Text::new(line.as_str(), Point::new(0, y), text_style()).draw(&mut self.display);
        }

        self.finish();
    }

    fn render_notice(&mut self, title: &str, battery: &str, icon: Icon, message: &str) {
        self.begin(title, battery);
        let top = if title.is_empty() { 8 } else { 16 };
        self.draw_message(icon, message, top, 4);
        self.finish();
    }

    fn render_confirm(
        &mut self,
        title: &str,
        battery: &str,
        icon: Icon,
        message: &str,
        options: &[&str],
        selected: usize,
    ) {
        self.begin(title, battery);
        self.draw_message(icon, message, 16, 3);

        if !options.is_empty() {
            let slot = WIDTH / options.len() as i32;
            for (i, option) in options.iter().enumerate() {
                let x = slot * i as i32 + slot / 2;
                let _ = Text::with_alignment(
                    option,
                    Point::new(x, OPTIONS_BASELINE),
                    text_style(),
                    Alignment::Center,
                )
                .draw(&mut self.display);
                if i == selected {
                    let half = (option.len() as i32 * CHAR_WIDTH) / 2 + 2;
                    let _ = Rectangle::with_corners(
                        Point::new(x - half, OPTIONS_BASELINE - 9),
                        Point::new(x + half, OPTIONS_BASELINE + 1),
                    )
                    .into_styled(stroke())
                    .draw(&mut self.display);
                }
            }
        }

        self.finish();
    }
}
