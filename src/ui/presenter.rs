//! Turns core state into render requests against a [`DisplaySink`].

use core::fmt::Write;

use heapless::{String, Vec};

use super::{DisplaySink, Icon};
use crate::error::TreeError;
use crate::menu::{MenuTree, MAX_LEVEL_ITEMS};

/// Title of the fatal error screen.
pub const FAULT_TITLE: &str = "Error!";

/// Battery percentage as shown in the title bar, e.g. `"87%"`.
pub type BatteryLabel = String<4>;

/// Format a battery percentage for the title bar.
pub fn battery_label(percent: u8) -> BatteryLabel {
    let mut label = BatteryLabel::new();
    // "100%" is the longest possible label and fits exactly.
    let _ = write!(label, "{}%", percent.min(100));
    label
}

/// Draw the level reached by `prefix`, highlighting `selected`.
pub fn render_menu<D: DisplaySink + ?Sized>(
    display: &mut D,
    tree: &MenuTree,
    prefix: &[usize],
    selected: usize,
    battery: &str,
) -> Result<(), TreeError> {
    let title = tree.level_title(prefix)?;
    let titles: Vec<&str, MAX_LEVEL_ITEMS> = tree
        .level(prefix)?
        .iter()
        .take(MAX_LEVEL_ITEMS)
        .map(|item| item.title)
        .collect();

    display.render_list(title, battery, &titles, selected);
    Ok(())
}

/// Boot splash shown once the configuration has loaded.
pub fn render_splash<D: DisplaySink + ?Sized>(display: &mut D, battery: &str) {
    display.render_notice("", battery, Icon::Logo, "otg jammer");
}

/// Most lines [`wrap`] will produce.
pub const MAX_WRAP_LINES: usize = 6;

/// Break `message` into lines of at most `width` characters.
///
/// Explicit `'\n'` always starts a new line. Lines break at the last space
/// that fits; a word longer than `width` is cut. Output beyond
/// [`MAX_WRAP_LINES`] is dropped.
pub fn wrap(message: &str, width: usize) -> Vec<&str, MAX_WRAP_LINES> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in message.split('\n') {
        let mut rest = paragraph.trim();
        while !rest.is_empty() {
            let cut = cut_point(rest, width);
            if lines.push(rest[..cut].trim_end()).is_err() {
                return lines;
            }
            rest = rest[cut..].trim_start();
        }
    }
    lines
}

fn cut_point(text: &str, width: usize) -> usize {
    let Some((limit, _)) = text.char_indices().nth(width) else {
        return text.len();
    };
    if text[limit..].starts_with(' ') {
        return limit;
    }
    match text[..limit].rfind(' ') {
        Some(i) if i > 0 => i,
        _ => limit,
    }
}

/// Terminal error screen.
pub fn render_fault<D: DisplaySink + ?Sized>(display: &mut D, battery: &str, message: &str) {
    display.render_notice(FAULT_TITLE, battery, Icon::Error, message);
}
