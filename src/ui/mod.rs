//! User interface subsystem - monochrome display + three physical buttons.
//!
//! The core never touches hardware directly.  It consumes the narrow
//! collaborator traits below, which the firmware implements on top of the
//! SSD1306 OLED, debounced GPIO buttons, the RTC-backed Embassy clock and
//! the SAADC, and which tests implement with recording fakes.
//!
//! ## Components
//!
//! - **Display**: SSD1306 128×64 OLED via I²C
//! - **Buttons**: 3 tactile switches with debouncing (NEXT, PREVIOUS, CONFIRM)

#[cfg(feature = "embedded")]
pub mod buttons;
#[cfg(feature = "embedded")]
pub mod display;
pub mod input_logic;
pub mod presenter;

/// Physical buttons (after debouncing).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    Next,
    Previous,
    Confirm,
}

/// "Was just pressed" flags collected over one frame.
///
/// Each flag is cleared independently by [`Edges::take`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Edges {
    pub next: bool,
    pub previous: bool,
    pub confirm: bool,
}

impl Edges {
    /// No button pressed.
    pub const NONE: Edges = Edges {
        next: false,
        previous: false,
        confirm: false,
    };

    /// Record a press of `button`.
    pub fn latch(&mut self, button: Button) {
        *self.flag(button) = true;
    }

    /// Read and clear the flag for `button`.
    pub fn take(&mut self, button: Button) -> bool {
        core::mem::take(self.flag(button))
    }

    /// `true` when any button was pressed.
    pub fn any(&self) -> bool {
        self.next || self.previous || self.confirm
    }

    fn flag(&mut self, button: Button) -> &mut bool {
        match button {
            Button::Next => &mut self.next,
            Button::Previous => &mut self.previous,
            Button::Confirm => &mut self.confirm,
        }
    }
}

/// Pictogram shown next to notice and confirm messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Icon {
    Logo,
    Information,
    Error,
    Check,
    Reset,
}

/// Button source, sampled once per frame.
pub trait InputSource {
    /// Return the presses seen since the previous poll.
    fn poll(&mut self) -> Edges;
}

/// Render sink. Each call replaces the whole screen.
pub trait DisplaySink {
    /// Scrollable menu list with a selection marker.
    fn render_list(&mut self, title: &str, battery: &str, items: &[&str], selected: usize);

    /// Full-screen message with an icon.
    fn render_notice(&mut self, title: &str, battery: &str, icon: Icon, message: &str);

    /// Message with a row of options to choose from.
    fn render_confirm(
        &mut self,
        title: &str,
        battery: &str,
        icon: Icon,
        message: &str,
        options: &[&str],
        selected: usize,
    );
}

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Battery voltage source.
pub trait BatteryGauge {
    /// Latest cell voltage in millivolts.
    fn millivolts(&mut self) -> u16;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_take_clears_only_that_button() {
        let mut edges = Edges::NONE;
        edges.latch(Button::Next);
        edges.latch(Button::Confirm);
        assert!(edges.any());

        assert!(edges.take(Button::Next));
        assert!(!edges.take(Button::Next));
        assert!(!edges.take(Button::Previous));
        assert!(edges.confirm);

        assert!(edges.take(Button::Confirm));
        assert!(!edges.any());
    }
}
