//! GPIO button input with async debouncing.
//!
//! Three physical buttons (active-low with internal pull-up):
//!   - NEXT     - select the next item
//!   - PREVIOUS - select the previous item
//!   - CONFIRM  - enter / return / launch
//!
//! Each button is handled by an async task that waits for a GPIO edge,
//! debounces it, and sends a [`Button`] to the input channel.  The control
//! loop drains the channel once per frame through [`ChannelInput`].

use crate::config::BUTTON_DEBOUNCE_MS;
use crate::ui::{Button, Edges, InputSource};
use embassy_nrf::gpio::{AnyPin, Input, Pull};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Receiver, Sender};
use embassy_time::{Duration, Timer};

/// Depth of the button event channel.
pub const BUTTON_QUEUE: usize = 4;

pub type ButtonSender = Sender<'static, CriticalSectionRawMutex, Button, BUTTON_QUEUE>;
pub type ButtonReceiver = Receiver<'static, CriticalSectionRawMutex, Button, BUTTON_QUEUE>;

/// Run a single button polling loop.
///
/// Waits for the pin to go low (pressed), debounces, sends the event,
/// then waits for release before repeating.
pub async fn button_task(pin: AnyPin, button: Button, tx: ButtonSender) -> ! {
    let mut btn = Input::new(pin, Pull::Up);

    loop {
        // Wait for falling edge (button press, active-low).
        btn.wait_for_falling_edge().await;

        // Debounce: wait and re-check.
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        if btn.is_low() {
            debug!("Button: {}", button);
            // Drop the press rather than stall if the loop is behind.
            if tx.try_send(button).is_err() {
                warn!("Button queue full, dropped {}", button);
            }

            // Wait for release to avoid repeat triggers.
            btn.wait_for_rising_edge().await;
            Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
        }
    }
}

/// Wait until both buttons are released, debounced.
pub async fn wait_released(a: &mut Input<'_>, b: &mut Input<'_>) {
    while a.is_low() || b.is_low() {
        a.wait_for_high().await;
        b.wait_for_high().await;
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;
    }
    info!("Buttons released");
}

/// [`InputSource`] fed by the button tasks.
pub struct ChannelInput {
    rx: ButtonReceiver,
}

impl ChannelInput {
    pub fn new(rx: ButtonReceiver) -> Self {
        Self { rx }
    }
}

impl InputSource for ChannelInput {
    fn poll(&mut self) -> Edges {
        let mut edges = Edges::NONE;
        while let Ok(button) = self.rx.try_receive() {
            edges.latch(button);
        }
        edges
    }
}
