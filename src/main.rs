//! OTG Jammer firmware entry point (nRF52840).
//!
//! Wires the board to the menu core:
//!   - SSD1306 over TWIM0 as the display sink
//!   - three debounced GPIO buttons feeding a channel
//!   - SAADC battery sense sampled in the background
//!   - `sequential-storage` config store on the internal NVMC
//!
//! then runs [`App::frame`] on a fixed ticker until a restart is requested.

#![no_std]
#![no_main]

use core::sync::atomic::{AtomicU16, Ordering};

use defmt::{info, unwrap};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_nrf::gpio::{AnyPin, Input, Pin as _, Pull};
use embassy_nrf::nvmc::Nvmc;
use embassy_nrf::saadc::{self, ChannelConfig, Saadc};
use embassy_nrf::twim::{self, Twim};
use embassy_nrf::{bind_interrupts, peripherals};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker, Timer};
use panic_probe as _;

use otg_jammer::config::{
    BUTTON_DEBOUNCE_MS, FRAME_PERIOD_MS, VBAT_FULL_MV, VBAT_SAMPLE_INTERVAL_SECS,
};
use otg_jammer::storage::flash::{BlockingFlash, FlashStore};
use otg_jammer::ui::buttons::{self, ChannelInput, BUTTON_QUEUE};
use otg_jammer::ui::display::{self, OledSink};
use otg_jammer::ui::{BatteryGauge, Button, Clock, DisplaySink, Icon};
use otg_jammer::{App, Board, JAMMER_MENU};

bind_interrupts!(struct Irqs {
    TWISPI0 => twim::InterruptHandler<peripherals::TWISPI0>;
    SAADC => saadc::InterruptHandler;
});

/// Button presses from the button tasks to the control loop.
static BUTTON_EVENTS: Channel<CriticalSectionRawMutex, Button, BUTTON_QUEUE> = Channel::new();

/// Latest battery reading (mV), written by `battery_task`.
static VBAT_MV: AtomicU16 = AtomicU16::new(VBAT_FULL_MV);

struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u64 {
        Instant::now().as_millis()
    }
}

struct SampledBattery;

impl BatteryGauge for SampledBattery {
    fn millivolts(&mut self) -> u16 {
        VBAT_MV.load(Ordering::Relaxed)
    }
}

#[embassy_executor::task(pool_size = 3)]
async fn button(pin: AnyPin, button: Button) {
    buttons::button_task(pin, button, BUTTON_EVENTS.sender()).await
}

#[embassy_executor::task]
async fn battery_task(mut adc: Saadc<'static, 1>) {
    adc.calibrate().await;
    loop {
        let mut buf = [0i16; 1];
        adc.sample(&mut buf).await;
        VBAT_MV.store(to_millivolts(buf[0]), Ordering::Relaxed);
        Timer::after(Duration::from_secs(VBAT_SAMPLE_INTERVAL_SECS)).await;
    }
}

/// 12-bit SAADC sample (gain 1/6, 0.6 V internal reference) to millivolts.
fn to_millivolts(raw: i16) -> u16 {
    let raw = raw.max(0) as u32;
    (raw * 3600 / 4096) as u16
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let mut p = embassy_nrf::init(Default::default());
    info!("otg-jammer starting");

    let i2c = Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = OledSink::new(display::init(i2c));

    // CONFIRM + PREVIOUS held at power-on requests the factory reset prompt.
    let recovery = {
        let mut confirm = Input::new(&mut p.P0_24, Pull::Up);
        let mut previous = Input::new(&mut p.P0_11, Pull::Up);
        Timer::after(Duration::from_millis(BUTTON_DEBOUNCE_MS)).await;

        let held = confirm.is_low() && previous.is_low();
        if held {
            info!("Recovery boot requested");
            oled.render_notice(
                "Factory Reset",
                "",
                Icon::Information,
                "Lift buttons to continue.",
            );
            buttons::wait_released(&mut confirm, &mut previous).await;
        }
        held
    };

    unwrap!(spawner.spawn(button(p.P0_12.degrade(), Button::Next)));
    unwrap!(spawner.spawn(button(p.P0_11.degrade(), Button::Previous)));
    unwrap!(spawner.spawn(button(p.P0_24.degrade(), Button::Confirm)));

    let adc = Saadc::new(
        p.SAADC,
        Irqs,
        saadc::Config::default(),
        [ChannelConfig::single_ended(p.P0_02)],
    );
    unwrap!(spawner.spawn(battery_task(adc)));

    let board = Board {
        input: ChannelInput::new(BUTTON_EVENTS.receiver()),
        display: oled,
        store: FlashStore::new(BlockingFlash::new(Nvmc::new(p.NVMC))),
        clock: EmbassyClock,
        battery: SampledBattery,
    };
    let mut app = App::new(board, JAMMER_MENU, recovery);

    let mut ticker = Ticker::every(Duration::from_millis(FRAME_PERIOD_MS));
    loop {
        app.frame();
        if app.restart_requested() {
            info!("Restarting");
            cortex_m::peripheral::SCB::sys_reset();
        }
        ticker.next().await;
    }
}
