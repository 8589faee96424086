//! End-to-end scenarios for the otg-jammer control loop, driven through the
//! public API with host fakes for every board collaborator.

use otg_jammer::config::{BOOT_SPLASH_MS, FRAME_PERIOD_MS, NOTICE_DURATION_MS};
use otg_jammer::storage::{ConfigKey, ConfigRead, ConfigStore, MemoryStore};
use otg_jammer::ui::{BatteryGauge, Button, Clock, DisplaySink, Edges, Icon, InputSource};
use otg_jammer::{App, Board, Dispatch, Mode, JAMMER_MENU};

#[derive(Debug, Clone, PartialEq)]
enum Screen {
    List { title: String, items: Vec<String>, selected: usize },
    Notice { title: String, icon: Icon, message: String },
    Confirm { title: String, selected: usize },
}

#[derive(Default)]
struct Screens(Vec<Screen>);

impl DisplaySink for Screens {
    fn render_list(&mut self, title: &str, _battery: &str, items: &[&str], selected: usize) {
        self.0.push(Screen::List {
            title: title.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            selected,
        });
    }

    fn render_notice(&mut self, title: &str, _battery: &str, icon: Icon, message: &str) {
        self.0.push(Screen::Notice {
            title: title.to_string(),
            icon,
            message: message.to_string(),
        });
    }

    fn render_confirm(
        &mut self,
        title: &str,
        _battery: &str,
        _icon: Icon,
        _message: &str,
        _options: &[&str],
        selected: usize,
    ) {
        self.0.push(Screen::Confirm {
            title: title.to_string(),
            selected,
        });
    }
}

#[derive(Default)]
struct Presses(Option<Edges>);

impl InputSource for Presses {
    fn poll(&mut self) -> Edges {
        self.0.take().unwrap_or(Edges::NONE)
    }
}

#[derive(Default)]
struct Millis(u64);

impl Clock for Millis {
    fn now_ms(&self) -> u64 {
        self.0
    }
}

struct Cell3V;

impl BatteryGauge for Cell3V {
    fn millivolts(&mut self) -> u16 {
        3000
    }
}

type Device = App<Presses, Screens, MemoryStore, Millis, Cell3V>;

fn power_on(store: MemoryStore, recovery: bool) -> Device {
    App::new(
        Board {
            input: Presses::default(),
            display: Screens::default(),
            store,
            clock: Millis::default(),
            battery: Cell3V,
        },
        JAMMER_MENU,
        recovery,
    )
}

fn tick(dev: &mut Device, press: &[Button]) -> Dispatch {
    let mut edges = Edges::NONE;
    for &b in press {
        edges.latch(b);
    }
    let board = dev.board_mut();
    board.input.0 = Some(edges);
    board.clock.0 += FRAME_PERIOD_MS;
    dev.frame().dispatch
}

fn configured() -> MemoryStore {
    MemoryStore::new()
        .with(ConfigKey::RadioCount, &[2])
        .and_then(|s| s.with(ConfigKey::RadioConfig, &[4, 5, 3, 16, 15, 3]))
        .and_then(|s| s.with(ConfigKey::JamMode, &[0]))
        .expect("seed store")
}

fn screens(dev: &Device) -> &[Screen] {
    &dev.board().display.0
}

fn last(dev: &Device) -> &Screen {
    screens(dev).last().expect("nothing rendered")
}

fn boot_to_menu(dev: &mut Device) {
    while dev.mode() == Mode::Splash {
        assert_eq!(tick(dev, &[]), Dispatch::Boot);
    }
    assert_eq!(dev.mode(), Mode::Menu);
}

#[test]
fn missing_config_never_reaches_the_menu() {
    let store = MemoryStore::new()
        .with(ConfigKey::RadioCount, &[0])
        .expect("seed store");
    let mut dev = power_on(store, false);

    for _ in 0..200 {
        assert_eq!(tick(&mut dev, &[Button::Confirm]), Dispatch::Halted);
    }
    assert!(dev.is_halted());
    assert_eq!(screens(&dev).len(), 200);
    assert!(screens(&dev).iter().all(|s| matches!(
        s,
        Screen::Notice { title, icon: Icon::Error, .. } if title == "Error!"
    )));
    assert!(!screens(&dev).iter().any(|s| matches!(s, Screen::List { .. })));
}

#[test]
fn boot_shows_splash_then_main_menu() {
    let mut dev = power_on(configured(), false);
    assert_eq!(dev.device_config().map(|c| c.radios.len()), Some(2));

    tick(&mut dev, &[]);
    assert_eq!(
        last(&dev),
        &Screen::Notice {
            title: String::new(),
            icon: Icon::Logo,
            message: "otg jammer".into(),
        }
    );

    let started = dev.board().clock.0;
    boot_to_menu(&mut dev);
    assert!(dev.board().clock.0 - started >= BOOT_SPLASH_MS);

    match last(&dev) {
        Screen::List { title, items, selected } => {
            assert_eq!(title, "Main Menu");
            assert_eq!(items[0], "Bluetooth Jam");
            assert_eq!(items[7], "About");
            assert_eq!(*selected, 0);
        }
        other => panic!("expected main menu, got {:?}", other),
    }
}

#[test]
fn eight_nexts_come_back_to_the_top() {
    let mut dev = power_on(configured(), false);
    boot_to_menu(&mut dev);

    for _ in 0..8 {
        assert_eq!(tick(&mut dev, &[Button::Next]), Dispatch::Navigation);
    }
    assert_eq!(dev.navigator().cursor().selected(), 0);
    assert!(matches!(last(&dev), Screen::List { selected: 0, .. }));
}

#[test]
fn unbound_leaf_runs_notice_for_its_duration_then_returns() {
    let mut dev = power_on(configured(), false);
    boot_to_menu(&mut dev);

    // Drone Jam > All channels (random)
    for _ in 0..4 {
        tick(&mut dev, &[Button::Next]);
    }
    tick(&mut dev, &[Button::Confirm]);
    assert_eq!(dev.navigator().cursor().depth(), 1);
    assert!(matches!(last(&dev), Screen::List { title, .. } if title == "Drone Jam"));

    assert_eq!(tick(&mut dev, &[Button::Confirm]), Dispatch::Navigation);
    assert_eq!(tick(&mut dev, &[]), Dispatch::Action);
    let shown_at = dev.board().clock.0;
    assert!(matches!(
        last(&dev),
        Screen::Notice { title, icon: Icon::Information, .. } if title == "Not Implemented"
    ));

    let mut action_frames = 0;
    while dev.runner().is_active() {
        assert_eq!(tick(&mut dev, &[Button::Previous, Button::Confirm]), Dispatch::Action);
        action_frames += 1;
    }
    assert_eq!(dev.board().clock.0 - shown_at, NOTICE_DURATION_MS);
    assert_eq!(action_frames, NOTICE_DURATION_MS / FRAME_PERIOD_MS);

    assert_eq!(dev.navigator().cursor().depth(), 0);
    assert_eq!(dev.navigator().cursor().selected(), 4);
    assert!(matches!(last(&dev), Screen::List { title, selected: 4, .. } if title == "Main Menu"));
}

#[test]
fn jamming_mode_return_slot_goes_back_to_settings() {
    let mut dev = power_on(configured(), false);
    boot_to_menu(&mut dev);

    tick(&mut dev, &[Button::Previous]);
    tick(&mut dev, &[Button::Previous]); // Settings
    tick(&mut dev, &[Button::Confirm]);
    tick(&mut dev, &[Button::Next]); // Jamming Mode
    tick(&mut dev, &[Button::Confirm]);
    assert_eq!(dev.navigator().cursor().depth(), 2);
    assert!(matches!(last(&dev), Screen::List { title, .. } if title == "Jamming Mode"));

    tick(&mut dev, &[Button::Previous]); // Return
    tick(&mut dev, &[Button::Confirm]);
    assert_eq!(dev.navigator().cursor().depth(), 1);
    match last(&dev) {
        Screen::List { title, selected, .. } => {
            assert_eq!(title, "Settings");
            assert_eq!(*selected, 1);
        }
        other => panic!("expected settings list, got {:?}", other),
    }
}

#[test]
fn recovery_boot_restores_defaults_and_restarts() {
    let mut store = configured();
    store.put(ConfigKey::JamMode, &[9]).expect("corrupt jam mode");
    let mut dev = power_on(store, true);
    assert_eq!(dev.mode(), Mode::Recovery);

    tick(&mut dev, &[]);
    assert!(matches!(
        last(&dev),
        Screen::Confirm { title, selected: 1 } if title == "Factory Reset"
    ));
    tick(&mut dev, &[Button::Next]);
    tick(&mut dev, &[Button::Confirm]);
    assert!(matches!(
        last(&dev),
        Screen::Notice { icon: Icon::Check, message, .. } if message == "Factory settings loaded."
    ));

    while dev.mode() == Mode::Recovery {
        tick(&mut dev, &[]);
    }
    assert!(dev.restart_requested());

    let store = &mut dev.board_mut().store;
    assert_eq!(store.value_len(ConfigKey::RadioCount), Ok(1));
    assert_eq!(store.has(ConfigKey::RadioConfig), Ok(false));
    let mut mode = [0xFF];
    assert_eq!(store.get(ConfigKey::JamMode, &mut mode), Ok(1));
    assert_eq!(mode, [0]);
}
