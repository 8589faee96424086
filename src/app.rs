//! Per-frame control loop.
//!
//! [`App`] ties the navigator, the action runner and the board collaborators
//! together.  The firmware calls [`App::frame`] once per
//! [`FRAME_PERIOD_MS`](crate::config::FRAME_PERIOD_MS); each call:
//!
//! 1. samples the buttons,
//! 2. hands the presses to exactly one of the active action or the navigator,
//! 3. redraws the menu if something changed and no action owns the screen.
//!
//! Startup is a short sequence of modes before the menu goes live:
//!
//! ```text
//!  recovery? ──yes──▶ Recovery (factory reset prompt) ─┐
//!      │                                                │
//!      └─no──────────────────────────▶ config gate ◀────┘
//!                                        │ ok     │ err
//!                                        ▼        ▼
//!                                      Splash   Fault (terminal)
//!                                        │ 2 s
//!                                        ▼
//!                                       Menu
//! ```

use crate::action::{ActionContext, ActionRunner, ActiveAction, FactoryResetAction, Step};
use crate::battery;
use crate::bootstrap::{self, DeviceConfig};
use crate::config::BOOT_SPLASH_MS;
use crate::menu::MenuTree;
use crate::nav::{Confirm, Navigator};
use crate::storage::{ConfigRead, ConfigStore};
use crate::ui::presenter::{self, BatteryLabel};
use crate::ui::{BatteryGauge, Button, Clock, DisplaySink, Edges, InputSource};

/// Message on the terminal error screen.
pub const FAULT_MESSAGE: &str = "Failed to load configurations.";

/// The hardware-facing collaborators, owned by the app.
pub struct Board<I, D, S, C, B> {
    pub input: I,
    pub display: D,
    pub store: S,
    pub clock: C,
    pub battery: B,
}

/// What the app is currently doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Factory-reset prompt requested at power-on.
    Recovery,
    /// Boot splash after a successful config load.
    Splash,
    /// Normal operation.
    Menu,
    /// Config gate failed. Never left.
    Fault,
}

/// Which path a frame took.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Dispatch {
    /// Presses went to the navigator.
    Navigation,
    /// The active action was ticked.
    Action,
    /// Menu is live but nothing was pressed.
    Idle,
    /// Splash screen frame.
    Boot,
    /// Fault screen frame.
    Halted,
}

/// Summary of one [`App::frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub dispatch: Dispatch,
    /// The app itself issued a render this frame (actions draw on their own).
    pub rendered: bool,
}

pub struct App<I, D, S, C, B> {
    board: Board<I, D, S, C, B>,
    nav: Navigator,
    runner: ActionRunner,
    mode: Mode,
    splash_since: Option<u64>,
    config: Option<DeviceConfig>,
    dirty: bool,
    battery_label: BatteryLabel,
    restart: bool,
}

impl<I, D, S, C, B> App<I, D, S, C, B>
where
    I: InputSource,
    D: DisplaySink,
    S: ConfigStore,
    C: Clock,
    B: BatteryGauge,
{
    /// Build the app and run the startup gate.
    ///
    /// With `recovery` set the factory-reset prompt runs first and the gate
    /// is deferred until it finishes.
    pub fn new(board: Board<I, D, S, C, B>, tree: MenuTree, recovery: bool) -> Self {
        let mut app = Self {
            board,
            nav: Navigator::new(tree),
            runner: ActionRunner::new(),
            mode: Mode::Recovery,
            splash_since: None,
            config: None,
            dirty: false,
            battery_label: BatteryLabel::new(),
            restart: false,
        };

        if recovery {
            info!("app: recovery boot");
            app.runner
                .start(ActiveAction::FactoryReset(FactoryResetAction::new()));
        } else {
            app.run_gate();
        }
        app
    }

    /// Run one control-loop iteration.
    pub fn frame(&mut self) -> Frame {
        let edges = self.board.input.poll();
        self.refresh_battery();

        match self.mode {
            Mode::Fault => {
                presenter::render_fault(&mut self.board.display, &self.battery_label, FAULT_MESSAGE);
                Frame {
                    dispatch: Dispatch::Halted,
                    rendered: true,
                }
            }
            Mode::Recovery => {
                if self.tick_action(edges) == Step::Complete {
                    self.run_gate();
                }
                Frame {
                    dispatch: Dispatch::Action,
                    rendered: false,
                }
            }
            Mode::Splash => self.splash_frame(),
            Mode::Menu => self.menu_frame(edges),
        }
    }

    /// An action asked for a system restart.
    pub fn restart_requested(&self) -> bool {
        self.restart
    }

    /// `true` once the config gate has failed.
    pub fn is_halted(&self) -> bool {
        self.mode == Mode::Fault
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Configuration decoded by the startup gate.
    pub fn device_config(&self) -> Option<&DeviceConfig> {
        self.config.as_ref()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn runner(&self) -> &ActionRunner {
        &self.runner
    }

    pub fn board(&self) -> &Board<I, D, S, C, B> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<I, D, S, C, B> {
        &mut self.board
    }

    fn run_gate(&mut self) {
        let store: &mut dyn ConfigRead = &mut self.board.store;
        match bootstrap::load(store) {
            Ok(config) => {
                info!("app: configuration loaded");
                self.config = Some(config);
                self.mode = Mode::Splash;
                self.splash_since = None;
            }
            Err(e) => {
                error!("app: configuration gate failed: {:?}", e);
                self.config = None;
                self.mode = Mode::Fault;
            }
        }
    }

    fn splash_frame(&mut self) -> Frame {
        let now = self.board.clock.now_ms();
        let Some(since) = self.splash_since else {
            presenter::render_splash(&mut self.board.display, &self.battery_label);
            self.splash_since = Some(now);
            return Frame {
                dispatch: Dispatch::Boot,
                rendered: true,
            };
        };

        if now.saturating_sub(since) < BOOT_SPLASH_MS {
            return Frame {
                dispatch: Dispatch::Boot,
                rendered: false,
            };
        }

        debug!("app: splash done, menu live");
        self.mode = Mode::Menu;
        self.dirty = true;
        Frame {
            dispatch: Dispatch::Boot,
            rendered: self.render_if_dirty(),
        }
    }

    fn menu_frame(&mut self, edges: Edges) -> Frame {
        let dispatch = if self.runner.is_active() {
            if self.tick_action(edges) == Step::Complete {
                self.nav.pop();
                self.dirty = true;
            }
            Dispatch::Action
        } else if edges.any() {
            self.navigate(edges);
            Dispatch::Navigation
        } else {
            Dispatch::Idle
        };

        Frame {
            dispatch,
            rendered: self.render_if_dirty(),
        }
    }

    /// Apply the presses of one frame: Next, then Previous, then Confirm.
    fn navigate(&mut self, mut edges: Edges) {
        if edges.take(Button::Next) {
            self.nav.move_next();
            self.dirty = true;
        }
        if edges.take(Button::Previous) {
            self.nav.move_previous();
            self.dirty = true;
        }
        if edges.take(Button::Confirm) {
            match self.nav.confirm() {
                Confirm::Popped | Confirm::Pushed => self.dirty = true,
                Confirm::Ignored => {}
                Confirm::Launch(id) => self.runner.launch(id),
            }
        }
    }

    fn tick_action(&mut self, edges: Edges) -> Step {
        let now = self.board.clock.now_ms();
        let mut cx = ActionContext::new(
            &mut self.board.display,
            &mut self.board.store,
            now,
            &self.battery_label,
            edges,
        );
        let step = self.runner.tick(&mut cx);
        if cx.restart_requested() {
            info!("app: restart requested");
            self.restart = true;
        }
        step
    }

    fn refresh_battery(&mut self) {
        let label = presenter::battery_label(battery::percent(self.board.battery.millivolts()));
        if label != self.battery_label {
            self.battery_label = label;
            self.dirty = true;
        }
    }

    fn render_if_dirty(&mut self) -> bool {
        if !self.dirty || self.runner.is_active() {
            return false;
        }
        self.dirty = false;

        let cursor = *self.nav.cursor();
        let result = presenter::render_menu(
            &mut self.board.display,
            self.nav.tree(),
            cursor.prefix(),
            cursor.selected(),
            &self.battery_label,
        );
        if let Err(e) = result {
            error!("app: menu render failed: {:?}", e);
            return false;
        }
        true
    }
}
