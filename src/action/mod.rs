//! Resumable menu actions.
//!
//! A leaf action cannot finish inside one frame, so it is written as a step
//! function polled once per frame until it reports [`Step::Complete`]:
//!
//! 1. The first tick after activation does one-time setup (draw the screen,
//!    capture the start time) and returns [`Step::Running`].
//! 2. Later ticks re-check the completion condition (elapsed time, a choice
//!    made with the buttons) and return `Running` or `Complete`.
//!
//! Progress lives in the action value itself, which the [`ActionRunner`]
//! creates on launch and drops on completion.  Nothing is global, so every
//! launch starts from a clean, unstarted state.
//!
//! There is no cancellation: while an action runs it receives every button
//! edge and the menu receives none.

pub mod factory_reset;
pub mod notice;

use crate::storage::ConfigStore;
use crate::ui::{DisplaySink, Edges};

pub use factory_reset::FactoryResetAction;
pub use notice::NoticeAction;

/// Identity of every leaf behavior the menu can request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActionId {
    // Bluetooth
    BtChannelList,
    BtAllSequential,
    BtAllRandom,
    // WiFi
    WifiAllChannels,
    WifiSingleChannel,
    // Single-screen jams
    BleJam,
    ZigbeeJam,
    MiscJam,
    // Drone
    DroneAllRandom,
    DroneAllSequential,
    // Settings
    RadiosConfig,
    JamModeSimultaneous,
    JamModeStandalone,
    FactoryReset,
    // Info
    About,
}

/// Outcome of one action tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    Running,
    Complete,
}

/// Everything an action may touch during one tick.
pub struct ActionContext<'a> {
    pub display: &'a mut dyn DisplaySink,
    pub store: &'a mut dyn ConfigStore,
    /// Monotonic time of this frame (ms).
    pub now_ms: u64,
    /// Title-bar battery label.
    pub battery: &'a str,
    /// Button presses of this frame; the action owns them exclusively.
    pub edges: Edges,
    restart: bool,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        display: &'a mut dyn DisplaySink,
        store: &'a mut dyn ConfigStore,
        now_ms: u64,
        battery: &'a str,
        edges: Edges,
    ) -> Self {
        Self {
            display,
            store,
            now_ms,
            battery,
            edges,
            restart: false,
        }
    }

    /// Ask for a system restart once this frame ends.
    pub fn request_restart(&mut self) {
        self.restart = true;
    }

    pub fn restart_requested(&self) -> bool {
        self.restart
    }
}

/// Two-phase, poll-once-per-frame unit of work.
pub trait Action {
    fn tick(&mut self, cx: &mut ActionContext<'_>) -> Step;
}

/// A launched action and its private progress.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveAction {
    Notice(NoticeAction),
    FactoryReset(FactoryResetAction),
}

impl Action for ActiveAction {
    fn tick(&mut self, cx: &mut ActionContext<'_>) -> Step {
        match self {
            ActiveAction::Notice(a) => a.tick(cx),
            ActiveAction::FactoryReset(a) => a.tick(cx),
        }
    }
}

/// Look up the behavior bound to `id`.
///
/// Radio operations are declared in the menu but have no implementation in
/// this firmware; they resolve to `None`.
pub fn resolve(id: ActionId) -> Option<ActiveAction> {
    match id {
        ActionId::About => Some(ActiveAction::Notice(NoticeAction::about())),
        ActionId::FactoryReset => Some(ActiveAction::FactoryReset(FactoryResetAction::new())),
        _ => None,
    }
}

/// Holds at most one active action and ticks it.
#[derive(Debug, Default)]
pub struct ActionRunner {
    active: Option<ActiveAction>,
}

impl ActionRunner {
    pub const fn new() -> Self {
        Self { active: None }
    }

    /// `true` while an action owns the frame.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&ActiveAction> {
        self.active.as_ref()
    }

    /// Launch the action bound to `id`.
    ///
    /// A leaf with no id, or an id with no implementation, gets the
    /// "not implemented" notice instead. Never fails.
    pub fn launch(&mut self, id: Option<ActionId>) {
        let action = match id.and_then(resolve) {
            Some(action) => action,
            None => {
                debug!("action: {:?} unbound, showing notice", id);
                ActiveAction::Notice(NoticeAction::unimplemented())
            }
        };
        self.start(action);
    }

    /// Make `action` the active one.
    pub fn start(&mut self, action: ActiveAction) {
        if self.active.is_some() {
            warn!("action: launch ignored, another action is running");
            return;
        }
        info!("action: start {:?}", action);
        self.active = Some(action);
    }

    /// Tick the active action once.
    ///
    /// On [`Step::Complete`] the action is dropped along with its state.
    /// Returns `Complete` if nothing was active.
    pub fn tick(&mut self, cx: &mut ActionContext<'_>) -> Step {
        let Some(action) = self.active.as_mut() else {
            return Step::Complete;
        };

        let step = action.tick(cx);
        if step == Step::Complete {
            info!("action: complete");
            self.active = None;
        }
        step
    }
}
