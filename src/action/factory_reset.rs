//! Factory reset: ask, write defaults, report, restart.
//!
//! ```text
//! Prompt ──Confirm on Cancel──────────────────────────▶ Complete
//!   │
//!   └─Confirm on Load─▶ write defaults ─ok──▶ Loaded ─2 s─▶ restart + Complete
//!                                       └err─▶ Failed ─2 s─▶ Complete
//! ```
//!
//! This is the only place that writes to the config store.

use super::{Action, ActionContext, Step};
use crate::bootstrap;
use crate::config::RESULT_DURATION_MS;
use crate::ui::input_logic::{select_next, select_prev};
use crate::ui::{Button, Icon};

const TITLE: &str = "Factory Reset";
const OPTIONS: [&str; 2] = ["Load", "Cancel"];
const LOAD: usize = 0;
const CANCEL: usize = 1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Phase {
    /// Waiting for a choice. `drawn` is false until the prompt is on screen.
    Prompt { selected: usize, drawn: bool },
    /// Defaults written; restart once the message has been shown.
    Loaded { since: u64 },
    /// Write failed; return to the menu once the message has been shown.
    Failed { since: u64 },
}

impl Phase {
    const START: Phase = Phase::Prompt {
        selected: CANCEL,
        drawn: false,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FactoryResetAction {
    phase: Phase,
}

impl Default for FactoryResetAction {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryResetAction {
    pub const fn new() -> Self {
        Self {
            phase: Phase::START,
        }
    }

    /// Option currently highlighted in the prompt, if the prompt is up.
    pub fn selected(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Prompt { selected, .. } => Some(OPTIONS[selected]),
            _ => None,
        }
    }

    fn prompt(&mut self, cx: &mut ActionContext<'_>, selected: usize, drawn: bool) -> Step {
        // Presses latched before the prompt is on screen are not a choice.
        if !drawn {
            Self::draw_prompt(cx, selected);
            self.phase = Phase::Prompt {
                selected,
                drawn: true,
            };
            return Step::Running;
        }

        let mut selected = selected;
        let mut redraw = false;

        if cx.edges.take(Button::Next) {
            selected = select_next(selected, OPTIONS.len());
            redraw = true;
        }
        if cx.edges.take(Button::Previous) {
            selected = select_prev(selected, OPTIONS.len());
            redraw = true;
        }

        if cx.edges.take(Button::Confirm) {
            if selected == CANCEL {
                info!("factory reset: cancelled");
                self.phase = Phase::START;
                return Step::Complete;
            }
            debug_assert_eq!(selected, LOAD);
            self.load_defaults(cx);
            return Step::Running;
        }

        if redraw {
            Self::draw_prompt(cx, selected);
        }
        self.phase = Phase::Prompt {
            selected,
            drawn: true,
        };
        Step::Running
    }

    fn draw_prompt(cx: &mut ActionContext<'_>, selected: usize) {
        cx.display.render_confirm(
            TITLE,
            cx.battery,
            Icon::Reset,
            "Load factory Defaults?",
            &OPTIONS,
            selected,
        );
    }

    fn load_defaults(&mut self, cx: &mut ActionContext<'_>) {
        match bootstrap::write_defaults(&mut *cx.store) {
            Ok(()) => {
                info!("factory reset: defaults written");
                cx.display
                    .render_notice(TITLE, cx.battery, Icon::Check, "Factory settings loaded.");
                self.phase = Phase::Loaded { since: cx.now_ms };
            }
            Err(e) => {
                error!("factory reset: write failed: {:?}", e);
                cx.display
                    .render_notice(TITLE, cx.battery, Icon::Error, "Factory reset failed.");
                self.phase = Phase::Failed { since: cx.now_ms };
            }
        }
    }
}

impl Action for FactoryResetAction {
    fn tick(&mut self, cx: &mut ActionContext<'_>) -> Step {
        match self.phase {
            Phase::Prompt { selected, drawn } => self.prompt(cx, selected, drawn),
            Phase::Loaded { since } => {
                if cx.now_ms.saturating_sub(since) < RESULT_DURATION_MS {
                    return Step::Running;
                }
                cx.request_restart();
                self.phase = Phase::START;
                Step::Complete
            }
            Phase::Failed { since } => {
                if cx.now_ms.saturating_sub(since) < RESULT_DURATION_MS {
                    return Step::Running;
                }
                self.phase = Phase::START;
                Step::Complete
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::JamTxMode;
    use crate::storage::{ConfigKey, ConfigRead, ConfigStore, MemoryStore};
    use crate::test_support::{FailingStore, Render, RecordingDisplay};
    use crate::ui::Edges;

    struct Harness<S> {
        display: RecordingDisplay,
        store: S,
        restarted: bool,
    }

    impl<S: ConfigStore> Harness<S> {
        fn new(store: S) -> Self {
            Self {
                display: RecordingDisplay::default(),
                store,
                restarted: false,
            }
        }

        fn tick(&mut self, action: &mut FactoryResetAction, now_ms: u64, press: &[Button]) -> Step {
            let mut edges = Edges::NONE;
            for &b in press {
                edges.latch(b);
            }
            let mut cx = ActionContext::new(&mut self.display, &mut self.store, now_ms, "90%", edges);
            let step = action.tick(&mut cx);
            self.restarted |= cx.restart_requested();
            step
        }
    }

    fn seeded_store() -> MemoryStore {
        MemoryStore::new()
            .with(ConfigKey::RadioCount, &[1])
            .and_then(|s| s.with(ConfigKey::RadioConfig, &[4, 5, 3]))
            .and_then(|s| s.with(ConfigKey::JamMode, &[1]))
            .unwrap()
    }

    #[test]
    fn first_tick_shows_prompt_with_cancel_selected() {
        let mut h = Harness::new(MemoryStore::new());
        let mut action = FactoryResetAction::new();

        assert_eq!(h.tick(&mut action, 0, &[]), Step::Running);
        assert_eq!(action.selected(), Some("Cancel"));
        match h.display.last() {
            Some(Render::Confirm {
                title,
                icon,
                options,
                selected,
                ..
            }) => {
                assert_eq!(title, "Factory Reset");
                assert_eq!(*icon, Icon::Reset);
                assert_eq!(*options, ["Load", "Cancel"]);
                assert_eq!(*selected, 1);
            }
            other => panic!("expected confirm, got {:?}", other),
        }
    }

    #[test]
    fn prompt_redraws_only_on_change() {
        let mut h = Harness::new(MemoryStore::new());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);
        h.tick(&mut action, 20, &[]);
        h.tick(&mut action, 40, &[]);
        assert_eq!(h.display.renders.len(), 1);

        h.tick(&mut action, 60, &[Button::Next]);
        assert_eq!(h.display.renders.len(), 2);
    }

    #[test]
    fn options_wrap_both_ways() {
        let mut h = Harness::new(MemoryStore::new());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);

        h.tick(&mut action, 20, &[Button::Next]);
        assert_eq!(action.selected(), Some("Load"));
        h.tick(&mut action, 40, &[Button::Next]);
        assert_eq!(action.selected(), Some("Cancel"));
        h.tick(&mut action, 60, &[Button::Previous]);
        assert_eq!(action.selected(), Some("Load"));
        h.tick(&mut action, 80, &[Button::Previous]);
        assert_eq!(action.selected(), Some("Cancel"));
    }

    #[test]
    fn cancel_completes_without_touching_store() {
        let mut h = Harness::new(seeded_store());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);

        assert_eq!(h.tick(&mut action, 20, &[Button::Confirm]), Step::Complete);
        assert!(!h.restarted);
        assert_eq!(h.store.len(), 3);
        assert_eq!(action, FactoryResetAction::new());
    }

    #[test]
    fn load_writes_defaults_then_restarts() {
        let mut h = Harness::new(seeded_store());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);
        h.tick(&mut action, 20, &[Button::Previous]); // Load

        assert_eq!(h.tick(&mut action, 40, &[Button::Confirm]), Step::Running);
        assert_eq!(
            h.display.last(),
            Some(&Render::Notice {
                title: "Factory Reset".into(),
                battery: "90%".into(),
                icon: Icon::Check,
                message: "Factory settings loaded.".into(),
            })
        );

        // Store now holds exactly the defaults.
        assert_eq!(h.store.has(ConfigKey::RadioConfig), Ok(false));
        let mut buf = [0xFF; 1];
        h.store.get(ConfigKey::RadioCount, &mut buf).unwrap();
        assert_eq!(buf, [0]);
        h.store.get(ConfigKey::JamMode, &mut buf).unwrap();
        assert_eq!(buf, [JamTxMode::Simultaneous as u8]);

        assert_eq!(h.tick(&mut action, 40 + RESULT_DURATION_MS - 1, &[]), Step::Running);
        assert!(!h.restarted);
        assert_eq!(h.tick(&mut action, 40 + RESULT_DURATION_MS, &[]), Step::Complete);
        assert!(h.restarted);
    }

    #[test]
    fn write_failure_is_shown_and_does_not_restart() {
        let mut h = Harness::new(FailingStore::default());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);
        h.tick(&mut action, 20, &[Button::Next]); // Load

        assert_eq!(h.tick(&mut action, 40, &[Button::Confirm]), Step::Running);
        match h.display.last() {
            Some(Render::Notice { icon, message, .. }) => {
                assert_eq!(*icon, Icon::Error);
                assert_eq!(message, "Factory reset failed.");
            }
            other => panic!("expected notice, got {:?}", other),
        }

        assert_eq!(h.tick(&mut action, 40 + RESULT_DURATION_MS, &[]), Step::Complete);
        assert!(!h.restarted);
    }

    #[test]
    fn buttons_are_ignored_after_choice() {
        let mut h = Harness::new(MemoryStore::new());
        let mut action = FactoryResetAction::new();
        h.tick(&mut action, 0, &[]);
        h.tick(&mut action, 20, &[Button::Next]);
        h.tick(&mut action, 40, &[Button::Confirm]);
        let renders = h.display.renders.len();

        assert_eq!(
            h.tick(&mut action, 60, &[Button::Confirm, Button::Next]),
            Step::Running
        );
        assert_eq!(h.display.renders.len(), renders);
    }

    #[test]
    fn presses_on_the_first_tick_only_show_the_prompt() {
        let mut h = Harness::new(seeded_store());
        let mut action = FactoryResetAction::new();

        assert_eq!(
            h.tick(&mut action, 0, &[Button::Next, Button::Confirm]),
            Step::Running
        );
        assert_eq!(h.display.renders.len(), 1);
        assert!(matches!(
            h.display.last(),
            Some(Render::Confirm { selected: 1, .. })
        ));
        assert_eq!(action.selected(), Some("Cancel"));
        assert_eq!(h.store.len(), 3);
        assert_eq!(h.store.has(ConfigKey::RadioConfig), Ok(true));
        assert!(!h.restarted);

        let mut other = FactoryResetAction::new();
        let mut h = Harness::new(seeded_store());
        assert_eq!(h.tick(&mut other, 0, &[Button::Confirm]), Step::Running);
        assert_eq!(h.display.renders.len(), 1);
        assert_eq!(h.store.len(), 3);
    }
}
