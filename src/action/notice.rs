//! Timed full-screen notice.
//!
//! Draws a message on its first tick, then completes once a fixed duration
//! has elapsed. Backs both the "not implemented" fallback and the About
//! screen.

use super::{Action, ActionContext, Step};
use crate::config::{ABOUT_DURATION_MS, NOTICE_DURATION_MS};
use crate::ui::Icon;

const ABOUT_TEXT: &str = "OTG Jammer v1.0\nby fpp3\n2026";

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoticeAction {
    title: &'static str,
    icon: Icon,
    message: &'static str,
    duration_ms: u64,
    /// `None` until the first tick draws the screen.
    started_at: Option<u64>,
}

impl NoticeAction {
    pub const fn new(
        title: &'static str,
        icon: Icon,
        message: &'static str,
        duration_ms: u64,
    ) -> Self {
        Self {
            title,
            icon,
            message,
            duration_ms,
            started_at: None,
        }
    }

    /// Fallback for menu leaves without a bound action.
    pub const fn unimplemented() -> Self {
        Self::new(
            "Not Implemented",
            Icon::Information,
            "This feature is not yet implemented.",
            NOTICE_DURATION_MS,
        )
    }

    /// Firmware name, version, author and year.
    pub const fn about() -> Self {
        Self::new("About", Icon::Information, ABOUT_TEXT, ABOUT_DURATION_MS)
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }
}

impl Action for NoticeAction {
    fn tick(&mut self, cx: &mut ActionContext<'_>) -> Step {
        let Some(started_at) = self.started_at else {
            cx.display
                .render_notice(self.title, cx.battery, self.icon, self.message);
            self.started_at = Some(cx.now_ms);
            return Step::Running;
        };

        if cx.now_ms.saturating_sub(started_at) >= self.duration_ms {
            self.started_at = None;
            return Step::Complete;
        }
        Step::Running
    }
}
