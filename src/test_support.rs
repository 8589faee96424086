//! Host-side fakes for the collaborator traits.

use std::collections::VecDeque;

use crate::error::StoreError;
use crate::storage::{ConfigKey, ConfigRead, ConfigStore};
use crate::ui::{BatteryGauge, Button, Clock, DisplaySink, Edges, Icon, InputSource};

/// One captured render call, with owned text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Render {
    List {
        title: String,
        battery: String,
        items: Vec<String>,
        selected: usize,
    },
    Notice {
        title: String,
        battery: String,
        icon: Icon,
        message: String,
    },
    Confirm {
        title: String,
        battery: String,
        icon: Icon,
        message: String,
        options: Vec<String>,
        selected: usize,
    },
}

/// Display that remembers every frame drawn.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub renders: Vec<Render>,
}

impl RecordingDisplay {
    pub fn last(&self) -> Option<&Render> {
        self.renders.last()
    }
}

impl DisplaySink for RecordingDisplay {
    fn render_list(&mut self, title: &str, battery: &str, items: &[&str], selected: usize) {
        self.renders.push(Render::List {
            title: title.into(),
            battery: battery.into(),
            items: items.iter().map(|s| String::from(*s)).collect(),
            selected,
        });
    }

    fn render_notice(&mut self, title: &str, battery: &str, icon: Icon, message: &str) {
        self.renders.push(Render::Notice {
            title: title.into(),
            battery: battery.into(),
            icon,
            message: message.into(),
        });
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
        self.renders.push(Render::Confirm {
            title: title.into(),
            battery: battery.into(),
            icon,
            message: message.into(),
            options: options.iter().map(|s| String::from(*s)).collect(),
            selected,
        });
    }
}

/// Store whose every operation fails like a dead flash part.
#[derive(Debug, Default)]
pub struct FailingStore;

impl ConfigRead for FailingStore {
    fn has(&mut self, _key: ConfigKey) -> Result<bool, StoreError> {
        Err(StoreError::Flash)
    }

    fn value_len(&mut self, _key: ConfigKey) -> Result<usize, StoreError> {
        Err(StoreError::Flash)
    }

    fn get(&mut self, _key: ConfigKey, _buf: &mut [u8]) -> Result<usize, StoreError> {
        Err(StoreError::Flash)
    }
}

impl ConfigStore for FailingStore {
    fn put(&mut self, _key: ConfigKey, _value: &[u8]) -> Result<usize, StoreError> {
        Err(StoreError::Flash)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Err(StoreError::Flash)
    }
}

/// Clock the test moves by hand.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: u64,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }
}

/// Input that replays queued frames of presses, then reports nothing.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Edges>,
}

impl ScriptedInput {
    /// Queue a frame in which exactly `buttons` were pressed.
    pub fn press(&mut self, buttons: &[Button]) {
        let mut edges = Edges::NONE;
        for &b in buttons {
            edges.latch(b);
        }
        self.frames.push_back(edges);
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Edges {
        self.frames.pop_front().unwrap_or(Edges::NONE)
    }
}

/// Battery that always reads the same voltage.
#[derive(Debug)]
pub struct FixedBattery(pub u16);

impl Default for FixedBattery {
    fn default() -> Self {
        FixedBattery(3300)
    }
}

impl BatteryGauge for FixedBattery {
    fn millivolts(&mut self) -> u16 {
        self.0
    }
}
