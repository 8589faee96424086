//! The instrument's menu.
//!
//! ```text
//! Main Menu
//! ├── Bluetooth Jam ─┬ Channel List (21)
//! │                  ├ All channels (sequential)
//! │                  ├ All channels (random)
//! │                  └ Return
//! ├── WiFi Jam ──────┬ All channels (sequential)
//! │                  ├ Single channel
//! │                  └ Return
//! ├── BLE Jam
//! ├── Zigbee Jam
//! ├── Drone Jam ─────┬ All channels (random)
//! │                  ├ All channels (sequential)
//! │                  └ Return
//! ├── Misc Jam
//! ├── Settings ──────┬ Radios
//! │                  ├ Jamming Mode ─┬ Simultaneous
//! │                  │               ├ Standalone
//! │                  │               └ Return
//! │                  ├ Factory Reset
//! │                  └ Return
//! └── About
//! ```

use super::{MenuItem, MenuTree};
use crate::action::ActionId;

const ALL_SEQUENTIAL: &str = "All channels (sequential)";
const ALL_RANDOM: &str = "All channels (random)";

const BLUETOOTH: &[MenuItem] = &[
    MenuItem::leaf("Channel List (21)", ActionId::BtChannelList),
    MenuItem::leaf(ALL_SEQUENTIAL, ActionId::BtAllSequential),
    MenuItem::leaf(ALL_RANDOM, ActionId::BtAllRandom),
    MenuItem::RETURN,
];

const WIFI: &[MenuItem] = &[
    MenuItem::leaf(ALL_SEQUENTIAL, ActionId::WifiAllChannels),
    MenuItem::leaf("Single channel", ActionId::WifiSingleChannel),
    MenuItem::RETURN,
];

const DRONE: &[MenuItem] = &[
    MenuItem::leaf(ALL_RANDOM, ActionId::DroneAllRandom),
    MenuItem::leaf(ALL_SEQUENTIAL, ActionId::DroneAllSequential),
    MenuItem::RETURN,
];

const JAMMING_MODE: &[MenuItem] = &[
    MenuItem::leaf("Simultaneous", ActionId::JamModeSimultaneous),
    MenuItem::leaf("Standalone", ActionId::JamModeStandalone),
    MenuItem::RETURN,
];

const SETTINGS: &[MenuItem] = &[
    MenuItem::leaf("Radios", ActionId::RadiosConfig),
    MenuItem::submenu("Jamming Mode", JAMMING_MODE),
    MenuItem::leaf("Factory Reset", ActionId::FactoryReset),
    MenuItem::RETURN,
];

const MAIN: &[MenuItem] = &[
    MenuItem::submenu("Bluetooth Jam", BLUETOOTH),
    MenuItem::submenu("WiFi Jam", WIFI),
    MenuItem::leaf("BLE Jam", ActionId::BleJam),
    MenuItem::leaf("Zigbee Jam", ActionId::ZigbeeJam),
    MenuItem::submenu("Drone Jam", DRONE),
    MenuItem::leaf("Misc Jam", ActionId::MiscJam),
    MenuItem::submenu("Settings", SETTINGS),
    MenuItem::leaf("About", ActionId::About),
];

/// Root of the device menu.
pub static JAMMER_MENU: MenuTree = MenuTree::new("Main Menu", MAIN);
