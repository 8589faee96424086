//! Menu and action core of the OTG Jammer handheld.
//!
//! Everything here is hardware-independent and runs on the host:
//!
//! - [`menu`]: the fixed three-level menu tree
//! - [`nav`]: cursor and navigation rules
//! - [`action`]: resumable, poll-once-per-frame leaf actions
//! - [`bootstrap`]: the startup configuration gate
//! - [`app`]: per-frame dispatch tying them together
//!
//! The embedded binary (`main.rs`, `embedded` feature) wires these to the
//! nRF52840 board: SSD1306 display, GPIO buttons, SAADC battery sense and an
//! NVMC-backed config store.
//!
//! Usage: `cargo test --lib`

#![cfg_attr(not(test), no_std)]

// Must come first so the logging macros are visible to every module.
#[macro_use]
mod fmt;

pub mod action;
pub mod app;
pub mod battery;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod menu;
pub mod nav;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod test_support;

pub use app::{App, Board, Dispatch, Frame, Mode};
pub use error::Error;
pub use menu::JAMMER_MENU;
