//! Core of the plant monitor: watering logic, navigation and rendering.
//!
//! This crate contains the platform-agnostic code shared between the desktop
//! simulator and a board build:
//!
//! - [`colors`]: Colour constants, palettes and saturation interpolation
//! - [`config`]: Display, layout and timing constants
//! - [`defaults`]: Factory defaults for channel and alarm settings
//! - [`channel`]: Sensor/pump channel with its watering and alarm state machine
//! - [`alarm`]: Audible alarm bursts
//! - [`input`]: Buttons, button events and the input queue
//! - [`pages`]: View navigation
//! - [`app`]: Application state (channels + navigation)
//! - [`controller`]: One control tick from input to presented frame
//! - [`frame`]: In-memory framebuffer
//! - [`hardware`]: Traits the peripherals are reached through
//!
//! # no_std Compatibility
//!
//! This crate is `no_std` compatible and can be used on embedded targets.
//! Time is passed in as `core::time::Duration` since start, so nothing here
//! depends on a clock.

#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod alarm;
pub mod app;
pub mod channel;
pub mod colors;
pub mod config;
pub mod controller;
pub mod defaults;
pub mod frame;
pub mod hardware;
pub mod history;
pub mod input;
pub mod pages;
pub mod screens;
pub mod styles;
pub mod widgets;

// Re-export commonly used items
pub use alarm::GeneralSettings;
pub use app::App;
pub use channel::{Channel, ChannelConfig, ChannelSettings, SettingsFault};
pub use controller::Controller;
pub use frame::Frame;
pub use hardware::{Buzzer, DisplaySink, MoistureSensor, Pump};
pub use input::{Button, ButtonEvent};
