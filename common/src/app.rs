//! Application state: the channels and where the user is looking.
//!
//! Button handlers receive `&mut App` from the controller. There is no other
//! mutable state shared between input handling and the control logic.

use core::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;
use log::{debug, info, warn};

use crate::channel::{Channel, ChannelSettings, UpdateOutcome};
use crate::config::CHANNEL_COUNT;
use crate::hardware::{MoistureSensor, Pump};
use crate::input::ButtonEvent;
use crate::pages::{Navigation, Screen};
use crate::screens::{DetailData, EditData, draw_detail_screen, draw_edit_screen, draw_overview_screen};
use crate::widgets::GaugeData;

/// Channels plus navigation.
pub struct App<S, P> {
    channels: Vec<Channel<S, P>, CHANNEL_COUNT>,
    navigation: Navigation,
}

impl<S, P> App<S, P>
where
    S: MoistureSensor,
    P: Pump,
{
    /// Build the app around `channels`, with one detail view per channel.
    pub fn new(channels: Vec<Channel<S, P>, CHANNEL_COUNT>) -> Self {
        let navigation = Navigation::for_channels(channels.len());
        Self { channels, navigation }
    }

    /// Apply one button event.
    pub fn handle(
        &mut self,
        event: ButtonEvent,
    ) {
        match event {
            ButtonEvent::Next => {
                if self.navigation.next() {
                    info!("View: {}", self.navigation.screen());
                } else {
                    debug!("Next ignored on {}", self.navigation.screen());
                }
            }
            ButtonEvent::Acknowledge => {
                for channel in &mut self.channels {
                    channel.acknowledge_alarm();
                }
                info!("Alarms acknowledged");
            }
            ButtonEvent::ToggleSubview => {
                self.navigation.toggle_subview();
                debug!("View: {}", self.navigation.screen());
            }
            ButtonEvent::NoOp => {}
        }
    }

    /// Overlay settings onto channel `channel_id` (1-based).
    ///
    /// Returns `false` when no such channel exists.
    pub fn apply_config(
        &mut self,
        channel_id: u8,
        settings: Option<&ChannelSettings>,
    ) -> bool {
        match self.channels.iter_mut().find(|c| c.id() == channel_id) {
            Some(channel) => {
                channel.apply_config(settings);
                true
            }
            None => {
                warn!("No channel {channel_id} to configure");
                false
            }
        }
    }

    /// Sample and update every channel for the tick at `now`.
    pub fn update(
        &mut self,
        now: Duration,
    ) -> UpdateOutcome {
        let mut total = UpdateOutcome::default();
        for channel in &mut self.channels {
            channel.sample();
            let outcome = channel.update(now);
            total.dosed |= outcome.dosed;
            total.alarm_raised |= outcome.alarm_raised;
        }
        total
    }

    /// Draw the current screen.
    pub fn render<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let screen = self.navigation.screen();
        let channel = match screen {
            Screen::Detail(idx) | Screen::Edit(idx) => self.channels.get(idx),
            Screen::Overview => None,
        };

        match (screen, channel) {
            (Screen::Detail(_), Some(channel)) => {
                draw_detail_screen(
                    display,
                    &DetailData {
                        title: channel.title(),
                        history: channel.history(),
                        alarm_level: channel.config().alarm_level,
                    },
                );
            }
            (Screen::Edit(_), Some(channel)) => {
                let config = channel.config();
                draw_edit_screen(
                    display,
                    &EditData {
                        title: channel.title(),
                        saturation: channel.saturation(),
                        wet_point: config.wet_point,
                        dry_point: config.dry_point,
                    },
                );
            }
            _ => self.render_overview(display),
        }
    }

    fn render_overview<D>(
        &self,
        display: &mut D,
    ) where
        D: DrawTarget<Color = Rgb565>,
    {
        let gauges: Vec<GaugeData, CHANNEL_COUNT> = self
            .channels
            .iter()
            .map(|channel| GaugeData {
                number: channel.id(),
                saturation: channel.saturation(),
                active: channel.is_active(),
                alarm: channel.alarm_active(),
            })
            .collect();
        draw_overview_screen(display, &gauges);
    }
}

impl<S, P> App<S, P> {
    /// Whether any channel has a latched alarm.
    pub fn any_alarm(&self) -> bool { self.channels.iter().any(Channel::alarm_active) }

    #[inline]
    pub fn channels(&self) -> &[Channel<S, P>] { &self.channels }

    #[inline]
    pub fn channels_mut(&mut self) -> &mut [Channel<S, P>] { &mut self.channels }

    #[inline]
    pub const fn navigation(&self) -> &Navigation { &self.navigation }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::fakes::{FakePump, FakeSensor};
    use crate::colors::{NAV_GRAY, TAB_BLUE};
    use crate::frame::Frame;

    type TestApp = App<FakeSensor, FakePump>;

    fn app() -> TestApp {
        let mut channels = Vec::new();
        for id in 1..=3 {
            channels.push(Channel::new(id, FakeSensor::reading(0.6), FakePump::default())).ok();
        }
        App::new(channels)
    }

    fn enable(
        app: &mut TestApp,
        id: u8,
    ) {
        app.apply_config(
            id,
            Some(&ChannelSettings {
                enabled: Some(true),
                ..ChannelSettings::default()
            }),
        );
    }

    #[test]
    fn test_apply_config_by_id() {
        let mut app = app();
        enable(&mut app, 2);
        assert!(!app.channels()[0].config().enabled);
        assert!(app.channels()[1].config().enabled);
        assert!(!app.apply_config(4, None));
    }

    #[test]
    fn test_acknowledge_clears_every_channel() {
        let mut app = app();
        for id in 1..=3 {
            enable(&mut app, id);
        }
        for channel in app.channels_mut() {
            channel.sensor_mut().value = 0.1;
        }
        assert!(app.update(Duration::ZERO).alarm_raised);
        assert!(app.channels().iter().all(|c| c.alarm_active()));

        app.handle(ButtonEvent::Acknowledge);
        assert!(!app.any_alarm());
    }

    #[test]
    fn test_navigation_events() {
        let mut app = app();
        app.handle(ButtonEvent::Next);
        assert_eq!(app.navigation().screen(), Screen::Detail(0));
        app.handle(ButtonEvent::ToggleSubview);
        assert_eq!(app.navigation().screen(), Screen::Edit(0));
        app.handle(ButtonEvent::Next);
        assert_eq!(app.navigation().screen(), Screen::Edit(0));
        app.handle(ButtonEvent::NoOp);
        assert_eq!(app.navigation().screen(), Screen::Edit(0));
    }

    #[test]
    fn test_render_follows_navigation() {
        let mut app = app();
        let mut frame = Frame::new();

        app.handle(ButtonEvent::Next);
        app.render(&mut frame);
        assert_eq!(frame.pixel(130, 0), Some(Rgb565::from(TAB_BLUE)));

        app.handle(ButtonEvent::ToggleSubview);
        app.render(&mut frame);
        assert_eq!(frame.pixel(0, 0), Some(Rgb565::from(NAV_GRAY)));
    }

    #[test]
    fn test_render_is_pure() {
        let mut app = app();
        enable(&mut app, 1);
        app.update(Duration::ZERO);

        let mut first = Frame::new();
        let mut second = Frame::new();
        app.render(&mut first);
        app.render(&mut second);
        assert_eq!(first.as_slice(), second.as_slice());
    }
}
