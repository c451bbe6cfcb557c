//! The control loop body.
//!
//! # Tick Order
//!
//! 1. Sample and update every channel.
//! 2. Drain pending button events into [`App::handle`].
//! 3. Advance the audible alarm.
//! 4. Render the current screen into the framebuffer.
//! 5. Present the frame.
//!
//! Events land after the update, so an acknowledge shows in the frame of the
//! tick it was pressed in. A channel that is still dry latches its alarm
//! again on the next tick.
//!
//! The caller owns the clock and the pacing. It passes the time since start
//! into [`Controller::tick`] and sleeps between calls.

use core::time::Duration;

use log::warn;

use crate::alarm::{AlarmBeeper, GeneralSettings};
use crate::app::App;
use crate::frame::Frame;
use crate::hardware::{Buzzer, DisplaySink, MoistureSensor, Pump};
use crate::input::{Button, InputQueue};

pub struct Controller<S, P, B> {
    app: App<S, P>,
    inputs: InputQueue,
    beeper: AlarmBeeper,
    buzzer: B,
    frame: Frame,
}

impl<S, P, B> Controller<S, P, B>
where
    S: MoistureSensor,
    P: Pump,
    B: Buzzer,
{
    pub fn new(
        app: App<S, P>,
        general: GeneralSettings,
        buzzer: B,
    ) -> Self {
        Self {
            app,
            inputs: InputQueue::new(),
            beeper: AlarmBeeper::new(general),
            buzzer,
            frame: Frame::new(),
        }
    }

    /// Queue a button press for the next tick. A full queue drops it.
    pub fn press(
        &mut self,
        button: Button,
    ) {
        if let Err(event) = self.inputs.push(button.event()) {
            warn!("Input queue full, dropping {event:?}");
        }
    }

    /// Run one tick at `now` and present the result to `display`.
    pub fn tick<D>(
        &mut self,
        now: Duration,
        display: &mut D,
    ) -> Result<(), D::Error>
    where
        D: DisplaySink,
    {
        self.app.update(now);

        for event in self.inputs.drain() {
            self.app.handle(event);
        }
        self.beeper.tick(now, self.app.any_alarm(), &mut self.buzzer);

        self.app.render(&mut self.frame);
        display.present(&self.frame)
    }

    #[inline]
    pub fn inputs(&mut self) -> &mut InputQueue { &mut self.inputs }
}

impl<S, P, B> Controller<S, P, B> {
    #[inline]
    pub const fn app(&self) -> &App<S, P> { &self.app }

    #[inline]
    pub fn app_mut(&mut self) -> &mut App<S, P> { &mut self.app }

    #[inline]
    pub const fn frame(&self) -> &Frame { &self.frame }

    #[inline]
    pub const fn buzzer(&self) -> &B { &self.buzzer }

    #[inline]
    pub const fn general(&self) -> &GeneralSettings { self.beeper.settings() }
}

// =============================================================================
// Unit Tests
// =============================================================================
