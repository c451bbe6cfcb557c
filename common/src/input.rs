//! Buttons, the events they trigger and the queue between them and the loop.
//!
//! Button sources run independently of the control tick (GPIO interrupts on
//! the board, window events in the simulator). They push [`ButtonEvent`]s into
//! an [`InputQueue`], and the controller drains it once per tick.

use heapless::Deque;

use crate::config::INPUT_QUEUE_CAPACITY;

/// Physical buttons on the display board.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Button {
    A,
    B,
    X,
    Y,
}

impl Button {
    /// All buttons, in board order.
    pub const ALL: [Self; 4] = [Self::A, Self::B, Self::X, Self::Y];

    /// Event this button triggers.
    #[inline]
    pub const fn event(self) -> ButtonEvent {
        match self {
            Self::A => ButtonEvent::Next,
            Self::B => ButtonEvent::Acknowledge,
            Self::X => ButtonEvent::ToggleSubview,
            Self::Y => ButtonEvent::NoOp,
        }
    }
}

/// What a button press asks the application to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonEvent {
    /// Move to the next view.
    Next,
    /// Clear every latched alarm.
    Acknowledge,
    /// Flip between the pages of a paged view.
    ToggleSubview,
    /// Reserved button, does nothing.
    NoOp,
}

impl From<Button> for ButtonEvent {
    fn from(button: Button) -> Self { button.event() }
}

/// Bounded FIFO of pending button events.
pub struct InputQueue {
    events: Deque<ButtonEvent, INPUT_QUEUE_CAPACITY>,
}

impl InputQueue {
    /// Create an empty queue.
    pub const fn new() -> Self { Self { events: Deque::new() } }

    /// Append an event. A full queue hands the event back.
    pub fn push(
        &mut self,
        event: ButtonEvent,
    ) -> Result<(), ButtonEvent> {
        self.events.push_back(event)
    }

    /// Remove and yield queued events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = ButtonEvent> + '_ {
        core::iter::from_fn(move || self.events.pop_front())
    }

    /// Number of queued events.
    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }
}

impl Default for InputQueue {
    fn default() -> Self { Self::new() }
}

// =============================================================================
// Unit Tests
// =============================================================================
