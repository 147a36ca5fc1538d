//! Bridges Dioxus signals to the store's state-cell seam, so the views
//! drive the exact same action code the headless tests drive.

use dioxus::prelude::*;
use store::StateCell;

/// A [`StateCell`] over a signal. Copy, like the signal itself.
#[derive(Clone, Copy)]
pub struct SignalCell<T: 'static>(pub Signal<T>);

impl<T: Clone + 'static> StateCell<T> for SignalCell<T> {
    fn get(&self) -> T {
        self.0.peek().clone()
    }

    fn set(&mut self, value: T) {
        self.0.set(value);
    }
}
