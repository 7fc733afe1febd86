//! Counter widget: a [`Counter`] bound to the element that displays it

use crate::counter::Counter;

/// Id of the button whose clicks are counted
pub const INCREMENT_BUTTON_ID: &str = "increment";

/// Id of the element showing the current count
pub const COUNT_DISPLAY_ID: &str = "count";

/// Anything that can show a line of text, typically a DOM element's
/// `textContent`.
///
/// DOM handles are shared references with interior mutability, so writes go
/// through `&self`.
pub trait TextSurface {
    fn set_text(&self, text: &str);
}

impl<T: TextSurface + ?Sized> TextSurface for &T {
    fn set_text(&self, text: &str) {
        (**self).set_text(text)
    }
}

/// Click counter mirrored into an optional display surface
///
/// Every mutation writes the new value to the display before returning, so
/// the displayed text never disagrees with [`CounterWidget::count`].
#[derive(Debug)]
pub struct CounterWidget<S> {
    counter: Counter,
    display: Option<S>,
}

impl<S: TextSurface> CounterWidget<S> {
    /// Create a widget at zero. The display is left untouched until the
    /// first change.
    pub fn new(display: Option<S>) -> Self {
        Self {
            counter: Counter::new(),
            display,
        }
    }

    /// Count one click and show the new value
    pub fn increment(&mut self) -> u64 {
        let value = self.counter.increment();
        self.render();
        value
    }

    pub fn count(&self) -> u64 {
        self.counter.get()
    }

    /// Set the count back to zero, updating the display if there is one
    pub fn reset(&mut self) {
        self.counter.reset();
        self.render();
    }

    pub fn is_bound(&self) -> bool {
        self.display.is_some()
    }

    fn render(&self) {
        if let Some(display) = &self.display {
            display.set_text(&self.counter.get().to_string());
        }
    }
}
