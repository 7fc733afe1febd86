//! Browser element as a counter display

use counter_core::TextSurface;
use web_sys::Element;

/// Writes the count into a DOM element's `textContent`
#[derive(Debug, Clone)]
pub struct DomText(pub Element);

impl TextSurface for DomText {
    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }
}
