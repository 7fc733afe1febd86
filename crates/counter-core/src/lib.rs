//! Click counter state and display binding
//!
//! This crate holds the logic behind the page's counter widget. The DOM is
//! abstracted behind [`TextSurface`] so the same widget drives a real browser
//! element (see the `counter-wasm` app) and the in-process [`dom`] used by
//! the test suite.
//!
//! ## Usage
//!
//! ```
//! use counter_core::dom::{self, Document, Element};
//!
//! let document = Document::new("Simple Web App")
//!     .with_element(Element::new("button", "increment").with_text("Click me!"))
//!     .with_element(Element::new("span", "count").with_text("0"));
//!
//! let widget = dom::mount(&document);
//! document.get_element_by_id("increment").unwrap().click();
//!
//! assert_eq!(widget.borrow().count(), 1);
//! assert_eq!(document.get_element_by_id("count").unwrap().text_content(), "1");
//! ```

pub mod counter;
pub mod dom;
pub mod widget;

pub use counter::Counter;
pub use dom::{DomError, Document, Element};
pub use widget::{CounterWidget, TextSurface, COUNT_DISPLAY_ID, INCREMENT_BUTTON_ID};
