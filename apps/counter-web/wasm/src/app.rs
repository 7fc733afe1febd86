//! Counter widget mounted on the live page

use std::cell::RefCell;
use std::rc::Rc;

use counter_core::{CounterWidget, COUNT_DISPLAY_ID, INCREMENT_BUTTON_ID};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::surface::DomText;

/// Mounted counter: owns the widget state and the click handler
#[wasm_bindgen]
pub struct CounterApp {
    widget: Rc<RefCell<CounterWidget<DomText>>>,
    button: Option<Element>,
    on_click: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl CounterApp {
    /// Bind to `#increment` and `#count` in the current document
    ///
    /// # Errors
    /// Returns JsValue error if unable to access window or document
    pub fn mount() -> Result<CounterApp, JsValue> {
        let window =
            web_sys::window().ok_or_else(|| JsValue::from_str("No window object available"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("No document object available"))?;
        Self::mount_in(&document)
    }

    /// Current click count
    pub fn count(&self) -> f64 {
        // JS numbers are exact well past any realistic click count
        self.widget.borrow().count() as f64
    }

    /// Count a click without going through the DOM event
    pub fn increment(&self) -> f64 {
        self.widget.borrow_mut().increment() as f64
    }

    pub fn reset(&self) {
        self.widget.borrow_mut().reset();
    }

    /// Whether a click handler was registered
    #[wasm_bindgen(js_name = isListening)]
    pub fn is_listening(&self) -> bool {
        self.on_click.is_some()
    }
}

impl CounterApp {
    /// Bind to the counter elements of `document`
    ///
    /// The click handler is only registered when both elements exist; the
    /// app is returned either way so `reset` keeps working.
    pub fn mount_in(document: &Document) -> Result<CounterApp, JsValue> {
        let button = document.get_element_by_id(INCREMENT_BUTTON_ID);
        let display = document.get_element_by_id(COUNT_DISPLAY_ID);
        let widget = Rc::new(RefCell::new(CounterWidget::new(
            display.clone().map(DomText),
        )));

        let on_click = match (&button, &display) {
            (Some(button), Some(_)) => {
                let handle = Rc::clone(&widget);
                let closure = Closure::<dyn FnMut()>::new(move || {
                    handle.borrow_mut().increment();
                });
                button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
                Some(closure)
            }
            _ => {
                web_sys::console::warn_1(&JsValue::from_str(
                    "Counter elements missing, click handler not registered",
                ));
                None
            }
        };

        Ok(CounterApp {
            widget,
            button,
            on_click,
        })
    }
}

impl Drop for CounterApp {
    fn drop(&mut self) {
        if let (Some(button), Some(closure)) = (&self.button, &self.on_click) {
            let _ = button
                .remove_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        }
    }
}
