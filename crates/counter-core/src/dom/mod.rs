//! Minimal in-process DOM for exercising the counter without a browser
//!
//! Only what the page needs is modeled: an element tree loaded from markup,
//! lookups by id and class, `textContent`, and synchronous event listeners.
//! Elements are cheap reference-counted handles, so a clone observes the
//! same text and listeners as the first handle, as in a real DOM.

mod html;

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::widget::{CounterWidget, TextSurface, COUNT_DISPLAY_ID, INCREMENT_BUTTON_ID};

type Listener = Rc<RefCell<dyn FnMut()>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("No element with id \"{0}\"")]
    ElementNotFound(String),

    #[error("Text of #{id} was \"{actual}\", expected \"{expected}\"")]
    AssertionFailed {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Malformed markup at byte {offset}: {message}")]
    Parse { offset: usize, message: String },
}

#[derive(Clone)]
enum Node {
    Text(String),
    Element(Element),
}

struct ElementData {
    tag: String,
    id: String,
    classes: RefCell<Vec<String>>,
    nodes: RefCell<Vec<Node>>,
    listeners: RefCell<Vec<(String, Listener)>>,
}

/// Handle to an element in a [`Document`]
#[derive(Clone)]
pub struct Element {
    inner: Rc<ElementData>,
}

impl Element {
    pub fn new(tag: &str, id: &str) -> Self {
        Self {
            inner: Rc::new(ElementData {
                tag: tag.to_ascii_lowercase(),
                id: id.to_string(),
                classes: RefCell::new(Vec::new()),
                nodes: RefCell::new(Vec::new()),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.set_text_content(text);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.inner.classes.borrow_mut().push(class.to_string());
        self
    }

    pub fn with_child(self, child: Element) -> Self {
        self.append_child(child);
        self
    }

    pub fn tag_name(&self) -> &str {
        &self.inner.tag
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.classes.borrow().iter().any(|c| c == class)
    }

    pub fn append_child(&self, child: Element) {
        self.inner.nodes.borrow_mut().push(Node::Element(child));
    }

    fn append_text(&self, text: &str) {
        self.inner.nodes.borrow_mut().push(Node::Text(text.to_string()));
    }

    /// Direct element children, in document order
    pub fn children(&self) -> Vec<Element> {
        self.inner
            .nodes
            .borrow()
            .iter()
            .filter_map(|node| match node {
                Node::Element(e) => Some(e.clone()),
                Node::Text(_) => None,
            })
            .collect()
    }

    /// All elements below this one, depth first in document order
    pub fn descendants(&self) -> Vec<Element> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<Element>) {
        for child in self.children() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    /// Concatenated text of this element and everything below it
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for node in self.inner.nodes.borrow().iter() {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(e) => e.collect_text(out),
            }
        }
    }

    /// Replace all children with a single text node
    pub fn set_text_content(&self, text: &str) {
        let mut nodes = self.inner.nodes.borrow_mut();
        nodes.clear();
        if !text.is_empty() {
            nodes.push(Node::Text(text.to_string()));
        }
    }

    /// Register a listener for `event`. Listeners run in registration order.
    pub fn add_event_listener<F>(&self, event: &str, listener: F)
    where
        F: FnMut() + 'static,
    {
        let listener: Listener = Rc::new(RefCell::new(listener));
        self.inner
            .listeners
            .borrow_mut()
            .push((event.to_string(), listener));
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    /// Run every listener registered for `event` to completion
    ///
    /// A listener that dispatches back into an event it is handling is not
    /// re-entered; the nested dispatch skips it.
    pub fn dispatch(&self, event: &str) {
        // Snapshot first: a listener may register further listeners.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, listener)| Rc::clone(listener))
            .collect();

        for listener in listeners {
            let Ok(mut call) = listener.try_borrow_mut() else {
                debug!(event, "Listener already running, skipped");
                continue;
            };
            (&mut *call)();
        }
    }

    pub fn click(&self) {
        self.dispatch("click");
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.inner.tag)
            .field("id", &self.inner.id)
            .field("text", &self.text_content())
            .finish()
    }
}

impl TextSurface for Element {
    fn set_text(&self, text: &str) {
        self.set_text_content(text);
    }
}

/// A page: a title and its element tree, indexed by id
#[derive(Debug, Clone, Default)]
pub struct Document {
    title: String,
    roots: Vec<Element>,
    elements: Vec<Element>,
    id_index: HashMap<String, usize>,
}

impl Document {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Load a page from markup. The title is the text of the first
    /// `<title>` element.
    pub fn from_html(markup: &str) -> Result<Self, DomError> {
        let roots = html::parse(markup)?;
        let mut document = Document::default();
        for root in roots {
            document.append(root);
        }
        document.title = document
            .elements
            .iter()
            .find(|e| e.tag_name() == "title")
            .map(|e| e.text_content().trim().to_string())
            .unwrap_or_default();
        Ok(document)
    }

    pub fn with_element(mut self, element: Element) -> Self {
        self.append(element);
        self
    }

    /// Add a top-level element and index it with its descendants. When ids
    /// collide the first element in document order keeps the id, matching
    /// `getElementById`.
    pub fn append(&mut self, element: Element) {
        let subtree = std::iter::once(element.clone()).chain(element.descendants());
        for e in subtree {
            if !e.id().is_empty() {
                self.id_index
                    .entry(e.id().to_string())
                    .or_insert(self.elements.len());
            }
            self.elements.push(e);
        }
        self.roots.push(element);
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Top-level elements
    pub fn roots(&self) -> &[Element] {
        &self.roots
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Element> {
        self.id_index.get(id).map(|&i| self.elements[i].clone())
    }

    pub fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.elements
            .iter()
            .filter(|e| e.has_class(class))
            .cloned()
            .collect()
    }

    pub fn click(&self, id: &str) -> Result<(), DomError> {
        let element = self
            .get_element_by_id(id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
        element.click();
        Ok(())
    }

    pub fn assert_text(&self, id: &str, expected: &str) -> Result<(), DomError> {
        let element = self
            .get_element_by_id(id)
            .ok_or_else(|| DomError::ElementNotFound(id.to_string()))?;
        let actual = element.text_content();
        if actual != expected {
            return Err(DomError::AssertionFailed {
                id: id.to_string(),
                expected: expected.to_string(),
                actual,
            });
        }
        Ok(())
    }
}

/// Bind a fresh counter widget to the page's `#increment` button and
/// `#count` display.
///
/// The click handler is only registered when both elements exist. The widget
/// is returned either way so callers can still read and reset it.
pub fn mount(document: &Document) -> Rc<RefCell<CounterWidget<Element>>> {
    let button = document.get_element_by_id(INCREMENT_BUTTON_ID);
    let output = document.get_element_by_id(COUNT_DISPLAY_ID);
    let widget = Rc::new(RefCell::new(CounterWidget::new(output.clone())));

    match (button, output.is_some()) {
        (Some(button), true) => {
            let handle = Rc::clone(&widget);
            button.add_event_listener("click", move || {
                handle.borrow_mut().increment();
            });
        }
        (button, has_output) => {
            let has_button = button.is_some();
            debug!(
                has_button,
                has_output, "Counter elements missing, click handler not registered"
            );
        }
    }

    widget
}
