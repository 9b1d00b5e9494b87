//! Contracts between the widgets and the page that hosts them.
//!
//! Widgets never hold the document. They resolve the element handles they
//! need at construction and receive `&mut impl Document` whenever an event
//! requires a side effect. The same goes for the repeating timer.

mod memory_document;
mod scheduler;

pub use memory_document::{MemoryDocument, MemoryElement};
pub use scheduler::{ManualScheduler, Scheduler, TimerHandle, TimerId};

use serde::{Deserialize, Serialize};

use crate::core::{Selector, Viewport};
use crate::error::{PageError, PageResult};

/// Opaque handle to one element of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Element tree consumed by the widgets.
pub trait Document {
    /// First element matching `selector`, in document order.
    fn query(&self, selector: &Selector) -> Option<ElementId>;

    /// All elements matching `selector`, in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Current value of a form field. `None` when `element` is not a field.
    fn value(&self, element: ElementId) -> Option<String>;

    /// Drawable size of a canvas element. `None` when no surface can be acquired.
    fn surface_size(&self, element: ElementId) -> Option<Viewport>;

    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn set_text_content(&mut self, element: ElementId, text: &str);

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior);
}

/// Resolves a required element or fails setup with `MissingElement`.
pub fn require_element<D: Document + ?Sized>(
    document: &D,
    selector: &Selector,
) -> PageResult<ElementId> {
    document
        .query(selector)
        .ok_or_else(|| PageError::MissingElement {
            selector: selector.to_string(),
        })
}

/// Resolves a required non-empty element list.
pub fn require_elements<D: Document + ?Sized>(
    document: &D,
    selector: &Selector,
) -> PageResult<Vec<ElementId>> {
    let elements = document.query_all(selector);
    if elements.is_empty() {
        return Err(PageError::MissingElement {
            selector: selector.to_string(),
        });
    }
    Ok(elements)
}
