use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Selector, Viewport};
use crate::host::{Document, ElementId, ScrollBehavior};

/// One node of a [`MemoryDocument`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryElement {
    pub id: Option<String>,
    pub classes: SmallVec<[String; 2]>,
    pub attributes: IndexMap<String, String>,
    pub value: Option<String>,
    pub text_content: String,
    pub styles: IndexMap<String, String>,
    pub surface: Option<Viewport>,
    /// Vertical document offset, used as the scroll destination.
    pub offset_top: f64,
}

impl MemoryElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_surface(mut self, viewport: Viewport) -> Self {
        self.surface = Some(viewport);
        self
    }

    #[must_use]
    pub fn with_offset_top(mut self, offset_top: f64) -> Self {
        self.offset_top = offset_top;
        self
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(id) => self.id.as_deref() == Some(id.as_str()),
            Selector::Class(class) => self.classes.iter().any(|c| c == class),
        }
    }
}

/// Headless element tree used by tests, benches and the replay tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryDocument {
    elements: Vec<MemoryElement>,
    scroll_top: f64,
    scroll_log: Vec<(ElementId, ScrollBehavior)>,
}

impl MemoryDocument {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The solar landing page: navigation, a three-slide carousel, the energy
    /// chart canvas and the panel calculator form.
    #[must_use]
    pub fn landing_page() -> Self {
        let mut document = Self::new();
        for (section, offset_top) in [
            ("home", 0.0),
            ("about", 640.0),
            ("projects", 1280.0),
            ("energy", 1920.0),
            ("calculator", 2560.0),
        ] {
            document.push(
                MemoryElement::new()
                    .with_class("nav-link")
                    .with_attribute("href", format!("#{section}")),
            );
            document.push(
                MemoryElement::new()
                    .with_id(section)
                    .with_offset_top(offset_top),
            );
        }

        document.push(MemoryElement::new().with_class("carousel-container"));
        for _ in 0..3 {
            document.push(MemoryElement::new().with_class("carousel-slide"));
        }
        document.push(MemoryElement::new().with_class("prev-btn"));
        document.push(MemoryElement::new().with_class("next-btn"));

        document.push(
            MemoryElement::new()
                .with_id("energyChart")
                .with_surface(Viewport::new(400, 400)),
        );

        document.push(MemoryElement::new().with_id("solarForm"));
        for field in ["energyUsage", "sunlightHours", "panelWattage"] {
            document.push(MemoryElement::new().with_id(field).with_value(""));
        }
        document.push(MemoryElement::new().with_id("result"));
        document
    }

    pub fn push(&mut self, element: MemoryElement) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&MemoryElement> {
        self.elements.get(element.0)
    }

    pub fn element_mut(&mut self, element: ElementId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(element.0)
    }

    /// Looks up an element by `#id` or `.class` text. Invalid selectors match nothing.
    #[must_use]
    pub fn find(&self, selector: &str) -> Option<ElementId> {
        Selector::parse(selector)
            .ok()
            .and_then(|selector| self.query(&selector))
    }

    /// Sets a form field value. Returns `false` when the element does not exist.
    pub fn set_value(&mut self, element: ElementId, value: impl Into<String>) -> bool {
        match self.element_mut(element) {
            Some(node) => {
                node.value = Some(value.into());
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.element(element)
            .and_then(|node| node.styles.get(property))
            .map(String::as_str)
    }

    #[must_use]
    pub fn text_content(&self, element: ElementId) -> Option<&str> {
        self.element(element).map(|node| node.text_content.as_str())
    }

    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    #[must_use]
    pub fn scroll_log(&self) -> &[(ElementId, ScrollBehavior)] {
        &self.scroll_log
    }
}

impl Document for MemoryDocument {
    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|node| node.matches(selector))
            .map(ElementId)
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        self.elements
            .iter()
            .enumerate()
            .filter(|(_, node)| node.matches(selector))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        self.element(element)
            .and_then(|node| node.attributes.get(name))
            .cloned()
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.element(element).and_then(|node| node.value.clone())
    }

    fn surface_size(&self, element: ElementId) -> Option<Viewport> {
        self.element(element).and_then(|node| node.surface)
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.element_mut(element) {
            node.styles.insert(property.to_owned(), value.to_owned());
        }
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        if let Some(node) = self.element_mut(element) {
            node.text_content = text.to_owned();
        }
    }

    fn scroll_into_view(&mut self, element: ElementId, behavior: ScrollBehavior) {
        if let Some(node) = self.element(element) {
            self.scroll_top = node.offset_top;
            self.scroll_log.push((element, behavior));
        }
    }
}
