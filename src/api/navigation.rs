use tracing::{debug, warn};

use crate::core::Selector;
use crate::error::{PageError, PageResult};
use crate::host::{Document, ElementId, ScrollBehavior};

/// Smooth-scroll handler for in-page navigation links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationHandler {
    links: Vec<ElementId>,
}

impl NavigationHandler {
    /// Collects every element matching `link_selector`.
    ///
    /// A page without navigation links is valid; the handler then owns nothing.
    pub fn attach<D: Document + ?Sized>(document: &D, link_selector: &Selector) -> Self {
        let links = document.query_all(link_selector);
        debug!(links = links.len(), "navigation handler attached");
        Self { links }
    }

    #[must_use]
    pub fn links(&self) -> &[ElementId] {
        &self.links
    }

    #[must_use]
    pub fn owns(&self, element: ElementId) -> bool {
        self.links.contains(&element)
    }

    /// Handles a click on one of the owned links.
    ///
    /// The default jump is suppressed for every owned link, including when the
    /// target cannot be resolved; in that case nothing scrolls and the error is
    /// returned to the caller. Returns the element scrolled to.
    pub fn on_click<D: Document + ?Sized>(
        &self,
        document: &mut D,
        link: ElementId,
    ) -> PageResult<ElementId> {
        let href = document
            .attribute(link, "href")
            .ok_or_else(|| PageError::MissingAttribute {
                attribute: "href".to_owned(),
            })?;

        let target = Selector::parse(&href)
            .ok()
            .and_then(|selector| document.query(&selector));
        let Some(target) = target else {
            warn!(href = %href, "navigation target does not resolve");
            return Err(PageError::UnresolvedTarget { target: href });
        };

        document.scroll_into_view(target, ScrollBehavior::Smooth);
        debug!(href = %href, target = target.0, "smooth scroll to section");
        Ok(target)
    }
}
