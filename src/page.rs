//! Full-height page layout while the scroller is mounted.
//!
//! The canvas is sized to fill its container, which only works when both
//! `<html>` and `<body>` stretch to the full viewport height. Mounting sets
//! `height: 100%` on both; unmounting puts back whatever inline value was
//! there before.

/// Element whose inline height is managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageElement {
    /// The root `<html>` element.
    Root,
    /// The `<body>` element.
    Body,
}

/// Access to the inline `height` style of the page elements.
pub trait DocumentStyle {
    /// Current inline height (empty string when unset).
    fn height(&self, element: PageElement) -> String;
    /// Set the inline height. An empty string clears it.
    fn set_height(&mut self, element: PageElement, value: &str);
}

const FULL_HEIGHT: &str = "100%";
const ELEMENTS: [PageElement; 2] = [PageElement::Body, PageElement::Root];

/// Holds the page at full height until dropped.
pub struct FullHeightGuard<S: DocumentStyle> {
    style: S,
    previous: [String; 2],
}

impl<S: DocumentStyle> FullHeightGuard<S> {
    /// Record the current heights, then stretch both elements.
    pub fn mount(mut style: S) -> Self {
        let previous = ELEMENTS.map(|el| style.height(el));
        for el in ELEMENTS {
            style.set_height(el, FULL_HEIGHT);
        }
        Self { style, previous }
    }
}

impl<S: DocumentStyle> Drop for FullHeightGuard<S> {
    fn drop(&mut self) {
        for (el, value) in ELEMENTS.iter().zip(&self.previous) {
            self.style.set_height(*el, value);
        }
    }
}

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub use web::WebDocumentStyle;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
mod web {
    use wasm_bindgen::JsCast;
    use web_sys::{Document, HtmlElement};

    use super::{DocumentStyle, PageElement};
    use crate::error::TiltScrollError;

    /// [`DocumentStyle`] over the live DOM.
    pub struct WebDocumentStyle {
        root: HtmlElement,
        body: HtmlElement,
    }

    impl WebDocumentStyle {
        /// Bind to the document's `<html>` and `<body>` elements.
        ///
        /// # Errors
        ///
        /// Returns [`TiltScrollError::Platform`] if either element is
        /// missing.
        pub fn new(document: &Document) -> Result<Self, TiltScrollError> {
            let root = document
                .document_element()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                .ok_or_else(|| {
                    TiltScrollError::Platform("document has no root".into())
                })?;
            let body = document.body().ok_or_else(|| {
                TiltScrollError::Platform("document has no body".into())
            })?;
            Ok(Self { root, body })
        }

        fn element(&self, element: PageElement) -> &HtmlElement {
            match element {
                PageElement::Root => &self.root,
                PageElement::Body => &self.body,
            }
        }
    }

    impl DocumentStyle for WebDocumentStyle {
        fn height(&self, element: PageElement) -> String {
            self.element(element)
                .style()
                .get_property_value("height")
                .unwrap_or_default()
        }

        fn set_height(&mut self, element: PageElement, value: &str) {
            let style = self.element(element).style();
            let result = if value.is_empty() {
                style.remove_property("height").map(|_| ())
            } else {
                style.set_property("height", value)
            };
            if let Err(e) = result {
                log::error!("failed to set {element:?} height: {e:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeStyle(Rc<RefCell<HashMap<PageElement, String>>>);

    impl DocumentStyle for FakeStyle {
        fn height(&self, element: PageElement) -> String {
            self.0.borrow().get(&element).cloned().unwrap_or_default()
        }

        fn set_height(&mut self, element: PageElement, value: &str) {
            let _ = self.0.borrow_mut().insert(element, value.to_owned());
        }
    }

    #[test]
    fn mount_stretches_and_drop_clears() {
        let style = FakeStyle::default();
        let guard = FullHeightGuard::mount(style.clone());
        assert_eq!(style.height(PageElement::Root), "100%");
        assert_eq!(style.height(PageElement::Body), "100%");

        drop(guard);
        assert_eq!(style.height(PageElement::Root), "");
        assert_eq!(style.height(PageElement::Body), "");
    }

    #[test]
    fn drop_restores_previous_inline_values() {
        let mut style = FakeStyle::default();
        style.set_height(PageElement::Body, "auto");
        style.set_height(PageElement::Root, "50vh");

        drop(FullHeightGuard::mount(style.clone()));
        assert_eq!(style.height(PageElement::Body), "auto");
        assert_eq!(style.height(PageElement::Root), "50vh");
    }
}
