//! Opaque capture of markup the typed model does not interpret

use std::fmt;
use std::rc::Rc;

use super::{PomDocument, PomElement};

/// A whole subtree carried through the typed model untouched.
///
/// Exclusions, plugin executions and configuration, and test resources can
/// hold arbitrary nested markup. Rather than modeling it, the deserializer
/// keeps the parsed source document alive and remembers which element was
/// captured; the serializer deep-copies that element into the output.
///
/// Equality compares the captured markup, not identity, so two projects
/// deserialized from the same text compare equal.
#[derive(Clone, Default)]
pub struct BlackBox {
    capture: Option<Capture>,
}

#[derive(Clone)]
struct Capture {
    document: Rc<PomDocument>,
    element: PomElement,
}

impl BlackBox {
    /// A capture of nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Capture `element` of `document`, or nothing when `element` is `None`.
    pub fn capture(document: &Rc<PomDocument>, element: Option<PomElement>) -> Self {
        Self {
            capture: element.map(|element| Capture {
                document: Rc::clone(document),
                element,
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.capture.is_none()
    }

    /// The document that owns the captured element, and the element itself.
    pub fn raw(&self) -> Option<(&PomDocument, PomElement)> {
        self.capture
            .as_ref()
            .map(|capture| (capture.document.as_ref(), capture.element))
    }

    /// Canonical rendering of the captured subtree; empty when nothing was
    /// captured.
    pub fn markup(&self) -> String {
        self.raw()
            .map(|(document, element)| document.canonical(element))
            .unwrap_or_default()
    }
}

impl PartialEq for BlackBox {
    fn eq(&self, other: &Self) -> bool {
        self.is_empty() == other.is_empty() && self.markup() == other.markup()
    }
}

impl fmt::Debug for BlackBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.raw() {
            Some(_) => f.debug_tuple("BlackBox").field(&self.markup()).finish(),
            None => f.write_str("BlackBox(empty)"),
        }
    }
}
