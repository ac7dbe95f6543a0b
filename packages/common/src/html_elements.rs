//! Native HTML elements that can be dropped onto a canvas.
//!
//! Each supported element kind has a default size and the attribute keys the
//! property panel edits. Kinds missing from the table are not implemented yet;
//! callers must refuse to create them.

use crate::geometry::Size;

/// Stroke used for every HTML child
pub const HTML_STROKE: &str = "#000000";

/// Static description of a supported element kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HtmlElementSpec {
    pub name: &'static str,
    pub size: Size,
    pub attributes: &'static [&'static str],
}

const ELEMENTS: &[HtmlElementSpec] = &[
    HtmlElementSpec {
        name: "Image",
        size: Size::new(100.0, 100.0),
        attributes: &["className", "id", "Src"],
    },
    HtmlElementSpec {
        name: "Form",
        size: Size::new(150.0, 150.0),
        attributes: &["className", "id", "text"],
    },
    HtmlElementSpec {
        name: "Button",
        size: Size::new(75.0, 28.0),
        attributes: &["className", "id", "text"],
    },
    HtmlElementSpec {
        name: "Link",
        size: Size::new(50.0, 50.0),
        attributes: &["className", "id", "href", "text"],
    },
    HtmlElementSpec {
        name: "List",
        size: Size::new(75.0, 75.0),
        attributes: &["className", "id", "text"],
    },
    HtmlElementSpec {
        name: "Paragraph",
        size: Size::new(250.0, 75.0),
        attributes: &["className", "id", "text"],
    },
];

/// Look up an element kind by name
pub fn lookup(name: &str) -> Option<&'static HtmlElementSpec> {
    ELEMENTS.iter().find(|spec| spec.name == name)
}

/// Default size of an element kind, `None` when the kind is not implemented
pub fn default_size(name: &str) -> Option<Size> {
    lookup(name).map(|spec| spec.size)
}

/// Names of every implemented element kind
pub fn known_elements() -> impl Iterator<Item = &'static str> {
    ELEMENTS.iter().map(|spec| spec.name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_element_has_size() {
        assert_eq!(default_size("Image"), Some(Size::new(100.0, 100.0)));
        assert_eq!(default_size("Paragraph"), Some(Size::new(250.0, 75.0)));
    }

    #[test]
    fn test_unknown_element_is_unimplemented() {
        assert_eq!(default_size("Marquee"), None);
        assert_eq!(default_size("image"), None);
    }

    #[test]
    fn test_every_known_element_has_nonzero_size() {
        for name in known_elements() {
            let size = default_size(name).unwrap();
            assert!(size.width > 0.0 && size.height > 0.0, "{} has zero size", name);
        }
    }
}
