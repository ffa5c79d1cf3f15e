//! The host document seam.
//!
//! The widget never talks to a browser directly. Everything it needs from the
//! page (finding the input's parent, creating the results container, toggling
//! classes, writing markup and values) goes through the [`Dom`] trait, and
//! everything the page reports back arrives as a [`DomEvent`].
//!
//! [`MemoryDocument`] is an in-memory implementation used for headless
//! sessions and tests.

mod memory;

pub use memory::MemoryDocument;

use slotmap::new_key_type;

use crate::error::DomError;

new_key_type! {
    /// A handle to an element in the host document.
    pub struct ElementId;
}

/// DOM event types the widget listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The element's value changed.
    Input,
    /// The element was clicked.
    Click,
    /// The element lost focus.
    Blur,
    /// The element gained focus.
    Focus,
    /// A key was released.
    KeyUp,
    /// Focus left the element or one of its descendants.
    FocusOut,
}

impl EventKind {
    /// The DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Click => "click",
            Self::Blur => "blur",
            Self::Focus => "focus",
            Self::KeyUp => "keyup",
            Self::FocusOut => "focusout",
        }
    }
}

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Arrow-Up (key code 38).
    ArrowUp,
    /// Arrow-Down (key code 40).
    ArrowDown,
    /// Enter (key code 13).
    Enter,
    /// Any other key, by key code.
    Other(u32),
}

impl Key {
    /// Map a DOM `keyCode` to a key.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            38 => Self::ArrowUp,
            40 => Self::ArrowDown,
            13 => Self::Enter,
            other => Self::Other(other),
        }
    }

    /// The DOM `keyCode` for this key.
    pub fn key_code(self) -> u32 {
        match self {
            Self::ArrowUp => 38,
            Self::ArrowDown => 40,
            Self::Enter => 13,
            Self::Other(code) => code,
        }
    }

    /// Whether this is Arrow-Up or Arrow-Down.
    pub fn is_arrow(self) -> bool {
        matches!(self, Self::ArrowUp | Self::ArrowDown)
    }
}

/// The node a click inside the results container landed on.
///
/// Generated list markup is not materialized as elements, so the host
/// describes the clicked node by its class list and its
/// `data-autocomplete-value` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClickTarget {
    /// Classes on the clicked node.
    pub classes: Vec<String>,
    /// The node's `data-autocomplete-value`, if any.
    pub value: Option<String>,
}

impl ClickTarget {
    /// Describe a clicked node.
    pub fn new(classes: Vec<String>, value: Option<String>) -> Self {
        Self { classes, value }
    }

    /// Check whether the clicked node carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// An event delivered to the widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// `input` on the input element, carrying its new value.
    Input {
        /// The raw value of the input.
        value: String,
    },
    /// `click` on the input element.
    Click,
    /// `focus` on the input element.
    Focus,
    /// `blur` on the input element.
    Blur {
        /// The element receiving focus, when known.
        related: Option<ElementId>,
    },
    /// `keyup` on the input element.
    KeyUp(Key),
    /// `click` somewhere inside the results container.
    ContainerClick(ClickTarget),
    /// `focusout` from the results container or something inside it.
    ContainerFocusOut {
        /// The element receiving focus, when known.
        related: Option<ElementId>,
    },
}

impl DomEvent {
    /// The DOM event type this event corresponds to.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Input { .. } => EventKind::Input,
            Self::Click | Self::ContainerClick(_) => EventKind::Click,
            Self::Focus => EventKind::Focus,
            Self::Blur { .. } => EventKind::Blur,
            Self::KeyUp(_) => EventKind::KeyUp,
            Self::ContainerFocusOut { .. } => EventKind::FocusOut,
        }
    }
}

/// Operations the widget needs from the host document.
///
/// Mutating operations fail with [`DomError::UnknownElement`] when handed an
/// element the document does not know.
pub trait Dom {
    /// Check whether the element exists.
    fn exists(&self, element: ElementId) -> bool;

    /// Get the element's parent node.
    fn parent_of(&self, element: ElementId) -> Option<ElementId>;

    /// Create a detached element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Append `child` to `parent`, detaching it from any previous parent.
    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError>;

    /// Set an attribute.
    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str)
    -> Result<(), DomError>;

    /// Get an attribute.
    fn attribute(&self, element: ElementId, name: &str) -> Option<String>;

    /// Add a class to the element's class list.
    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError>;

    /// Remove a class from the element's class list.
    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError>;

    /// Check whether the element's class list contains `class`.
    fn has_class(&self, element: ElementId, class: &str) -> bool;

    /// Replace the element's inner markup.
    fn set_inner_html(&mut self, element: ElementId, html: &str) -> Result<(), DomError>;

    /// Get the element's inner markup.
    fn inner_html(&self, element: ElementId) -> Option<String>;

    /// Get the value of a form control.
    fn value(&self, element: ElementId) -> Option<String>;

    /// Set the value of a form control.
    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DomError>;

    /// Register interest in an event type on the element.
    fn add_event_listener(&mut self, element: ElementId, kind: EventKind)
    -> Result<(), DomError>;

    /// Check whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent_of(id);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes() {
        assert_eq!(Key::from_key_code(38), Key::ArrowUp);
        assert_eq!(Key::from_key_code(40), Key::ArrowDown);
        assert_eq!(Key::from_key_code(13), Key::Enter);
        assert_eq!(Key::from_key_code(65), Key::Other(65));
        assert_eq!(Key::Enter.key_code(), 13);
        assert!(Key::ArrowUp.is_arrow());
        assert!(!Key::Enter.is_arrow());
    }

    #[test]
    fn test_event_kinds() {
        assert_eq!(DomEvent::Focus.kind(), EventKind::Focus);
        assert_eq!(
            DomEvent::ContainerClick(ClickTarget::default()).kind(),
            EventKind::Click
        );
        assert_eq!(
            DomEvent::ContainerFocusOut { related: None }.kind(),
            EventKind::FocusOut
        );
        assert_eq!(EventKind::KeyUp.as_str(), "keyup");
        assert_eq!(EventKind::FocusOut.as_str(), "focusout");
    }

    #[test]
    fn test_click_target_classes() {
        let target = ClickTarget::new(
            vec!["autocomplete__item".to_string()],
            Some("apple".to_string()),
        );
        assert!(target.has_class("autocomplete__item"));
        assert!(!target.has_class("autocomplete__list"));
    }
}
