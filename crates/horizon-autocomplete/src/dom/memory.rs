//! In-memory document.

use slotmap::SlotMap;

use super::{Dom, ElementId, EventKind};
use crate::error::DomError;

#[derive(Debug, Default)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    inner_html: String,
    value: String,
    listeners: Vec<EventKind>,
}

/// A [`Dom`] implementation that keeps the whole document in memory.
///
/// Inner markup is stored verbatim and never parsed into elements. Every
/// mutating call increments [`mutation_count`](Self::mutation_count), which
/// lets callers assert that an operation left the document untouched.
///
/// The `class` attribute is backed by the element's class list.
#[derive(Debug)]
pub struct MemoryDocument {
    nodes: SlotMap<ElementId, Node>,
    body: ElementId,
    mutations: usize,
}

impl MemoryDocument {
    /// Create a document containing only a `<body>` element.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let body = nodes.insert(Node {
            tag: "body".to_string(),
            ..Node::default()
        });
        Self {
            nodes,
            body,
            mutations: 0,
        }
    }

    /// The `<body>` element.
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Get an element's tag name.
    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.nodes.get(element).map(|n| n.tag.as_str())
    }

    /// Get an element's children in document order.
    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.nodes
            .get(element)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Get an element's class list.
    pub fn classes(&self, element: ElementId) -> &[String] {
        self.nodes
            .get(element)
            .map(|n| n.classes.as_slice())
            .unwrap_or(&[])
    }

    /// Get the event types registered on an element.
    pub fn listeners(&self, element: ElementId) -> &[EventKind] {
        self.nodes
            .get(element)
            .map(|n| n.listeners.as_slice())
            .unwrap_or(&[])
    }

    /// Check whether an event type is registered on an element.
    pub fn has_listener(&self, element: ElementId, kind: EventKind) -> bool {
        self.listeners(element).contains(&kind)
    }

    /// Number of elements in the document, including `<body>`.
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of mutating operations performed so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    fn node_mut(&mut self, element: ElementId) -> Result<&mut Node, DomError> {
        self.mutations += 1;
        self.nodes
            .get_mut(element)
            .ok_or(DomError::UnknownElement(element))
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for MemoryDocument {
    fn exists(&self, element: ElementId) -> bool {
        self.nodes.contains_key(element)
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.nodes.get(element).and_then(|n| n.parent)
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.mutations += 1;
        self.nodes.insert(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        })
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<(), DomError> {
        if !self.nodes.contains_key(child) {
            return Err(DomError::UnknownElement(child));
        }
        if !self.nodes.contains_key(parent) {
            return Err(DomError::UnknownElement(parent));
        }
        if self.contains(child, parent) {
            return Err(DomError::Hierarchy { parent, child });
        }

        if let Some(old_parent) = self.parent_of(child) {
            self.node_mut(old_parent)?.children.retain(|&c| c != child);
        }
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    fn set_attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), DomError> {
        let node = self.node_mut(element)?;
        if name == "class" {
            node.classes = value.split_whitespace().map(String::from).collect();
            return Ok(());
        }
        match node.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<String> {
        let node = self.nodes.get(element)?;
        if name == "class" {
            return (!node.classes.is_empty()).then(|| node.classes.join(" "));
        }
        node.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn add_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        let node = self.node_mut(element)?;
        if !node.classes.iter().any(|c| c == class) {
            node.classes.push(class.to_string());
        }
        Ok(())
    }

    fn remove_class(&mut self, element: ElementId, class: &str) -> Result<(), DomError> {
        self.node_mut(element)?.classes.retain(|c| c != class);
        Ok(())
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.classes(element).iter().any(|c| c == class)
    }

    fn set_inner_html(&mut self, element: ElementId, html: &str) -> Result<(), DomError> {
        self.node_mut(element)?.inner_html = html.to_string();
        Ok(())
    }

    fn inner_html(&self, element: ElementId) -> Option<String> {
        self.nodes.get(element).map(|n| n.inner_html.clone())
    }

    fn value(&self, element: ElementId) -> Option<String> {
        self.nodes.get(element).map(|n| n.value.clone())
    }

    fn set_value(&mut self, element: ElementId, value: &str) -> Result<(), DomError> {
        self.node_mut(element)?.value = value.to_string();
        Ok(())
    }

    fn add_event_listener(
        &mut self,
        element: ElementId,
        kind: EventKind,
    ) -> Result<(), DomError> {
        let node = self.node_mut(element)?;
        if !node.listeners.contains(&kind) {
            node.listeners.push(kind);
        }
        Ok(())
    }
}
