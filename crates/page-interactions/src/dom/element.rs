//! Mock DOM for native testing
//!
//! An arena of elements addressed by [`NodeId`] handles. Handles stay valid
//! for the lifetime of the document, which is what lets views capture them
//! once at bind time instead of re-querying selectors.

use std::collections::{BTreeMap, HashMap};

/// Handle to an element in a [`MockDom`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Arena index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Inline style properties
    pub styles: BTreeMap<String, String>,
    /// Whether a form control is disabled
    pub disabled: bool,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            styles: BTreeMap::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds one or more space-separated classes
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        for c in class.split_whitespace() {
            self.add_class(c);
        }
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Removes a class
    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Sets an inline style; an empty value removes the property
    pub fn set_style(&mut self, property: &str, value: &str) {
        if value.is_empty() {
            self.styles.remove(property);
        } else {
            self.styles.insert(property.to_string(), value.to_string());
        }
    }

    /// Gets an inline style
    #[must_use]
    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    /// Whether the `hidden` utility class is absent
    #[must_use]
    pub fn is_shown(&self) -> bool {
        !self.has_class("hidden")
    }

    /// Child handles in document order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Parent handle
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// DOM events recorded by the mock document
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Pointer click on an element
    Click {
        /// Clicked element
        target: NodeId,
    },
    /// Smooth scroll bringing an element into view
    ScrollIntoView {
        /// Scrolled element
        target: NodeId,
    },
    /// Icon library refresh
    IconRefresh,
}

/// Mock document for driving views without a browser
#[derive(Debug)]
pub struct MockDom {
    nodes: Vec<Option<DomElement>>,
    root: NodeId,
    body: NodeId,
    event_history: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates a document with an `html` root and an empty `body`
    #[must_use]
    pub fn new() -> Self {
        let mut dom = Self {
            nodes: vec![Some(DomElement::new("html"))],
            root: NodeId(0),
            body: NodeId(0),
            event_history: Vec::new(),
        };
        dom.body = dom.append(dom.root, DomElement::new("body"));
        dom
    }

    /// Document root
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Document body
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Appends `element` as the last child of `parent`
    pub fn append(&mut self, parent: NodeId, mut element: DomElement) -> NodeId {
        let id = NodeId(self.nodes.len());
        element.parent = Some(parent);
        element.children.clear();
        self.nodes.push(Some(element));
        if let Some(p) = self.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    /// Detaches `node` and its subtree from the document
    pub fn remove(&mut self, node: NodeId) {
        let Some(element) = self.get(node) else {
            return;
        };
        let parent = element.parent;
        let children = element.children.clone();
        for child in children {
            self.remove(child);
        }
        if let Some(p) = parent.and_then(|p| self.get_mut(p)) {
            p.children.retain(|c| *c != node);
        }
        if let Some(slot) = self.nodes.get_mut(node.0) {
            *slot = None;
        }
    }

    /// Removes every child of `node`
    pub fn clear_children(&mut self, node: NodeId) {
        let children = self.get(node).map(|e| e.children.clone()).unwrap_or_default();
        for child in children {
            self.remove(child);
        }
    }

    /// Gets an element
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&DomElement> {
        self.nodes.get(node.0).and_then(Option::as_ref)
    }

    /// Gets a mutable element
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut DomElement> {
        self.nodes.get_mut(node.0).and_then(Option::as_mut)
    }

    /// Descendants of `scope` in document order
    #[must_use]
    pub fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self
            .get(scope)
            .map(|e| e.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(node) = stack.pop() {
            out.push(node);
            if let Some(e) = self.get(node) {
                stack.extend(e.children.iter().rev().copied());
            }
        }
        out
    }

    /// Descendants of `scope` carrying `class`
    #[must_use]
    pub fn query_class(&self, scope: NodeId, class: &str) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|n| self.get(*n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// First descendant of `scope` carrying `class`
    #[must_use]
    pub fn query_first(&self, scope: NodeId, class: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.get(*n).is_some_and(|e| e.has_class(class)))
    }

    /// First descendant of `scope` whose attribute `key` equals `value`
    #[must_use]
    pub fn query_attr(&self, scope: NodeId, key: &str, value: &str) -> Option<NodeId> {
        self.descendants(scope)
            .into_iter()
            .find(|n| self.get(*n).and_then(|e| e.get_attr(key)) == Some(value))
    }

    /// Element by `id` attribute
    #[must_use]
    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|n| self.get(*n).is_some_and(|e| e.id == id))
    }

    /// Adds a class to `node`
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.add_class(class);
        }
    }

    /// Removes a class from `node`
    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        if let Some(e) = self.get_mut(node) {
            e.remove_class(class);
        }
    }

    /// Whether `node` carries `class`
    #[must_use]
    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.get(node).is_some_and(|e| e.has_class(class))
    }

    /// Sets an inline style on `node`
    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.set_style(property, value);
        }
    }

    /// Inline style of `node`
    #[must_use]
    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.get(node).and_then(|e| e.style(property))
    }

    /// Sets the text content of `node`
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        if let Some(e) = self.get_mut(node) {
            e.text_content = text.to_string();
        }
    }

    /// Text content of `node`
    #[must_use]
    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.get(node).map(|e| e.text_content.as_str())
    }

    /// Sets the disabled flag of `node`
    pub fn set_disabled(&mut self, node: NodeId, disabled: bool) {
        if let Some(e) = self.get_mut(node) {
            e.disabled = disabled;
        }
    }

    /// Whether `node` is disabled
    #[must_use]
    pub fn is_disabled(&self, node: NodeId) -> bool {
        self.get(node).is_some_and(|e| e.disabled)
    }

    /// Sets an attribute on `node`
    pub fn set_attr(&mut self, node: NodeId, key: &str, value: &str) {
        if let Some(e) = self.get_mut(node) {
            e.attributes.insert(key.to_string(), value.to_string());
        }
    }

    /// Records a click on `node`; returns `false` for disabled or detached
    /// elements, which swallow the click like real disabled buttons do
    pub fn click(&mut self, node: NodeId) -> bool {
        match self.get(node) {
            Some(e) if !e.disabled && e.style("pointer-events") != Some("none") => {
                self.event_history.push(DomEvent::Click { target: node });
                true
            }
            _ => false,
        }
    }

    /// Records a scroll-into-view request
    pub fn scroll_into_view(&mut self, node: NodeId) {
        self.event_history.push(DomEvent::ScrollIntoView { target: node });
    }

    /// Records an icon refresh
    pub fn refresh_icons(&mut self) {
        self.event_history.push(DomEvent::IconRefresh);
    }

    /// Number of icon refreshes so far
    #[must_use]
    pub fn icon_refreshes(&self) -> usize {
        self.event_history
            .iter()
            .filter(|e| matches!(e, DomEvent::IconRefresh))
            .count()
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Clears event history
    pub fn clear_event_history(&mut self) {
        self.event_history.clear();
    }

    /// Class names of the body, for deriving the page mode
    #[must_use]
    pub fn body_classes(&self) -> Vec<&str> {
        self.get(self.body)
            .map(|e| e.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }
}
