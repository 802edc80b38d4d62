//! In-memory document tree.
//!
//! [`Document`] is an arena of nodes addressed by [`NodeId`]. It implements
//! [`DocumentHost`] with browser-like rules: names are validated, attributes
//! keep their first-set position, a node has at most one parent and moves on
//! re-append, and the same listener is registered once per event type.

/// HTML serialization of document subtrees.
pub mod serialize;

use crate::error::DomError;
use crate::host::DocumentHost;
use crate::tables::{HTML_NAMESPACE, SVG_NAMESPACE};
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle to a node owned by a [`Document`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Event delivered to listeners by [`Document::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    /// Event type the listener was registered for.
    pub event_type: String,
    /// Node the event was dispatched on.
    pub target: NodeId,
}

/// Listener callable stored on an element.
pub type Listener = Rc<dyn Fn(&Event)>;

/// Wraps a closure as a [`Listener`].
pub fn listener(f: impl Fn(&Event) + 'static) -> Listener {
    Rc::new(f)
}

/// Element namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Namespace {
    /// `http://www.w3.org/1999/xhtml`
    Html,
    /// `http://www.w3.org/2000/svg`
    Svg,
    /// Any other namespace URI.
    Other(String),
}

impl Namespace {
    fn from_uri(uri: &str) -> Self {
        match uri {
            HTML_NAMESPACE => Namespace::Html,
            SVG_NAMESPACE => Namespace::Svg,
            other => Namespace::Other(other.to_string()),
        }
    }

    /// Namespace URI.
    pub fn uri(&self) -> &str {
        match self {
            Namespace::Html => HTML_NAMESPACE,
            Namespace::Svg => SVG_NAMESPACE,
            Namespace::Other(uri) => uri,
        }
    }
}

/// Serializable view of a subtree, for inspection and tests.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum NodeSnapshot {
    /// An element and its subtree.
    Element {
        /// Namespace URI.
        namespace: String,
        /// Tag name as created.
        name: String,
        /// Attributes in first-set order.
        attributes: Vec<(String, String)>,
        /// Event types with at least one listener, in registration order.
        listeners: Vec<String>,
        /// Child snapshots in document order.
        children: Vec<NodeSnapshot>,
    },
    /// A text node.
    Text {
        /// Character data.
        content: String,
    },
}

struct ElementData {
    namespace: Namespace,
    name: String,
    attributes: Vec<(String, String)>,
    listeners: Vec<(String, Listener)>,
}

impl ElementData {
    fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for (event, _) in &self.listeners {
            if !types.contains(event) {
                types.push(event.clone());
            }
        }
        types
    }
}

enum NodeKind {
    Element(ElementData),
    Text(String),
}

struct NodeSlot {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// Arena-backed document; single-threaded.
#[derive(Default)]
pub struct Document {
    nodes: RefCell<Vec<NodeSlot>>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.len())
            .finish()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes ever created in this document.
    pub fn len(&self) -> usize {
        self.nodes.borrow().len()
    }

    /// Returns true if no node has been created yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.borrow().is_empty()
    }

    fn insert(&self, kind: NodeKind) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(NodeSlot {
            parent: None,
            children: Vec::new(),
            kind,
        });
        id
    }

    fn with_slot<T>(&self, id: NodeId, f: impl FnOnce(&NodeSlot) -> T) -> Option<T> {
        self.nodes.borrow().get(id.0).map(f)
    }

    fn with_element<T>(&self, id: NodeId, f: impl FnOnce(&ElementData) -> T) -> Option<T> {
        self.with_slot(id, |slot| match &slot.kind {
            NodeKind::Element(element) => Some(f(element)),
            NodeKind::Text(_) => None,
        })
        .flatten()
    }

    fn with_element_mut<T>(
        &self,
        id: NodeId,
        operation: &'static str,
        f: impl FnOnce(&mut ElementData) -> T,
    ) -> Result<T, DomError> {
        let mut nodes = self.nodes.borrow_mut();
        let slot = nodes
            .get_mut(id.0)
            .ok_or(DomError::UnknownNode(id))?;
        match &mut slot.kind {
            NodeKind::Element(element) => Ok(f(element)),
            NodeKind::Text(_) => Err(DomError::NotAnElement { operation }),
        }
    }

    /// Tag name of an element.
    pub fn tag_name(&self, id: NodeId) -> Option<String> {
        self.with_element(id, |element| element.name.clone())
    }

    /// Namespace of an element.
    pub fn namespace(&self, id: NodeId) -> Option<Namespace> {
        self.with_element(id, |element| element.namespace.clone())
    }

    /// Value of one attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.with_element(id, |element| {
            element
                .attributes
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        })
        .flatten()
    }

    /// All attributes in first-set order.
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        self.with_element(id, |element| element.attributes.clone())
            .unwrap_or_default()
    }

    /// Event types with listeners, in registration order, without repeats.
    pub fn listener_types(&self, id: NodeId) -> Vec<String> {
        self.with_element(id, ElementData::event_types)
            .unwrap_or_default()
    }

    /// Children in document order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.with_slot(id, |slot| slot.children.clone())
            .unwrap_or_default()
    }

    /// Parent node, if attached.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.with_slot(id, |slot| slot.parent).flatten()
    }

    /// Character data of a text node.
    pub fn text(&self, id: NodeId) -> Option<String> {
        self.with_slot(id, |slot| match &slot.kind {
            NodeKind::Text(data) => Some(data.clone()),
            NodeKind::Element(_) => None,
        })
        .flatten()
    }

    /// Concatenated text of the node and its descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(data) = self.text(id) {
            out.push_str(&data);
            return;
        }
        for child in self.children(id) {
            self.collect_text(child, out);
        }
    }

    /// Invokes the listeners registered on `target` for `event_type`, in
    /// registration order. Returns how many ran. Events do not propagate.
    pub fn dispatch(&self, target: NodeId, event_type: &str) -> usize {
        let listeners: Vec<Listener> = self
            .with_element(target, |element| {
                element
                    .listeners
                    .iter()
                    .filter(|(event, _)| event == event_type)
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect()
            })
            .unwrap_or_default();

        // The arena is not borrowed here, so listeners may mutate the document.
        let event = Event {
            event_type: event_type.to_string(),
            target,
        };
        for listener in &listeners {
            listener(&event);
        }
        listeners.len()
    }

    /// Captures the subtree rooted at `id`.
    pub fn snapshot(&self, id: NodeId) -> Option<NodeSnapshot> {
        let nodes = self.nodes.borrow();
        snapshot_of(&nodes, id)
    }

    fn is_inclusive_ancestor(nodes: &[NodeSlot], ancestor: NodeId, mut node: NodeId) -> bool {
        loop {
            if node == ancestor {
                return true;
            }
            match nodes[node.0].parent {
                Some(parent) => node = parent,
                None => return false,
            }
        }
    }
}

fn snapshot_of(nodes: &[NodeSlot], id: NodeId) -> Option<NodeSnapshot> {
    let slot = nodes.get(id.0)?;
    let snapshot = match &slot.kind {
        NodeKind::Text(data) => NodeSnapshot::Text {
            content: data.clone(),
        },
        NodeKind::Element(element) => NodeSnapshot::Element {
            namespace: element.namespace.uri().to_string(),
            name: element.name.clone(),
            attributes: element.attributes.clone(),
            listeners: element.event_types(),
            children: slot
                .children
                .iter()
                .filter_map(|child| snapshot_of(nodes, *child))
                .collect(),
        },
    };
    Some(snapshot)
}

/// Checks `name` against the XML `Name` production, treating every non-ASCII
/// character as a name character.
fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    let is_start = |c: char| c.is_ascii_alphabetic() || c == '_' || c == ':' || !c.is_ascii();
    is_start(first)
        && chars.all(|c| is_start(c) || c.is_ascii_digit() || c == '-' || c == '.')
}

impl DocumentHost for Document {
    type Node = NodeId;
    type Listener = Listener;
    type Error = DomError;

    fn create_element(&self, tag: &str) -> Result<NodeId, DomError> {
        self.create_element_ns(HTML_NAMESPACE, tag)
    }

    fn create_element_ns(&self, namespace: &str, tag: &str) -> Result<NodeId, DomError> {
        if !is_valid_name(tag) {
            return Err(DomError::invalid_character(tag));
        }
        Ok(self.insert(NodeKind::Element(ElementData {
            namespace: Namespace::from_uri(namespace),
            name: tag.to_string(),
            attributes: Vec::new(),
            listeners: Vec::new(),
        })))
    }

    fn create_text_node(&self, data: &str) -> Result<NodeId, DomError> {
        Ok(self.insert(NodeKind::Text(data.to_string())))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), DomError> {
        if !is_valid_name(name) {
            return Err(DomError::invalid_character(name));
        }
        self.with_element_mut(*element, "set an attribute", |element| {
            match element.attributes.iter_mut().find(|(n, _)| n == name) {
                Some((_, existing)) => *existing = value.to_string(),
                None => element
                    .attributes
                    .push((name.to_string(), value.to_string())),
            }
        })
    }

    fn add_event_listener(
        &self,
        element: &NodeId,
        event: &str,
        listener: Listener,
    ) -> Result<(), DomError> {
        self.with_element_mut(*element, "add an event listener", |element| {
            let registered = element
                .listeners
                .iter()
                .any(|(e, l)| e == event && Rc::ptr_eq(l, &listener));
            if !registered {
                element.listeners.push((event.to_string(), listener));
            }
        })
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), DomError> {
        let (parent, child) = (*parent, *child);
        let mut nodes = self.nodes.borrow_mut();
        for id in [parent, child] {
            if nodes.get(id.0).is_none() {
                return Err(DomError::UnknownNode(id));
            }
        }
        if matches!(nodes[parent.0].kind, NodeKind::Text(_)) {
            return Err(DomError::hierarchy_request(format!(
                "text node {parent} cannot have children"
            )));
        }
        if Self::is_inclusive_ancestor(&nodes, child, parent) {
            return Err(DomError::hierarchy_request(format!(
                "{child} is an inclusive ancestor of {parent}"
            )));
        }

        if let Some(previous) = nodes[child.0].parent.take() {
            nodes[previous.0].children.retain(|c| *c != child);
        }
        nodes[child.0].parent = Some(parent);
        nodes[parent.0].children.push(child);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn names_are_validated() {
        let doc = Document::new();
        assert!(doc.create_element("div").is_ok());
        assert!(doc.create_element("my-widget").is_ok());
        assert!(doc.create_element("clipPath").is_ok());
        assert_eq!(
            doc.create_element("1div"),
            Err(DomError::invalid_character("1div"))
        );
        assert!(doc.create_element("").is_err());
        assert!(doc.create_element("a b").is_err());

        let el = doc.create_element("div").unwrap();
        assert!(doc.set_attribute(&el, "data-x", "1").is_ok());
        assert!(doc.set_attribute(&el, "a=b", "1").is_err());
    }

    #[test]
    fn attributes_overwrite_in_place() {
        let doc = Document::new();
        let el = doc.create_element("div").unwrap();
        doc.set_attribute(&el, "a", "1").unwrap();
        doc.set_attribute(&el, "b", "2").unwrap();
        doc.set_attribute(&el, "a", "3").unwrap();

        assert_eq!(
            doc.attributes(el),
            vec![("a".to_string(), "3".to_string()), ("b".to_string(), "2".to_string())]
        );
        assert_eq!(doc.attribute(el, "a").as_deref(), Some("3"));
        assert_eq!(doc.attribute(el, "c"), None);
    }

    #[test]
    fn text_nodes_reject_element_operations() {
        let doc = Document::new();
        let text = doc.create_text_node("hi").unwrap();
        let el = doc.create_element("span").unwrap();

        assert!(matches!(
            doc.set_attribute(&text, "a", "1"),
            Err(DomError::NotAnElement { .. })
        ));
        assert!(matches!(
            doc.append_child(&text, &el),
            Err(DomError::HierarchyRequest { .. })
        ));
    }

    #[test]
    fn append_moves_attached_node() {
        let doc = Document::new();
        let first = doc.create_element("div").unwrap();
        let second = doc.create_element("div").unwrap();
        let child = doc.create_element("span").unwrap();

        doc.append_child(&first, &child).unwrap();
        doc.append_child(&second, &child).unwrap();

        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), vec![child]);
        assert_eq!(doc.parent(child), Some(second));
    }

    #[test]
    fn append_rejects_cycles() {
        let doc = Document::new();
        let outer = doc.create_element("div").unwrap();
        let inner = doc.create_element("div").unwrap();
        doc.append_child(&outer, &inner).unwrap();

        assert!(doc.append_child(&inner, &outer).is_err());
        assert!(doc.append_child(&outer, &outer).is_err());
    }

    #[test]
    fn unknown_handles_are_reported() {
        let doc = Document::new();
        let other = Document::new();
        other.create_element("div").unwrap();
        let foreign = other.create_element("div").unwrap();
        let el = doc.create_element("div").unwrap();

        assert_eq!(
            doc.append_child(&el, &foreign),
            Err(DomError::UnknownNode(foreign))
        );
    }

    #[test]
    fn same_listener_registers_once() {
        let doc = Document::new();
        let el = doc.create_element("button").unwrap();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let l = listener(move |_| counter.set(counter.get() + 1));

        doc.add_event_listener(&el, "click", Rc::clone(&l)).unwrap();
        doc.add_event_listener(&el, "click", Rc::clone(&l)).unwrap();
        doc.add_event_listener(&el, "focus", l).unwrap();

        assert_eq!(doc.listener_types(el), vec!["click", "focus"]);
        assert_eq!(doc.dispatch(el, "click"), 1);
        assert_eq!(hits.get(), 1);
        assert_eq!(doc.dispatch(el, "keydown"), 0);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let doc = Document::new();
        let el = doc.create_element("button").unwrap();
        let calls = Rc::new(RefCell::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let calls = Rc::clone(&calls);
            let l = listener(move |_| calls.borrow_mut().push(name));
            doc.add_event_listener(&el, "click", l).unwrap();
        }

        assert_eq!(doc.dispatch(el, "click"), 3);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn node_ids_are_distinct_arena_slots() {
        let doc = Document::new();
        let ids: Vec<NodeId> = (0..3)
            .map(|_| doc.create_element("li").unwrap())
            .collect();

        assert_eq!(doc.len(), 3);
        assert_eq!(
            ids.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["#0", "#1", "#2"]
        );
    }

    #[test]
    fn listeners_may_mutate_the_document() {
        let doc = Rc::new(Document::new());
        let el = doc.create_element("button").unwrap();
        let handle = Rc::clone(&doc);
        doc.add_event_listener(
            &el,
            "click",
            listener(move |event| {
                handle.set_attribute(&event.target, "clicked", "").unwrap();
            }),
        )
        .unwrap();

        doc.dispatch(el, "click");
        assert_eq!(doc.attribute(el, "clicked").as_deref(), Some(""));
    }

    #[test]
    fn text_content_concatenates_descendants() {
        let doc = Document::new();
        let p = doc.create_element("p").unwrap();
        let b = doc.create_element("b").unwrap();
        for (parent, data) in [(p, "a"), (b, "b")] {
            let t = doc.create_text_node(data).unwrap();
            doc.append_child(&parent, &t).unwrap();
        }
        doc.append_child(&p, &b).unwrap();

        assert_eq!(doc.text_content(p), "ab");
        assert_eq!(doc.len(), 4);
    }
}
