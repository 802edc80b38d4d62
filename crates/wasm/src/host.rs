use domjsx_core::DocumentHost;
use js_sys::Function;
use wasm_bindgen::{JsCast, JsError, JsValue};
use web_sys::{Document, Element, Node};

/// [`DocumentHost`] over a browser `Document`.
///
/// Every operation maps to the DOM method of the same name; exceptions the
/// browser throws come back as the `Err` value unchanged.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    /// Wraps an existing document.
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The global `window.document`.
    pub fn current() -> Result<Self, JsValue> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| JsError::new("no global document is available").into())
    }

    /// The wrapped document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}

fn as_element<'a>(node: &'a Node, operation: &str) -> Result<&'a Element, JsValue> {
    node.dyn_ref::<Element>()
        .ok_or_else(|| JsError::new(&format!("cannot {operation} on a non-element node")).into())
}

impl DocumentHost for WebDocument {
    type Node = Node;
    type Listener = Function;
    type Error = JsValue;

    fn create_element(&self, tag: &str) -> Result<Node, JsValue> {
        self.document.create_element(tag).map(Node::from)
    }

    fn create_element_ns(&self, namespace: &str, tag: &str) -> Result<Node, JsValue> {
        self.document
            .create_element_ns(Some(namespace), tag)
            .map(Node::from)
    }

    fn create_text_node(&self, data: &str) -> Result<Node, JsValue> {
        Ok(self.document.create_text_node(data).into())
    }

    fn set_attribute(&self, element: &Node, name: &str, value: &str) -> Result<(), JsValue> {
        as_element(element, "set an attribute")?.set_attribute(name, value)
    }

    fn add_event_listener(
        &self,
        element: &Node,
        event: &str,
        listener: Function,
    ) -> Result<(), JsValue> {
        element.add_event_listener_with_callback(event, &listener)
    }

    fn append_child(&self, parent: &Node, child: &Node) -> Result<(), JsValue> {
        parent.append_child(child).map(|_| ())
    }
}
