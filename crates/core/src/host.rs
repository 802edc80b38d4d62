//! The document tree the factory builds into.

/// Primitive tree operations the factory and child appender rely on.
///
/// Implementations own node storage and validation. Every failure is reported
/// through [`DocumentHost::Error`] and propagated by the factory unchanged.
pub trait DocumentHost {
    /// Handle to a node in the tree.
    type Node;
    /// Callable registered as an event listener.
    type Listener;
    /// Failure raised by a tree operation.
    type Error;

    /// Creates an element in the default (HTML) namespace.
    fn create_element(&self, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Creates an element in the given namespace.
    fn create_element_ns(&self, namespace: &str, tag: &str) -> Result<Self::Node, Self::Error>;

    /// Creates a text node.
    fn create_text_node(&self, data: &str) -> Result<Self::Node, Self::Error>;

    /// Sets (or overwrites) an attribute on an element.
    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str)
    -> Result<(), Self::Error>;

    /// Registers a listener for `event` with default options.
    fn add_event_listener(
        &self,
        element: &Self::Node,
        event: &str,
        listener: Self::Listener,
    ) -> Result<(), Self::Error>;

    /// Appends `child` as the last child of `parent`, detaching it from any
    /// previous parent.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), Self::Error>;
}
