//! Inputs accepted by the element factory: tags, attribute bags and children.

use crate::host::DocumentHost;
use chrono::{DateTime, Utc};
use std::fmt;

/// A value in an attribute bag.
#[derive(Clone, PartialEq)]
pub enum AttributeValue<L> {
    /// Numeric value, set in its script string form.
    Number(f64),
    /// String value, set verbatim.
    String(String),
    /// Timestamp, set in its long date form.
    Date(DateTime<Utc>),
    /// `true` sets an empty attribute; `false` sets nothing.
    Bool(bool),
    /// Event listener; registered when the key starts with `on`.
    Listener(L),
}

impl<L> AttributeValue<L> {
    /// Wraps a host listener.
    pub fn listener(listener: L) -> Self {
        AttributeValue::Listener(listener)
    }
}

impl<L> fmt::Debug for AttributeValue<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            AttributeValue::String(s) => f.debug_tuple("String").field(s).finish(),
            AttributeValue::Date(d) => f.debug_tuple("Date").field(d).finish(),
            AttributeValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            AttributeValue::Listener(_) => f.write_str("Listener(..)"),
        }
    }
}

impl<L> From<&str> for AttributeValue<L> {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl<L> From<String> for AttributeValue<L> {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl<L> From<bool> for AttributeValue<L> {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl<L> From<f64> for AttributeValue<L> {
    fn from(value: f64) -> Self {
        AttributeValue::Number(value)
    }
}

impl<L> From<i32> for AttributeValue<L> {
    fn from(value: i32) -> Self {
        AttributeValue::Number(f64::from(value))
    }
}

impl<L> From<u32> for AttributeValue<L> {
    fn from(value: u32) -> Self {
        AttributeValue::Number(f64::from(value))
    }
}

impl<L> From<DateTime<Utc>> for AttributeValue<L> {
    fn from(value: DateTime<Utc>) -> Self {
        AttributeValue::Date(value)
    }
}

/// Ordered attribute bag with unique keys.
///
/// Re-inserting a key replaces its value but keeps its original position.
#[derive(Clone, PartialEq)]
pub struct Attributes<L> {
    entries: Vec<(String, AttributeValue<L>)>,
}

impl<L> fmt::Debug for Attributes<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<L> Default for Attributes<L> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<L> Attributes<L> {
    /// Creates an empty bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Attributes::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttributeValue<L>>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttributeValue<L>>,
    ) -> Option<AttributeValue<L>> {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    /// Looks up a value by key.
    pub fn get(&self, key: &str) -> Option<&AttributeValue<L>> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the bag has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue<L>)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<L> IntoIterator for Attributes<L> {
    type Item = (String, AttributeValue<L>);
    type IntoIter = std::vec::IntoIter<(String, AttributeValue<L>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<L, K, V> FromIterator<(K, V)> for Attributes<L>
where
    K: Into<String>,
    V: Into<AttributeValue<L>>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut attributes = Attributes::new();
        for (key, value) in iter {
            attributes.insert(key, value);
        }
        attributes
    }
}

/// Deferred child: called once during append and must yield a node.
pub type Thunk<H> =
    Box<dyn FnOnce() -> Result<<H as DocumentHost>::Node, <H as DocumentHost>::Error>>;

/// A child argument, in the order the appender checks its shapes.
pub enum Child<H: DocumentHost> {
    /// Appends nothing.
    Absent,
    /// Appended element by element, flattening nested lists.
    List(Vec<Child<H>>),
    /// Appended as a text node.
    Text(String),
    /// Appended as-is; an attached node moves to the new parent.
    Node(H::Node),
    /// Invoked, and the returned node appended.
    Thunk(Thunk<H>),
    /// Appends nothing, whatever the value.
    Bool(bool),
    /// Appended as a text node of its string form.
    Number(f64),
    /// Appended as a text node of its long date form.
    Date(DateTime<Utc>),
    /// Any other value, already converted to its string form.
    Other(String),
}

impl<H: DocumentHost> Child<H> {
    /// Wraps an existing node.
    pub fn node(node: H::Node) -> Self {
        Child::Node(node)
    }

    /// Wraps a closure producing a node.
    pub fn thunk<F>(f: F) -> Self
    where
        F: FnOnce() -> Result<H::Node, H::Error> + 'static,
    {
        Child::Thunk(Box::new(f))
    }

    /// Builds a list child from anything convertible.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Child<H>>,
    {
        Child::List(items.into_iter().map(Into::into).collect())
    }
}

impl<H: DocumentHost> fmt::Debug for Child<H>
where
    H::Node: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Absent => f.write_str("Absent"),
            Child::List(items) => f.debug_tuple("List").field(items).finish(),
            Child::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Child::Node(n) => f.debug_tuple("Node").field(n).finish(),
            Child::Thunk(_) => f.write_str("Thunk(..)"),
            Child::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Child::Number(n) => f.debug_tuple("Number").field(n).finish(),
            Child::Date(d) => f.debug_tuple("Date").field(d).finish(),
            Child::Other(s) => f.debug_tuple("Other").field(s).finish(),
        }
    }
}

impl<H: DocumentHost> From<&str> for Child<H> {
    fn from(value: &str) -> Self {
        Child::Text(value.to_string())
    }
}

impl<H: DocumentHost> From<String> for Child<H> {
    fn from(value: String) -> Self {
        Child::Text(value)
    }
}

impl<H: DocumentHost> From<bool> for Child<H> {
    fn from(value: bool) -> Self {
        Child::Bool(value)
    }
}

impl<H: DocumentHost> From<f64> for Child<H> {
    fn from(value: f64) -> Self {
        Child::Number(value)
    }
}

impl<H: DocumentHost> From<i32> for Child<H> {
    fn from(value: i32) -> Self {
        Child::Number(f64::from(value))
    }
}

impl<H: DocumentHost> From<u32> for Child<H> {
    fn from(value: u32) -> Self {
        Child::Number(f64::from(value))
    }
}

impl<H: DocumentHost> From<DateTime<Utc>> for Child<H> {
    fn from(value: DateTime<Utc>) -> Self {
        Child::Date(value)
    }
}

impl<H: DocumentHost, T: Into<Child<H>>> From<Option<T>> for Child<H> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Child::Absent, Into::into)
    }
}

impl<H: DocumentHost, T: Into<Child<H>>> From<Vec<T>> for Child<H> {
    fn from(value: Vec<T>) -> Self {
        Child::list(value)
    }
}

/// User-defined markup node: receives the attribute bag and the raw child
/// list and returns whatever node it builds.
pub type Component<H> = Box<
    dyn FnOnce(
        Option<Attributes<<H as DocumentHost>::Listener>>,
        Vec<Child<H>>,
    ) -> Result<<H as DocumentHost>::Node, <H as DocumentHost>::Error>,
>;

/// What a markup node names: a built-in tag or a component.
pub enum TagDescriptor<H: DocumentHost> {
    /// Built-in element name such as `div` or `circle`.
    Tag(String),
    /// Caller-supplied component.
    Component(Component<H>),
}

impl<H: DocumentHost> TagDescriptor<H> {
    /// Wraps a component closure.
    pub fn component<F>(f: F) -> Self
    where
        F: FnOnce(Option<Attributes<H::Listener>>, Vec<Child<H>>) -> Result<H::Node, H::Error>
            + 'static,
    {
        TagDescriptor::Component(Box::new(f))
    }
}

impl<H: DocumentHost> fmt::Debug for TagDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TagDescriptor::Tag(tag) => f.debug_tuple("Tag").field(tag).finish(),
            TagDescriptor::Component(_) => f.write_str("Component(..)"),
        }
    }
}

impl<H: DocumentHost> From<&str> for TagDescriptor<H> {
    fn from(value: &str) -> Self {
        TagDescriptor::Tag(value.to_string())
    }
}

impl<H: DocumentHost> From<String> for TagDescriptor<H> {
    fn from(value: String) -> Self {
        TagDescriptor::Tag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Attrs = Attributes<()>;

    #[test]
    fn reinserting_keeps_position() {
        let mut attrs = Attrs::new().with("a", 1).with("b", "x");
        let previous = attrs.insert("a", "again");

        assert_eq!(previous, Some(AttributeValue::Number(1.0)));
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(attrs.get("a"), Some(&AttributeValue::String("again".into())));
    }

    #[test]
    fn collects_from_pairs() {
        let attrs: Attrs = vec![("id", "main"), ("title", "hello")].into_iter().collect();
        assert_eq!(attrs.len(), 2);
        assert!(!attrs.is_empty());
        assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["id", "title"]);
    }

    #[test]
    fn listener_debug_is_opaque() {
        let listener: AttributeValue<()> = AttributeValue::listener(());
        assert_eq!(format!("{listener:?}"), "Listener(..)");

        let attrs = Attrs::new().with("n", 1.5).with("on", true);
        assert_eq!(format!("{attrs:?}"), r#"{"n": Number(1.5), "on": Bool(true)}"#);
    }
}
