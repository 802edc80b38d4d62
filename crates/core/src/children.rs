//! Child appender: turns child values into nodes under a parent.

use crate::format::{date_to_string, number_to_string};
use crate::host::DocumentHost;
use crate::value::Child;

/// Appends `child` to `parent`, flattening lists in order.
///
/// `Absent` and booleans append nothing. Strings, numbers, dates and other
/// scalars become text nodes. Thunks are invoked once and their node appended
/// as returned.
pub fn append_child<H: DocumentHost>(
    host: &H,
    parent: &H::Node,
    child: Child<H>,
) -> Result<(), H::Error> {
    match child {
        Child::Absent => Ok(()),
        Child::List(items) => items
            .into_iter()
            .try_for_each(|item| append_child(host, parent, item)),
        Child::Text(text) => append_text(host, parent, &text),
        Child::Node(node) => host.append_child(parent, &node),
        Child::Thunk(thunk) => {
            let node = thunk()?;
            host.append_child(parent, &node)
        }
        Child::Bool(_) => Ok(()),
        Child::Number(n) => append_text(host, parent, &number_to_string(n)),
        Child::Date(d) => append_text(host, parent, &date_to_string(&d)),
        Child::Other(text) => append_text(host, parent, &text),
    }
}

fn append_text<H: DocumentHost>(host: &H, parent: &H::Node, text: &str) -> Result<(), H::Error> {
    let node = host.create_text_node(text)?;
    host.append_child(parent, &node)
}
