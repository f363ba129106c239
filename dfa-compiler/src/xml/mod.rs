//! A minimal XML-like document tree.
//!
//! This is not a general-purpose XML library: it implements exactly the
//! grammar the DFA builder needs (elements, attributes, interleaved text,
//! the five standard entity references, and a single retained prolog), no
//! namespaces, no DTDs, no comments.

mod entities;
mod parse;

pub use entities::{decode_entities, encode_entities};
pub use parse::parse;

/// Compile-time capacity defaults, carried over from the original
/// implementation's bounded arrays as documented contracts rather than
/// hard type-level limits (see DESIGN.md).
pub mod limits {
    pub const MAX_TAG_SIZE: usize = 32;
    pub const MAX_CONTENT_SIZE: usize = 256;
    pub const MAX_CHILDREN: usize = 32;
    pub const MAX_NODES: usize = 1024;
    pub const MAX_ATTRIBUTES: usize = 32;
    pub const MAX_ATTRIBUTE_NAME_SIZE: usize = 32;
    pub const MAX_ATTRIBUTE_VAL_SIZE: usize = 256;
}

/// Index of a node within an [`XmlDocument`]'s arena. Stands in for the
/// original's raw parent pointer: cheap to copy, stable for the lifetime
/// of the document.
pub type NodeId = usize;

/// One element in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: Box<str>,
    pub attributes: Vec<(Box<str>, Box<str>)>,
    pub children: Vec<NodeId>,
    /// `text.len() == children.len() + 1`: fragment `i` precedes child `i`,
    /// the last fragment follows the last child.
    pub text: Vec<Box<str>>,
    pub parent: Option<NodeId>,
}

impl XmlNode {
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.as_ref() == name)
            .map(|(_, v)| v.as_ref())
    }
}

/// A parsed document: a node arena plus the retained prolog and the root
/// node's id (always `0`, since the root is the first node allocated).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub meta: Option<Box<str>>,
    pub nodes: Vec<XmlNode>,
    pub root: NodeId,
}

impl XmlDocument {
    pub fn node(&self, id: NodeId) -> &XmlNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &XmlNode {
        &self.nodes[self.root]
    }

    /// Element children of `id`, in document order (text fragments excluded).
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &XmlNode> {
        self.nodes[id].children.iter().map(move |&c| &self.nodes[c])
    }
}
