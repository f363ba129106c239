//! A hand-rolled, non-recursive scanner implementing the grammar:
//!
//! ```text
//! Document   := Prolog? Element
//! Prolog     := ("<?" ... "?>")*
//! Element    := "<" Tag Attribute* ("/>" | ">" Content "</" Tag ">")
//! Attribute  := Name "=" Quote Value Quote
//! Content    := Text (Element Text)*
//! ```
//!
//! Nesting is walked with an explicit stack of open ancestor ids rather
//! than by recursing the parser, so parse depth is bounded by the node
//! arena rather than the call stack.

use super::{decode_entities, limits, NodeId, XmlDocument, XmlNode};
use crate::error::XmlError;

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    nodes: Vec<XmlNode>,
    meta: Option<Box<str>>,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn eat(&mut self, s: &str) -> bool {
        if self.rest().starts_with(s) {
            self.pos += s.len();
            true
        } else {
            false
        }
    }

    fn skip_ws(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn skip_prolog(&mut self) -> Result<(), XmlError> {
        loop {
            self.skip_ws();
            if self.rest().starts_with("<?") {
                let start = self.pos;
                let body_offset = self.rest()[2..]
                    .find("?>")
                    .ok_or(XmlError::UnexpectedEof(self.pos))?;
                let end = start + 2 + body_offset + 2;
                if self.meta.is_none() {
                    self.meta = Some(self.input[start..end].to_string().into_boxed_str());
                }
                self.pos = end;
            } else {
                return Ok(());
            }
        }
    }

    fn parse_name(&mut self) -> Result<Box<str>, XmlError> {
        let start = self.pos;
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | ':') {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        if self.pos == start {
            return Err(XmlError::ExpectedName(start));
        }
        Ok(self.input[start..self.pos].to_string().into_boxed_str())
    }

    /// Parses a tag name and its attributes. Assumes the leading `<` has
    /// already been consumed. Returns the new node's id and whether it was
    /// self-closing.
    fn open_tag(&mut self, parent: Option<NodeId>) -> Result<(NodeId, bool), XmlError> {
        let tag = self.parse_name()?;
        if tag.len() > limits::MAX_TAG_SIZE {
            return Err(XmlError::CapacityExceeded("tag", limits::MAX_TAG_SIZE));
        }

        let id = self.nodes.len();
        if id >= limits::MAX_NODES {
            return Err(XmlError::CapacityExceeded("nodes", limits::MAX_NODES));
        }
        self.nodes.push(XmlNode {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
            text: Vec::new(),
            parent,
        });

        loop {
            self.skip_ws();
            match self.peek_char() {
                Some('/') => {
                    self.pos += 1;
                    if !self.eat(">") {
                        return Err(XmlError::UnexpectedEof(self.pos));
                    }
                    return Ok((id, true));
                }
                Some('>') => {
                    self.pos += 1;
                    return Ok((id, false));
                }
                Some(_) => self.parse_attribute(id)?,
                None => return Err(XmlError::UnexpectedEof(self.pos)),
            }
        }
    }

    fn parse_attribute(&mut self, owner: NodeId) -> Result<(), XmlError> {
        let name_start = self.pos;
        let name = self.parse_name()?;
        if name.len() > limits::MAX_ATTRIBUTE_NAME_SIZE {
            return Err(XmlError::CapacityExceeded(
                "attribute name",
                limits::MAX_ATTRIBUTE_NAME_SIZE,
            ));
        }
        self.skip_ws();
        if !self.eat("=") {
            return Err(XmlError::ExpectedEquals(name_start, name));
        }
        self.skip_ws();
        let quote = match self.peek_char() {
            Some(q @ ('"' | '\'')) => q,
            _ => return Err(XmlError::ExpectedQuote(self.pos, name)),
        };
        self.pos += 1;
        let val_start = self.pos;
        let val_end = self.rest().find(quote).map(|o| val_start + o);
        let val_end = match val_end {
            Some(e) => e,
            None => return Err(XmlError::UnexpectedEof(self.pos)),
        };
        let raw_value = &self.input[val_start..val_end];
        let value = decode_entities(raw_value);
        if value.len() > limits::MAX_ATTRIBUTE_VAL_SIZE {
            return Err(XmlError::CapacityExceeded(
                "attribute value",
                limits::MAX_ATTRIBUTE_VAL_SIZE,
            ));
        }
        self.pos = val_end + 1;

        let node = &mut self.nodes[owner];
        if node.attributes.iter().any(|(n, _)| n.as_ref() == name.as_ref()) {
            return Err(XmlError::DuplicateAttribute(
                self.pos,
                name,
                node.tag.clone(),
            ));
        }
        if node.attributes.len() >= limits::MAX_ATTRIBUTES {
            return Err(XmlError::CapacityExceeded(
                "attributes",
                limits::MAX_ATTRIBUTES,
            ));
        }
        node.attributes.push((name, value.into_boxed_str()));
        Ok(())
    }
}

/// Parses a complete document out of `input`.
pub fn parse(input: &str) -> Result<XmlDocument, XmlError> {
    let mut p = Parser {
        input,
        pos: 0,
        nodes: Vec::new(),
        meta: None,
    };

    p.skip_ws();
    p.skip_prolog()?;
    p.skip_ws();

    if !p.eat("<") {
        return Err(XmlError::MissingRoot(p.pos));
    }
    let (root_id, self_closed) = p.open_tag(None)?;

    let root = if self_closed {
        p.nodes[root_id].text.push("".into());
        root_id
    } else {
        let mut stack: Vec<NodeId> = vec![root_id];
        loop {
            let top = *stack.last().expect("stack non-empty while scanning content");
            let start = p.pos;
            let lt_offset = p
                .rest()
                .find('<')
                .ok_or(XmlError::UnexpectedEof(p.pos))?;
            let raw_end = start + lt_offset;
            let raw = &p.input[start..raw_end];
            let decoded = decode_entities(raw);
            if decoded.len() > limits::MAX_CONTENT_SIZE {
                return Err(XmlError::CapacityExceeded(
                    "text fragment",
                    limits::MAX_CONTENT_SIZE,
                ));
            }
            p.pos = raw_end;

            let is_closing = p.rest()[1..].starts_with('/');
            if is_closing {
                p.pos += 2;
                let name_start = p.pos;
                let name = p.parse_name()?;
                p.skip_ws();
                if !p.eat(">") {
                    return Err(XmlError::UnexpectedEof(p.pos));
                }
                if p.nodes[top].tag.as_ref() != name.as_ref() {
                    return Err(XmlError::TagMismatch(
                        name_start,
                        name,
                        p.nodes[top].tag.clone(),
                    ));
                }
                p.nodes[top].text.push(decoded.into_boxed_str());
                stack.pop();
                if stack.is_empty() {
                    break root_id;
                }
            } else {
                p.nodes[top].text.push(decoded.into_boxed_str());
                if p.nodes[top].children.len() >= limits::MAX_CHILDREN {
                    return Err(XmlError::CapacityExceeded("children", limits::MAX_CHILDREN));
                }
                p.pos += 1; // consume '<'
                let (child_id, child_self_closed) = p.open_tag(Some(top))?;
                p.nodes[top].children.push(child_id);
                if child_self_closed {
                    p.nodes[child_id].text.push("".into());
                } else {
                    stack.push(child_id);
                }
            }
        }
    };

    Ok(XmlDocument {
        meta: p.meta,
        nodes: p.nodes,
        root,
    })
}
