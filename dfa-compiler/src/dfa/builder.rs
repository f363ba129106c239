//! Validates a parsed document and constructs a [`Dfa`], resolving state
//! names through a builder-scoped [`NameTable`]. Mirrors
//! `examples/original_source/src/dfa.c`'s `fromXml_dfa` step for step.

use super::{Dfa, State};
use crate::error::DfaBuildError;
use crate::nametable::NameTable;
use crate::xml::{NodeId, XmlDocument, XmlNode};
use std::rc::Rc;

const DEFAULT_NAME: &str = "dfa";

/// Builds a [`Dfa`] from a parsed document. The document tree is consumed
/// only by reference and may be discarded by the caller afterward.
pub fn build(doc: &XmlDocument) -> Result<Dfa, DfaBuildError> {
    let root = doc.root();
    if root.tag.as_ref() != "dfa" {
        return Err(DfaBuildError::WrongRootTag(root.tag.clone()));
    }

    let name: Box<str> = root.attr("name").unwrap_or(DEFAULT_NAME).into();

    let mut predeclared = false;
    let mut alphabet: Vec<u8> = Vec::new();
    if let Some(attr) = root.attr("alphabet") {
        predeclared = true;
        for byte in attr.bytes() {
            if alphabet.contains(&byte) {
                return Err(DfaBuildError::DuplicateAlphabetSymbol(byte));
            }
            alphabet.push(byte);
        }
    }

    let (states_id, initial_id, transitions_id) = find_required_children(doc, root)?;

    let (states, table) = build_states(doc, states_id)?;

    let initial_state = build_initial_state(doc, initial_id, &table)?;

    let transitions = build_transitions(
        doc,
        transitions_id,
        &table,
        states.len(),
        predeclared,
        &mut alphabet,
    )?;

    Ok(Dfa {
        name,
        alphabet,
        states,
        initial_state,
        transitions,
    })
}

fn find_required_children(
    doc: &XmlDocument,
    root: &XmlNode,
) -> Result<(NodeId, NodeId, NodeId), DfaBuildError> {
    let mut states_id = None;
    let mut initial_id = None;
    let mut transitions_id = None;

    for &child_id in &root.children {
        let child = doc.node(child_id);
        match child.tag.as_ref() {
            "states" if states_id.is_none() => states_id = Some(child_id),
            "initialState" if initial_id.is_none() => initial_id = Some(child_id),
            "transitions" if transitions_id.is_none() => transitions_id = Some(child_id),
            other => {
                tracing::warn!(tag = other, "unrecognized or duplicate child of <dfa>, skipping");
            }
        }
    }

    let found = [states_id, initial_id, transitions_id]
        .iter()
        .filter(|o| o.is_some())
        .count();
    if found != 3 {
        return Err(DfaBuildError::WrongChildCount(found));
    }

    Ok((states_id.unwrap(), initial_id.unwrap(), transitions_id.unwrap()))
}

fn build_states(
    doc: &XmlDocument,
    states_id: NodeId,
) -> Result<(Vec<State>, NameTable), DfaBuildError> {
    let mut table = NameTable::new();
    let mut states = Vec::new();
    let mut seen_accept = false;
    let mut seen_reject = false;

    for &group_id in &doc.node(states_id).children {
        let group = doc.node(group_id);
        let accepting = match group.tag.as_ref() {
            "accept" if !seen_accept => {
                seen_accept = true;
                true
            }
            "reject" if !seen_reject => {
                seen_reject = true;
                false
            }
            other => {
                tracing::warn!(tag = other, "unrecognized or duplicate state grouping, skipping");
                continue;
            }
        };

        for &state_id in &group.children {
            let node = doc.node(state_id);
            if table.contains(&node.tag) {
                return Err(DfaBuildError::DuplicateStateName(node.tag.clone()));
            }
            let id = states.len();
            table.insert(&node.tag, id)?;
            states.push(State {
                name: Rc::from(node.tag.as_ref()),
                accepting,
            });
        }
    }

    Ok((states, table))
}

fn build_initial_state(
    doc: &XmlDocument,
    initial_id: NodeId,
    table: &NameTable,
) -> Result<usize, DfaBuildError> {
    let node = doc.node(initial_id);
    if node.children.len() != 1 {
        return Err(DfaBuildError::WrongInitialStateCount(node.children.len()));
    }
    let name = &doc.node(node.children[0]).tag;
    table
        .get(name)
        .ok_or_else(|| DfaBuildError::UnknownInitialState(name.clone()))
}

fn build_transitions(
    doc: &XmlDocument,
    transitions_id: NodeId,
    table: &NameTable,
    state_count: usize,
    predeclared: bool,
    alphabet: &mut Vec<u8>,
) -> Result<Vec<[Option<usize>; 256]>, DfaBuildError> {
    let mut transitions = vec![[None; 256]; state_count];

    for &source_id in &doc.node(transitions_id).children {
        let source_node = doc.node(source_id);
        let source = table
            .get(&source_node.tag)
            .ok_or_else(|| DfaBuildError::UnknownStateReference(source_node.tag.clone()))?;

        for &sink_id in &source_node.children {
            let sink_node = doc.node(sink_id);
            let sink = table
                .get(&sink_node.tag)
                .ok_or_else(|| DfaBuildError::UnknownStateReference(sink_node.tag.clone()))?;

            let symbols = sink_node.text.first().map(|s| s.as_ref()).unwrap_or("");
            for byte in symbols.bytes() {
                if predeclared {
                    if !alphabet.contains(&byte) {
                        return Err(DfaBuildError::SymbolNotInAlphabet(byte as char, byte));
                    }
                } else if !alphabet.contains(&byte) {
                    alphabet.push(byte);
                }

                if let Some(previous) = transitions[source][byte as usize] {
                    if previous != sink {
                        tracing::warn!(
                            source = %source_node.tag,
                            symbol = byte as char,
                            "duplicate transition, last one wins"
                        );
                    }
                }
                transitions[source][byte as usize] = Some(sink);
            }
        }
    }

    Ok(transitions)
}
