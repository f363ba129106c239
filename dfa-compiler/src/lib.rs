//! # DFA compiler
//!
//! Compiles an XML-like description of a deterministic finite automaton
//! into either a goto-based matcher function or a DOT-family graph
//! description.
//!
//! ## Pipeline
//! ```text
//! xml::parse  ->  dfa::builder::build  ->  backend::code::emit
//!                                      \->  backend::dot::build_graph
//! ```
//!
//! [`xml::parse`] turns a raw document into an [`xml::XmlDocument`] tree.
//! [`dfa::builder::build`] validates that tree and resolves state-name
//! references through a [`nametable::NameTable`], producing a [`dfa::Dfa`].
//! The two backends in [`backend`] then lower that `Dfa` to text; neither
//! backend mutates it or needs the original document again.
//!
//! ## Example
//! ```
//! use dfa_compiler::{backend, dfa, xml};
//!
//! let input = r#"
//!     <dfa name="anyA" alphabet="a">
//!       <states><accept><q1/></accept><reject><q0/></reject></states>
//!       <initialState><q0/></initialState>
//!       <transitions>
//!         <q0><q1>a</q1></q0>
//!         <q1><q1>a</q1></q1>
//!       </transitions>
//!     </dfa>
//! "#;
//! let doc = xml::parse(input).unwrap();
//! let automaton = dfa::builder::build(&doc).unwrap();
//! let code = backend::code::emit(&automaton);
//! assert!(code.contains("int anyA(const char* str)"));
//! ```
//!
//! ## Errors
//! Every stage reports failures through the `thiserror` enums in
//! [`error`] rather than aborting the process; the front-end is the only
//! place that turns a fatal `Err` into a process exit code.

pub mod backend;
pub mod dfa;
pub mod error;
pub mod logging;
pub mod nametable;
pub mod xml;

#[cfg(test)]
mod tests;
