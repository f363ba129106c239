//! Error types for each stage of the compilation pipeline.
//!
//! Every fatal condition in the pipeline is represented as a `thiserror`
//! variant rather than a process abort, but the fail-fast discipline is the
//! same: the first invariant violation stops the compilation and is
//! propagated with `?` all the way out to the front-end.

use thiserror::Error;

/// Failures while scanning the XML-like input buffer into a [`crate::xml::XmlDocument`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    #[error("byte {0}: unexpected end of input")]
    UnexpectedEof(usize),
    #[error("byte {0}: expected a name")]
    ExpectedName(usize),
    #[error("byte {0}: expected '=' after attribute name '{1}'")]
    ExpectedEquals(usize, Box<str>),
    #[error("byte {0}: expected an opening quote for attribute '{1}'")]
    ExpectedQuote(usize, Box<str>),
    #[error("byte {0}: duplicate attribute '{1}' on <{2}>")]
    DuplicateAttribute(usize, Box<str>, Box<str>),
    #[error("byte {0}: closing tag '{1}' does not match opening tag '{2}'")]
    TagMismatch(usize, Box<str>, Box<str>),
    #[error("byte {0}: document has no root element")]
    MissingRoot(usize),
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
    #[error("exceeded capacity limit for {0} (limit {1})")]
    CapacityExceeded(&'static str, usize),
}

/// Failures inserting into the bounded name table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameTableError {
    #[error("name '{0}' exceeds the maximum key length of {1}")]
    KeyTooLong(Box<str>, usize),
    #[error("bucket for '{0}' is full (bucket capacity {1})")]
    BucketFull(Box<str>, usize),
    #[error("name table key budget of {0} entries exhausted")]
    KeyBudgetExhausted(usize),
}

/// Failures validating a parsed document and constructing a [`crate::dfa::Dfa`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DfaBuildError {
    #[error("root element must be <dfa>, found <{0}>")]
    WrongRootTag(Box<str>),
    #[error("<dfa> must have exactly 3 children (states, initialState, transitions), found {0}")]
    WrongChildCount(usize),
    #[error("state name '{0}' is declared more than once")]
    DuplicateStateName(Box<str>),
    #[error(transparent)]
    NameTable(#[from] NameTableError),
    #[error("<initialState> must have exactly one child, found {0}")]
    WrongInitialStateCount(usize),
    #[error("initial state references unknown state '{0}'")]
    UnknownInitialState(Box<str>),
    #[error("transition references unknown state '{0}'")]
    UnknownStateReference(Box<str>),
    #[error("symbol '{0}' (0x{1:02x}) is not a member of the predeclared alphabet")]
    SymbolNotInAlphabet(char, u8),
    #[error("predeclared alphabet contains duplicate byte 0x{0:02x}")]
    DuplicateAlphabetSymbol(u8),
}
