//! Crate-wide property tests, in the style of the corpus's `tests.rs`
//! modules: random well-formed inputs generated with `proptest`, checked
//! against the invariants the whole pipeline is expected to uphold.

use crate::{backend, dfa::builder, xml};
use proptest::prelude::*;

/// A small, always-well-formed DFA description used to drive the
/// generators below. `transitions` is `(source_idx, sink_idx, symbol)`;
/// by construction at most one entry exists per `(source_idx, symbol)`,
/// so there is nothing for "last one wins" to resolve here.
#[derive(Debug, Clone)]
struct Spec {
    names: Vec<String>,
    alphabet: Vec<u8>,
    accepting: Vec<bool>,
    initial: usize,
    transitions: Vec<(usize, usize, u8)>,
}

fn to_xml(spec: &Spec) -> String {
    let alphabet: String = spec.alphabet.iter().map(|&b| b as char).collect();
    let mut accept = String::new();
    let mut reject = String::new();
    for (i, name) in spec.names.iter().enumerate() {
        if spec.accepting[i] {
            accept.push_str(&format!("<{name}/>"));
        } else {
            reject.push_str(&format!("<{name}/>"));
        }
    }

    let mut by_source: Vec<Vec<(usize, u8)>> = vec![Vec::new(); spec.names.len()];
    for &(src, sink, sym) in &spec.transitions {
        by_source[src].push((sink, sym));
    }
    let mut transitions_xml = String::new();
    for (src, edges) in by_source.iter().enumerate() {
        if edges.is_empty() {
            continue;
        }
        transitions_xml.push_str(&format!("<{}>", spec.names[src]));
        for &(sink, sym) in edges {
            transitions_xml.push_str(&format!(
                "<{}>{}</{}>",
                spec.names[sink],
                xml::encode_entities(&(sym as char).to_string()),
                spec.names[sink]
            ));
        }
        transitions_xml.push_str(&format!("</{}>", spec.names[src]));
    }

    format!(
        "<dfa name=\"t\" alphabet=\"{alphabet}\"><states><accept>{accept}</accept><reject>{reject}</reject></states><initialState><{init}/></initialState><transitions>{transitions_xml}</transitions></dfa>",
        init = spec.names[spec.initial],
    )
}

fn names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z][a-z0-9]{0,3}", 2..=4)
        .prop_filter("unique names", |v| {
            let mut sorted = v.clone();
            sorted.sort();
            sorted.dedup();
            sorted.len() == v.len()
        })
}

fn alphabet_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(prop::char::range('a', 'd'), 1..=3).prop_map(|chars| {
        let mut seen = Vec::new();
        for c in chars {
            let b = c as u8;
            if !seen.contains(&b) {
                seen.push(b);
            }
        }
        if seen.is_empty() {
            seen.push(b'a');
        }
        seen
    })
}

fn spec_strategy() -> impl Strategy<Value = Spec> {
    (names_strategy(), alphabet_strategy()).prop_flat_map(|(names, alphabet)| {
        let n = names.len();
        let a = alphabet.len();
        let accepting = prop::collection::vec(any::<bool>(), n..=n);
        let initial = 0..n;
        // for each (source, symbol) pair, optionally pick a sink
        let maybe_targets = prop::collection::vec(prop::option::of(0..n), n * a..=n * a);
        (accepting, initial, maybe_targets).prop_map(move |(accepting, initial, maybe_targets)| {
            let mut transitions = Vec::new();
            for src in 0..n {
                for (sym_idx, &symbol) in alphabet.iter().enumerate() {
                    if let Some(sink) = maybe_targets[src * a + sym_idx] {
                        transitions.push((src, sink, symbol));
                    }
                }
            }
            Spec {
                names: names.clone(),
                alphabet: alphabet.clone(),
                accepting,
                initial,
                transitions,
            }
        })
    })
}

proptest! {
    #[test]
    fn state_names_round_trip_into_both_backends(spec in spec_strategy()) {
        let input = to_xml(&spec);
        let doc = xml::parse(&input).unwrap();
        let dfa = builder::build(&doc).unwrap();

        let code = backend::code::emit(&dfa);
        let graph = backend::dot::build_graph(&dfa).to_dot();

        for name in &spec.names {
            prop_assert!(code.contains(&format!("{name}: c = *str++;")));
            prop_assert!(graph.contains(&format!("\"{name}\"")));
        }
    }

    #[test]
    fn alphabet_order_matches_predeclared_attribute(spec in spec_strategy()) {
        let input = to_xml(&spec);
        let doc = xml::parse(&input).unwrap();
        let dfa = builder::build(&doc).unwrap();
        prop_assert_eq!(dfa.alphabet(), spec.alphabet.as_slice());
    }

    #[test]
    fn accept_flag_preserved_in_both_backends(spec in spec_strategy()) {
        let input = to_xml(&spec);
        let doc = xml::parse(&input).unwrap();
        let dfa = builder::build(&doc).unwrap();
        let code = backend::code::emit(&dfa);
        let graph = backend::dot::build_graph(&dfa).to_dot();

        for (i, name) in spec.names.iter().enumerate() {
            let state_block = code.split(&format!("{name}: c = *str++;")).nth(1).unwrap();
            let eos_line = state_block.lines().next().unwrap();
            if spec.accepting[i] {
                prop_assert!(eos_line.contains("return 1"));
                prop_assert!(graph.contains(&format!(
                    "\"{name}\" [label=\"\", shape=circle, peripheries=2]"
                )));
            } else {
                prop_assert!(eos_line.contains("return 0"));
                prop_assert!(graph.contains(&format!(
                    "\"{name}\" [label=\"\", shape=circle, peripheries=1]"
                )));
            }
        }
    }

    #[test]
    fn determinism_same_input_twice(spec in spec_strategy()) {
        let input = to_xml(&spec);
        let doc1 = xml::parse(&input).unwrap();
        let dfa1 = builder::build(&doc1).unwrap();
        let doc2 = xml::parse(&input).unwrap();
        let dfa2 = builder::build(&doc2).unwrap();

        prop_assert_eq!(backend::code::emit(&dfa1), backend::code::emit(&dfa2));
        prop_assert_eq!(
            backend::dot::build_graph(&dfa1).to_dot(),
            backend::dot::build_graph(&dfa2).to_dot()
        );
    }

    #[test]
    fn entity_round_trip(s in "[a-zA-Z0-9 ]{0,10}") {
        let with_specials = format!("{s}<>&\"'");
        let encoded = xml::encode_entities(&with_specials);
        let decoded = xml::decode_entities(&encoded);
        prop_assert_eq!(decoded, with_specials);
    }
}

#[test]
fn edge_coalescing_preserves_alphabet_order() {
    let input = r#"
        <dfa alphabet="abc">
          <states><accept><q1/></accept><reject><q0/></reject></states>
          <initialState><q0/></initialState>
          <transitions><q0><q1>a</q1><q1>c</q1><q1>b</q1></q0></transitions>
        </dfa>
    "#;
    let doc = xml::parse(input).unwrap();
    let dfa = builder::build(&doc).unwrap();
    let graph = backend::dot::build_graph(&dfa).to_dot();
    assert!(graph.contains("\"q0\" -> \"q1\" [label=\"a,b,c\"];"));
}
