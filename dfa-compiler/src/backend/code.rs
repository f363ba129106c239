//! Lowers a [`Dfa`] to a goto/label-based matcher function, one label per
//! state and one branch per alphabet symbol. Grounded on
//! `examples/original_source/src/dfa.c`'s `toC_dfa` template.

use crate::dfa::Dfa;
use std::fmt::Write as _;

/// Emits the matcher function's source text. States are emitted in id
/// order; within a state, branches follow the DFA's recorded alphabet
/// order. End-of-string dispatch precedes symbol dispatch, and a trailing
/// `else { return 0; }` rejects any byte the state has no transition for.
pub fn emit(dfa: &Dfa) -> String {
    let mut out = String::new();
    let initial_name = dfa.states()[dfa.initial_state()].name();

    let _ = writeln!(out, "int {}(const char* str) {{", dfa.name());
    let _ = writeln!(out, "    char c;");
    let _ = writeln!(out, "    if (!str) return 0;");
    let _ = writeln!(out, "    goto {};", initial_name);

    for (id, state) in dfa.states().iter().enumerate() {
        let _ = writeln!(out, "  {}: c = *str++;", state.name());
        let _ = writeln!(
            out,
            "    if (c == '\\0') {{ return {}; }}",
            state.is_accepting() as u8
        );
        for &symbol in dfa.alphabet() {
            if let Some(target) = dfa.transition(id, symbol) {
                let _ = writeln!(
                    out,
                    "    else if (c == '{}') {{ goto {}; }}",
                    escape_char_literal(symbol),
                    dfa.states()[target].name()
                );
            }
        }
        let _ = writeln!(out, "    else {{ return 0; }}");
    }

    out.push_str("}\n");
    out
}

fn escape_char_literal(byte: u8) -> String {
    match byte {
        b'\\' => "\\\\".to_string(),
        b'\'' => "\\'".to_string(),
        b'\n' => "\\n".to_string(),
        b'\r' => "\\r".to_string(),
        b'\t' => "\\t".to_string(),
        0x20..=0x7e => (byte as char).to_string(),
        other => format!("\\x{:02x}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::builder;
    use crate::xml;

    fn build(input: &str) -> Dfa {
        let doc = xml::parse(input).unwrap();
        builder::build(&doc).unwrap()
    }

    const SCENARIO_A: &str = r#"
        <dfa name="anyA" alphabet="a">
          <states><accept><q1/></accept><reject><q0/></reject></states>
          <initialState><q0/></initialState>
          <transitions>
            <q0><q1>a</q1></q0>
            <q1><q1>a</q1></q1>
          </transitions>
        </dfa>
    "#;

    #[test]
    fn emits_function_with_automaton_name() {
        let dfa = build(SCENARIO_A);
        let code = emit(&dfa);
        assert!(code.starts_with("int anyA(const char* str) {"));
        assert!(code.contains("goto q0;"));
    }

    #[test]
    fn end_of_string_precedes_symbol_dispatch() {
        let dfa = build(SCENARIO_A);
        let code = emit(&dfa);
        let q1_label = code.find("q1: c = *str++;").unwrap();
        let eos = code[q1_label..].find("if (c == '\\0')").unwrap();
        let sym = code[q1_label..].find("else if (c == 'a')").unwrap();
        assert!(eos < sym);
    }

    #[test]
    fn accepting_state_returns_one_at_end_of_string() {
        let dfa = build(SCENARIO_A);
        let code = emit(&dfa);
        let q1 = code.find("q1: c = *str++;").unwrap();
        assert!(code[q1..].starts_with("q1: c = *str++;\n    if (c == '\\0') { return 1; }"));
    }

    #[test]
    fn unlisted_byte_falls_through_to_reject() {
        let dfa = build(SCENARIO_A);
        let code = emit(&dfa);
        assert!(code.contains("else { return 0; }"));
    }
}
