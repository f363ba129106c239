//! Lowers a [`Dfa`] to a DOT-family directed-graph description, with
//! transition edge coalescing and an invisible reset node marking the
//! initial state. Grounded on `examples/original_source/src/dot.c`
//! (`toDot_dfa`, `toLabel_dot`, `getEdge_dot`/`insertEdge_dot`,
//! `toStream_dot`) — no Rust file in the corpus emits textual Graphviz, so
//! the algorithm is taken from the C original and expressed in this
//! crate's idiom.

use crate::dfa::Dfa;
use std::fmt::Write as _;

const RESET_NODE_NAME: &str = "__reset__";

#[derive(Debug, Clone)]
struct GraphNode {
    name: String,
    label: String,
    shape: &'static str,
    style: Option<&'static str>,
    peripheries: u8,
}

#[derive(Debug, Clone)]
struct GraphEdge {
    from: usize,
    to: usize,
    label: String,
}

/// An optional grouping of nodes, carried over from the original's
/// `SubGraph` model. The DFA emitter never populates one — a `Dfa` has no
/// notion of clusters — but it's kept as public API since nothing in this
/// spec excludes it and a caller building a [`Graph`] by hand may want it.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub label: String,
    pub members: Vec<usize>,
}

/// An in-memory graph, ready to be rendered with [`Graph::to_dot`].
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    clusters: Vec<Cluster>,
}

impl Graph {
    fn node_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name == name)
    }

    fn edge_between(&mut self, from: usize, to: usize) -> Option<&mut GraphEdge> {
        self.edges.iter_mut().find(|e| e.from == from && e.to == to)
    }

    fn insert_edge(&mut self, from: usize, to: usize, symbol: char) {
        if let Some(edge) = self.edge_between(from, to) {
            edge.label.push(',');
            edge.label.push(symbol);
        } else {
            self.edges.push(GraphEdge {
                from,
                to,
                label: symbol.to_string(),
            });
        }
    }

    /// Declares a cluster grouping the named nodes. See [`Cluster`].
    pub fn push_cluster(&mut self, label: impl Into<String>, members: Vec<usize>) {
        self.clusters.push(Cluster {
            label: label.into(),
            members,
        });
    }

    /// Renders the graph as DOT (Graphviz) source text.
    pub fn to_dot(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "digraph \"{}\" {{", escape_label(&self.name));

        for cluster in &self.clusters {
            let _ = writeln!(out, "  subgraph cluster_{} {{", escape_label(&cluster.label));
            let _ = writeln!(out, "    label=\"{}\";", escape_label(&cluster.label));
            for &member in &cluster.members {
                let _ = writeln!(out, "    \"{}\";", self.nodes[member].name);
            }
            out.push_str("  }\n");
        }

        for node in &self.nodes {
            let _ = write!(
                out,
                "  \"{}\" [label=\"{}\", shape={}, peripheries={}",
                node.name,
                escape_label(&node.label),
                node.shape,
                node.peripheries
            );
            if let Some(style) = node.style {
                let _ = write!(out, ", style={}", style);
            }
            out.push_str("];\n");
        }

        for edge in &self.edges {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\" [label=\"{}\"];",
                self.nodes[edge.from].name,
                self.nodes[edge.to].name,
                escape_label(&edge.label)
            );
        }

        out.push_str("}\n");
        out
    }
}

/// Backslashes doubled, the output's quote character backslash-escaped,
/// newlines converted to DOT's left-align marker, tabs stripped.
fn escape_label(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\l"),
            '\t' => {}
            other => out.push(other),
        }
    }
    out
}

/// Builds a [`Graph`] from a DFA: one node per state in id order, a
/// reset node with an edge into the initial state, and one coalesced edge
/// per (source, sink) pair in alphabet order.
pub fn build_graph(dfa: &Dfa) -> Graph {
    let mut graph = Graph {
        name: dfa.name().to_string(),
        nodes: Vec::with_capacity(dfa.states().len() + 1),
        edges: Vec::new(),
        clusters: Vec::new(),
    };

    for state in dfa.states() {
        graph.nodes.push(GraphNode {
            name: state.name().to_string(),
            label: String::new(),
            shape: "circle",
            style: None,
            peripheries: if state.is_accepting() { 2 } else { 1 },
        });
    }

    let reset_index = graph.nodes.len();
    graph.nodes.push(GraphNode {
        name: RESET_NODE_NAME.to_string(),
        label: String::new(),
        shape: "point",
        style: Some("invis"),
        peripheries: 1,
    });
    graph.edges.push(GraphEdge {
        from: reset_index,
        to: dfa.initial_state(),
        label: String::new(),
    });

    for (source, _) in dfa.states().iter().enumerate() {
        for &symbol in dfa.alphabet() {
            if let Some(sink) = dfa.transition(source, symbol) {
                graph.insert_edge(source, sink, symbol as char);
            }
        }
    }

    graph
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

    const SIMPLE: &str = r#"
        <dfa alphabet="ab">
          <states><accept><q1/></accept><reject><q0/></reject></states>
          <initialState><q0/></initialState>
          <transitions><q0><q1>a</q1></q0><q1><q1>a</q1></q1></transitions>
        </dfa>
    "#;

    #[test]
    fn reset_node_points_to_initial_state() {
        let dfa = build(SIMPLE);
        let graph = build_graph(&dfa);
        let reset = graph.node_index(RESET_NODE_NAME).unwrap();
        let initial_name = dfa.states()[dfa.initial_state()].name();
        let to = graph.node_index(initial_name).unwrap();
        assert!(graph.edges.iter().any(|e| e.from == reset && e.to == to));
    }

    #[test]
    fn accept_state_has_two_peripheries() {
        let dfa = build(SIMPLE);
        let graph = build_graph(&dfa);
        let q1 = graph.node_index("q1").unwrap();
        assert_eq!(graph.nodes[q1].peripheries, 2);
        let q0 = graph.node_index("q0").unwrap();
        assert_eq!(graph.nodes[q0].peripheries, 1);
    }

    #[test]
    fn coalesces_parallel_edges_in_alphabet_order() {
        let input = r#"
            <dfa alphabet="ab">
              <states><accept><q1/></accept><reject><q0/></reject></states>
              <initialState><q0/></initialState>
              <transitions><q0><q1>a</q1><q1>b</q1></q0></transitions>
            </dfa>
        "#;
        let dfa = build(input);
        let graph = build_graph(&dfa);
        let q0 = graph.node_index("q0").unwrap();
        let q1 = graph.node_index("q1").unwrap();
        let edge = graph.edges.iter().find(|e| e.from == q0 && e.to == q1).unwrap();
        assert_eq!(edge.label, "a,b");
    }

    #[test]
    fn escapes_backslash_and_quote() {
        assert_eq!(escape_label("a\\b\"c"), "a\\\\b\\\"c");
    }

    #[test]
    fn newline_becomes_left_align_marker() {
        assert_eq!(escape_label("a\nb"), "a\\lb");
    }
}
