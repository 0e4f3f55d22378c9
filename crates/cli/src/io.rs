//! JSON files read and written by the CLI.
//!
//! Graph file: `{"edges": [["a", "b"], ...], "nodes": ["c"]?, "pos": {"a": [x, y], ...}?}`.
//! `nodes` only matters for nodes without edges. Names of the form `bend:<n>`
//! are reserved for bend points in the output and rejected on input.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tsm::{Graph, Node, OrthoLayout, Point};

#[derive(Debug, Deserialize)]
pub struct GraphFile {
    pub edges: Vec<(String, String)>,
    #[serde(default)]
    pub nodes: Vec<String>,
    #[serde(default)]
    pub pos: Option<BTreeMap<String, [f64; 2]>>,
}

/// `bend:` followed by one or more digits.
fn is_reserved(name: &str) -> bool {
    name.strip_prefix("bend:")
        .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
}

impl GraphFile {
    /// Reject node names that would collide with bend nodes in the output.
    pub fn check_names(&self) -> Result<()> {
        let named = self
            .edges
            .iter()
            .flat_map(|(a, b)| [a, b])
            .chain(&self.nodes)
            .chain(self.pos.iter().flat_map(|p| p.keys()));
        for name in named {
            if is_reserved(name) {
                bail!("invalid node name {name:?}: reserved for bend points");
            }
        }
        Ok(())
    }

    pub fn graph(&self) -> Graph<String> {
        let mut g = Graph::new();
        for n in &self.nodes {
            g.add_node(n.clone());
        }
        for (a, b) in &self.edges {
            g.add_edge(a.clone(), b.clone());
        }
        g
    }

    pub fn positions(&self) -> Option<HashMap<String, Point>> {
        self.pos.as_ref().map(|pos| {
            pos.iter()
                .map(|(n, &[x, y])| (n.clone(), Point::new(x, y)))
                .collect()
        })
    }
}

/// Layout output. Bend nodes are named `bend:N`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct LayoutFile {
    pub nodes: Vec<String>,
    pub edges: Vec<(String, String)>,
    pub pos: BTreeMap<String, [i64; 2]>,
    pub bends: usize,
}

fn node_name(n: &Node<String>) -> String {
    match n {
        Node::Input(s) => s.clone(),
        Node::Bend(i) => format!("bend:{i}"),
    }
}

impl From<&OrthoLayout<String>> for LayoutFile {
    fn from(l: &OrthoLayout<String>) -> Self {
        let mut nodes: Vec<String> = l.graph.nodes().map(node_name).collect();
        nodes.sort();
        let mut edges: Vec<(String, String)> = l
            .graph
            .edges()
            .map(|(a, b)| (node_name(a), node_name(b)))
            .collect();
        edges.sort();
        let pos = l.pos.iter().map(|(n, p)| (node_name(n), [p.x, p.y])).collect();
        Self {
            nodes,
            edges,
            pos,
            bends: l.bends,
        }
    }
}

pub fn read_graph(path: &Path) -> Result<GraphFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file: GraphFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing graph file {}", path.display()))?;
    file.check_names()
        .with_context(|| format!("checking node names in {}", path.display()))?;
    Ok(file)
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_edges_and_optional_positions() {
        let f: GraphFile = serde_json::from_str(r#"{"edges": [["a", "b"], ["b", "c"]]}"#).unwrap();
        assert_eq!(f.graph().node_count(), 3);
        assert!(f.positions().is_none());

        let f: GraphFile = serde_json::from_str(
            r#"{"edges": [["a", "b"]], "nodes": ["a"], "pos": {"a": [0, 0], "b": [2.5, 0]}}"#,
        )
        .unwrap();
        let pos = f.positions().unwrap();
        assert_eq!(pos["b"], Point::new(2.5, 0.0));
        assert_eq!(f.graph().edge_count(), 1);
    }

    #[test]
    fn layout_file_names_bends() {
        let g = Graph::from_edges([("a", "b"), ("b", "c"), ("c", "a")].map(|(a, b)| (a.to_string(), b.to_string())));
        let l = tsm::layout_with_defaults(&g, None).unwrap();
        let file = LayoutFile::from(&l);
        assert_eq!(file.bends, 1);
        assert_eq!(file.nodes.len(), 4);
        assert!(file.pos.contains_key("bend:0"));
        assert_eq!(file.edges.len(), 4);
    }

    #[test]
    fn write_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.json");
        let file = LayoutFile {
            nodes: vec!["a".into()],
            edges: vec![],
            pos: BTreeMap::from([("a".to_string(), [0, 0])]),
            bends: 0,
        };
        write_json(&path, &file).unwrap();
        let back: LayoutFile = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn bend_names_are_reserved() {
        assert!(is_reserved("bend:0"));
        assert!(is_reserved("bend:17"));
        assert!(!is_reserved("bend:"));
        assert!(!is_reserved("bend:x"));
        assert!(!is_reserved("bend"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tri.json");
        std::fs::write(&path, r#"{"edges": [["a", "b"], ["b", "bend:0"], ["bend:0", "a"]]}"#).unwrap();
        let err = read_graph(&path).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("tri.json"));
        assert!(msg.contains("reserved for bend points"));

        let f: GraphFile =
            serde_json::from_str(r#"{"edges": [["a", "b"]], "pos": {"a": [0, 0], "bend:3": [1, 0]}}"#).unwrap();
        assert!(f.check_names().is_err());
        let f: GraphFile = serde_json::from_str(r#"{"edges": [["a", "bend:x"]]}"#).unwrap();
        f.check_names().unwrap();
    }

    #[test]
    fn unreadable_input_names_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = read_graph(&path).unwrap_err();
        assert!(format!("{err:#}").contains("missing.json"));
    }
}
