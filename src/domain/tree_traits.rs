use termtree::Tree;
use tracing::instrument;

use crate::domain::tree::{RecordNode, RecordTree};

/// Conversion into a printable `termtree` rendering.
pub trait TreeDisplay {
    fn to_tree_string(&self) -> Tree<String>;
}

fn label(node: &RecordNode) -> String {
    format!("#{} {}", node.id(), node.record().name)
}

impl TreeDisplay for RecordNode {
    fn to_tree_string(&self) -> Tree<String> {
        // Children carry an L/R tag
        let leaves = [("L", self.left()), ("R", self.right())]
            .into_iter()
            .filter_map(|(side, child)| {
                child.map(|c| {
                    let mut subtree = c.to_tree_string();
                    subtree.root = format!("{side} {}", subtree.root);
                    subtree
                })
            });

        Tree::new(label(self)).with_leaves(leaves)
    }
}

impl TreeDisplay for RecordTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        match self.root() {
            Some(root) => root.to_tree_string(),
            None => Tree::new("(empty)".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::{Category, Record, RecordRef};

    #[test]
    fn given_tree_when_rendering_then_children_tagged_by_side() {
        let tree: RecordTree = [(2, "Ivysaur"), (1, "Bulbasaur"), (3, "Venusaur")]
            .into_iter()
            .map(|(id, name)| RecordRef::from(Record::new(id, name, Category::Grass, 1, 1, false)))
            .collect();

        let rendered = tree.to_tree_string().to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines[0], "#2 Ivysaur");
        assert!(lines[1].ends_with("L #1 Bulbasaur"));
        assert!(lines[2].ends_with("R #3 Venusaur"));
    }

    #[test]
    fn given_empty_tree_when_rendering_then_placeholder() {
        assert_eq!(RecordTree::new().to_tree_string().to_string().trim(), "(empty)");
    }
}
