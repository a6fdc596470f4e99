//! Visitor-based traversals over a [`RecordTree`].
//!
//! Each call walks the tree from scratch; nothing is cached between calls.

use std::collections::VecDeque;
use std::fmt;

use itertools::Itertools;
use tracing::instrument;

use crate::domain::record::Record;
use crate::domain::tree::{RecordNode, RecordTree};

/// Order in which a traversal visits the records of a tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    /// Level by level from the root, left before right within a level
    LevelOrder,
    PreOrder,
    /// Ascending id
    InOrder,
    PostOrder,
    /// Ascending name, ties kept in pre-order
    Alphabetical,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 5] = [
        TraversalOrder::LevelOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::InOrder,
        TraversalOrder::PostOrder,
        TraversalOrder::Alphabetical,
    ];
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TraversalOrder::LevelOrder => "BFS (Level-Order)",
            TraversalOrder::PreOrder => "Pre-Order",
            TraversalOrder::InOrder => "In-Order",
            TraversalOrder::PostOrder => "Post-Order",
            TraversalOrder::Alphabetical => "Alphabetical (by name)",
        };
        f.write_str(label)
    }
}

impl RecordTree {
    /// Visit every record in the given order.
    #[instrument(level = "trace", skip(self, visit))]
    pub fn traverse<'a>(&'a self, order: TraversalOrder, visit: impl FnMut(&'a Record)) {
        match order {
            TraversalOrder::LevelOrder => self.level_order(visit),
            TraversalOrder::PreOrder => self.pre_order(visit),
            TraversalOrder::InOrder => self.in_order(visit),
            TraversalOrder::PostOrder => self.post_order(visit),
            TraversalOrder::Alphabetical => self.alphabetical(visit),
        }
    }

    /// Collect the visited sequence.
    pub fn records(&self, order: TraversalOrder) -> Vec<&Record> {
        let mut records = Vec::with_capacity(self.len());
        self.traverse(order, |record| records.push(record));
        records
    }

    /// Ids in the given order.
    pub fn ids(&self, order: TraversalOrder) -> Vec<u32> {
        self.records(order).iter().map(|r| r.id).collect()
    }

    pub fn level_order<'a>(&'a self, mut visit: impl FnMut(&'a Record)) {
        let mut queue: VecDeque<&'a RecordNode> = VecDeque::new();
        queue.extend(self.root());

        while let Some(node) = queue.pop_front() {
            visit(node.record());
            queue.extend(node.left());
            queue.extend(node.right());
        }
    }

    pub fn pre_order<'a>(&'a self, mut visit: impl FnMut(&'a Record)) {
        fn walk<'a>(node: Option<&'a RecordNode>, visit: &mut impl FnMut(&'a Record)) {
            if let Some(node) = node {
                visit(node.record());
                walk(node.left(), visit);
                walk(node.right(), visit);
            }
        }
        walk(self.root(), &mut visit);
    }

    pub fn in_order<'a>(&'a self, mut visit: impl FnMut(&'a Record)) {
        fn walk<'a>(node: Option<&'a RecordNode>, visit: &mut impl FnMut(&'a Record)) {
            if let Some(node) = node {
                walk(node.left(), visit);
                visit(node.record());
                walk(node.right(), visit);
            }
        }
        walk(self.root(), &mut visit);
    }

    pub fn post_order<'a>(&'a self, mut visit: impl FnMut(&'a Record)) {
        fn walk<'a>(node: Option<&'a RecordNode>, visit: &mut impl FnMut(&'a Record)) {
            if let Some(node) = node {
                walk(node.left(), visit);
                walk(node.right(), visit);
                visit(node.record());
            }
        }
        walk(self.root(), &mut visit);
    }

    /// Collect in pre-order, then stable-sort by name.
    pub fn alphabetical<'a>(&'a self, visit: impl FnMut(&'a Record)) {
        let mut collected = Vec::with_capacity(self.len());
        self.pre_order(|record| collected.push(record));
        collected
            .into_iter()
            .sorted_by(|a, b| a.name.cmp(&b.name))
            .for_each(visit);
    }
}
