//! Binary search tree of records keyed by id.
//!
//! Every node exclusively owns its children, so dropping the tree (or a removed
//! subtree) releases all of its nodes. Ids are unique per tree: for every node,
//! ids in the left subtree are smaller and ids in the right subtree are larger.

use std::cmp::Ordering;

use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::{Record, RecordRef};

type Link = Option<Box<RecordNode>>;

/// Tree node holding one record and both of its subtrees.
#[derive(Debug, Clone)]
pub struct RecordNode {
    record: RecordRef,
    left: Link,
    right: Link,
}

impl RecordNode {
    fn new(record: RecordRef) -> Self {
        Self {
            record,
            left: None,
            right: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.record.id
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    pub fn record_ref(&self) -> &RecordRef {
        &self.record
    }

    pub fn left(&self) -> Option<&RecordNode> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&RecordNode> {
        self.right.as_deref()
    }

    fn leftmost(&self) -> &RecordNode {
        let mut node = self;
        while let Some(left) = node.left() {
            node = left;
        }
        node
    }
}

/// Outcome of absorbing another tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Records copied into the target tree
    pub absorbed: usize,
    /// Records skipped because the target already held their id
    pub duplicates: usize,
}

/// Search tree of records owned by a single owner.
#[derive(Debug, Clone, Default)]
pub struct RecordTree {
    root: Link,
    len: usize,
}

impl RecordTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding a single record.
    pub fn with_record(record: impl Into<RecordRef>) -> Self {
        let mut tree = Self::new();
        tree.root = Some(Box::new(RecordNode::new(record.into())));
        tree.len = 1;
        tree
    }

    pub fn root(&self) -> Option<&RecordNode> {
        self.root.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Longest root-to-leaf path counted in nodes; an empty tree has height 0.
    #[instrument(level = "trace", skip(self))]
    pub fn height(&self) -> usize {
        fn height_of(node: Option<&RecordNode>) -> usize {
            match node {
                Some(node) => 1 + height_of(node.left()).max(height_of(node.right())),
                None => 0,
            }
        }
        height_of(self.root())
    }

    /// Find the node holding `id`.
    ///
    /// Descends by comparison, so the cost is bounded by the tree height.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, id: u32) -> DomainResult<&RecordNode> {
        let mut current = self.root();
        while let Some(node) = current {
            current = match id.cmp(&node.id()) {
                Ordering::Equal => return Ok(node),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        Err(DomainError::RecordNotFound(id))
    }

    pub fn contains(&self, id: u32) -> bool {
        self.search(id).is_ok()
    }

    /// Insert a record; an id already present leaves the tree untouched.
    #[instrument(level = "trace", skip(self, record), fields(id = record.id))]
    pub fn insert(&mut self, record: RecordRef) -> DomainResult<()> {
        fn insert_at(slot: &mut Link, record: RecordRef) -> DomainResult<()> {
            match slot {
                None => {
                    *slot = Some(Box::new(RecordNode::new(record)));
                    Ok(())
                }
                Some(node) => match record.id.cmp(&node.id()) {
                    Ordering::Less => insert_at(&mut node.left, record),
                    Ordering::Greater => insert_at(&mut node.right, record),
                    Ordering::Equal => Err(DomainError::DuplicateRecord(record.id)),
                },
            }
        }

        insert_at(&mut self.root, record)?;
        self.len += 1;
        Ok(())
    }

    /// Remove the record with `id` and hand it back.
    ///
    /// A node with two children takes over its in-order successor's record,
    /// and the successor is then removed from the right subtree.
    #[instrument(level = "trace", skip(self))]
    pub fn remove(&mut self, id: u32) -> DomainResult<RecordRef> {
        fn remove_at(slot: &mut Link, id: u32) -> Option<RecordRef> {
            let node = slot.as_mut()?;
            match id.cmp(&node.id()) {
                Ordering::Less => remove_at(&mut node.left, id),
                Ordering::Greater => remove_at(&mut node.right, id),
                Ordering::Equal => {
                    if node.left.is_some() && node.right.is_some() {
                        let successor_id = node.right.as_ref()?.leftmost().id();
                        trace!(id, successor_id, "two children: promoting successor");
                        let successor = remove_at(&mut node.right, successor_id)?;
                        return Some(std::mem::replace(&mut node.record, successor));
                    }
                    let mut removed = slot.take()?;
                    *slot = match removed.left.take() {
                        Some(left) => Some(left),
                        None => removed.right.take(),
                    };
                    Some(removed.record)
                }
            }
        }

        let removed = remove_at(&mut self.root, id).ok_or(DomainError::RecordNotFound(id))?;
        self.len -= 1;
        Ok(removed)
    }

    /// Copy every record of `other` into this tree, visiting `other` in pre-order.
    ///
    /// `other` is left as it was; the copies are owned by this tree.
    #[instrument(level = "debug", skip_all, fields(target = self.len, source = other.len))]
    pub fn merge(&mut self, other: &RecordTree) -> MergeReport {
        fn absorb(target: &mut RecordTree, node: Option<&RecordNode>, report: &mut MergeReport) {
            let Some(node) = node else { return };
            match target.insert(node.record_ref().to_owned_copy()) {
                Ok(()) => report.absorbed += 1,
                Err(_) => report.duplicates += 1,
            }
            absorb(target, node.left(), report);
            absorb(target, node.right(), report);
        }

        let mut report = MergeReport::default();
        absorb(self, other.root(), &mut report);
        debug!(?report, "merged trees");
        report
    }

    /// Drop every node.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }
}

impl FromIterator<RecordRef> for RecordTree {
    /// Builds a tree by inserting in iteration order; repeated ids are skipped.
    fn from_iter<I: IntoIterator<Item = RecordRef>>(iter: I) -> Self {
        let mut tree = RecordTree::new();
        for record in iter {
            let _ = tree.insert(record);
        }
        tree
    }
}
