//! Circular doubly-linked list of owners, stored in a generational arena.
//!
//! `next` / `prev` are arena indices and never own anything; the arena owns every
//! owner. Handles to removed owners are rejected by the arena's generation check.

use std::fmt;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::RecordTree;

/// Handle to an owner in the registry.
pub type OwnerId = Index;

/// Named holder of one record tree.
#[derive(Debug)]
pub struct Owner {
    name: String,
    pokedex: RecordTree,
    next: OwnerId,
    prev: OwnerId,
}

impl Owner {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pokedex(&self) -> &RecordTree {
        &self.pokedex
    }

    pub fn pokedex_mut(&mut self) -> &mut RecordTree {
        &mut self.pokedex
    }

    pub fn next(&self) -> OwnerId {
        self.next
    }

    pub fn prev(&self) -> OwnerId {
        self.prev
    }

    /// Give up the record tree, e.g. when the owner is dropped after a merge.
    pub fn into_pokedex(self) -> RecordTree {
        self.pokedex
    }
}

/// Walking direction around the owner cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Forward => f.write_str("forward"),
            Direction::Backward => f.write_str("backward"),
        }
    }
}

/// Result of [`OwnerRegistry::sort_by_name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOutcome {
    Sorted(usize),
    /// Zero or one owner
    NothingToSort,
}

/// All owners, linked in a cycle starting at `head`.
#[derive(Debug)]
pub struct OwnerRegistry {
    arena: Arena<Owner>,
    head: Option<OwnerId>,
}

impl Default for OwnerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl OwnerRegistry {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
        }
    }

    pub fn head(&self) -> Option<OwnerId> {
        self.head
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn get(&self, id: OwnerId) -> DomainResult<&Owner> {
        self.arena.get(id).ok_or(DomainError::StaleOwner)
    }

    pub fn get_mut(&mut self, id: OwnerId) -> DomainResult<&mut Owner> {
        self.arena.get_mut(id).ok_or(DomainError::StaleOwner)
    }

    fn node(&self, id: OwnerId) -> &Owner {
        &self.arena[id]
    }

    fn node_mut(&mut self, id: OwnerId) -> &mut Owner {
        &mut self.arena[id]
    }

    /// Create an owner and append it at the logical end of the cycle (just before `head`).
    #[instrument(level = "debug", skip_all, fields(name = tracing::field::Empty))]
    pub fn link(&mut self, name: impl Into<String>, pokedex: RecordTree) -> OwnerId {
        let name = name.into();
        tracing::Span::current().record("name", name.as_str());

        let id = self.arena.insert_with(|id| Owner {
            name,
            pokedex,
            next: id,
            prev: id,
        });

        match self.head {
            None => self.head = Some(id),
            Some(head) => {
                let last = self.node(head).prev;
                self.node_mut(last).next = id;
                self.node_mut(head).prev = id;
                let owner = self.node_mut(id);
                owner.prev = last;
                owner.next = head;
            }
        }
        debug!(count = self.len(), "owner linked");
        id
    }

    /// Remove an owner from the cycle and hand it back to the caller.
    ///
    /// Removing `head` moves `head` to the next owner.
    #[instrument(level = "debug", skip(self))]
    pub fn unlink(&mut self, id: OwnerId) -> DomainResult<Owner> {
        let (next, prev) = {
            let owner = self.get(id)?;
            (owner.next, owner.prev)
        };

        if next == id {
            self.head = None;
        } else {
            self.node_mut(prev).next = next;
            self.node_mut(next).prev = prev;
            if self.head == Some(id) {
                self.head = Some(next);
            }
        }

        let owner = self.arena.remove(id).ok_or(DomainError::StaleOwner)?;
        debug!(name = owner.name(), count = self.len(), "owner unlinked");
        Ok(owner)
    }

    /// One full cycle in `next` order, starting at `head`.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            registry: self,
            cursor: self.head,
        }
    }

    /// First owner with exactly this name, searching from `head`.
    #[instrument(level = "trace", skip(self))]
    pub fn find_by_name(&self, name: &str) -> DomainResult<OwnerId> {
        self.iter()
            .find(|(_, owner)| owner.name == name)
            .map(|(id, _)| id)
            .ok_or_else(|| DomainError::OwnerNotFound(name.to_string()))
    }

    /// Number of owners, counted by walking the cycle once.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// 1-based position and name of every owner, in cycle order.
    pub fn positions(&self) -> Vec<(usize, &str)> {
        self.iter()
            .enumerate()
            .map(|(i, (_, owner))| (i + 1, owner.name()))
            .collect()
    }

    /// Owner at 1-based `position` counted from `head`.
    pub fn nth(&self, position: usize) -> DomainResult<OwnerId> {
        let count = self.count();
        if position == 0 || position > count {
            return Err(DomainError::InvalidPosition { position, count });
        }
        self.iter()
            .nth(position - 1)
            .map(|(id, _)| id)
            .ok_or(DomainError::InvalidPosition { position, count })
    }

    /// Relink the cycle in ascending name order; equal names keep their relative order.
    #[instrument(level = "debug", skip(self))]
    pub fn sort_by_name(&mut self) -> SortOutcome {
        let mut order: Vec<OwnerId> = self.iter().map(|(id, _)| id).collect();
        let amount = order.len();
        if amount < 2 {
            return SortOutcome::NothingToSort;
        }

        order.sort_by(|a, b| self.node(*a).name.cmp(&self.node(*b).name));

        for (i, &id) in order.iter().enumerate() {
            let next = order[(i + 1) % amount];
            let prev = order[(i + amount - 1) % amount];
            let owner = self.node_mut(id);
            owner.next = next;
            owner.prev = prev;
        }
        self.head = order.first().copied();
        debug!(amount, "owners sorted");
        SortOutcome::Sorted(amount)
    }

    /// Endless walk from `head`, limited to `count` steps.
    pub fn walk(&self, direction: Direction, count: usize) -> Walk<'_> {
        Walk {
            registry: self,
            cursor: self.head,
            direction,
            remaining: count,
            position: 0,
        }
    }

    /// Release every owner and its tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.head = None;
    }
}

/// Iterator over one cycle of the registry.
pub struct Iter<'a> {
    registry: &'a OwnerRegistry,
    cursor: Option<OwnerId>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (OwnerId, &'a Owner);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        let owner = self.registry.arena.get(id)?;
        self.cursor = if Some(owner.next) == self.registry.head {
            None
        } else {
            Some(owner.next)
        };
        Some((id, owner))
    }
}

/// Bounded walk around the cycle, wrapping as often as needed.
pub struct Walk<'a> {
    registry: &'a OwnerRegistry,
    cursor: Option<OwnerId>,
    direction: Direction,
    remaining: usize,
    position: usize,
}

impl<'a> Iterator for Walk<'a> {
    /// 1-based emission counter and owner name
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let owner = self.registry.arena.get(self.cursor?)?;
        self.remaining -= 1;
        self.position += 1;
        self.cursor = Some(match self.direction {
            Direction::Forward => owner.next,
            Direction::Backward => owner.prev,
        });
        Some((self.position, owner.name()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.cursor.is_some() {
            (self.remaining, Some(self.remaining))
        } else {
            (0, Some(0))
        }
    }
}
