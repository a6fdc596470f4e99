//! Pokedex service
//!
//! Owns the owner registry and composes tree and registry primitives into the
//! operations the menu offers: creating, deleting and merging pokedexes, and
//! adding, evolving, releasing and fighting records.

use tracing::{debug, instrument, warn};

use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::domain::{
    Catalog, Direction, DomainError, MergeReport, Owner, OwnerId, OwnerRegistry, Record,
    RecordRef, RecordTree, SortOutcome, TraversalOrder, TreeDisplay,
};

/// One side of a fight.
#[derive(Debug, Clone, PartialEq)]
pub struct Contender {
    pub id: u32,
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FightOutcome {
    Winner(String),
    Tie,
}

/// Scores of both contenders and who won.
#[derive(Debug, Clone, PartialEq)]
pub struct FightReport {
    pub first: Contender,
    pub second: Contender,
    pub outcome: FightOutcome,
}

/// Result of one evolution step.
#[derive(Debug, Clone, PartialEq)]
pub struct Evolution {
    /// Record that was removed
    pub from: RecordRef,
    /// Catalog entry of the evolved form
    pub to: &'static Record,
    /// The evolved form was already in the pokedex, so only `from` was removed
    pub already_present: bool,
}

/// Service for managing owners and their pokedexes.
pub struct PokedexService {
    registry: OwnerRegistry,
    catalog: Catalog,
    settings: Settings,
}

impl PokedexService {
    /// Create a service over the built-in catalog.
    pub fn new(settings: Settings) -> Self {
        Self::with_catalog(Catalog::builtin(), settings)
    }

    pub fn with_catalog(catalog: Catalog, settings: Settings) -> Self {
        Self {
            registry: OwnerRegistry::new(),
            catalog,
            settings,
        }
    }

    pub fn registry(&self) -> &OwnerRegistry {
        &self.registry
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn owner(&self, owner: OwnerId) -> ApplicationResult<&Owner> {
        Ok(self.registry.get(owner)?)
    }

    fn pokedex(&self, owner: OwnerId) -> ApplicationResult<&RecordTree> {
        Ok(self.registry.get(owner)?.pokedex())
    }

    fn pokedex_mut(&mut self, owner: OwnerId) -> ApplicationResult<&mut RecordTree> {
        Ok(self.registry.get_mut(owner)?.pokedex_mut())
    }

    fn non_empty_pokedex(&self, owner: OwnerId) -> ApplicationResult<&RecordTree> {
        let pokedex = self.pokedex(owner)?;
        if pokedex.is_empty() {
            return Err(DomainError::EmptyCollection("Pokedex").into());
        }
        Ok(pokedex)
    }

    // ------------------------------------------------------------------
    // Owners
    // ------------------------------------------------------------------

    /// Create a pokedex for `name` holding the chosen starter.
    #[instrument(level = "debug", skip(self))]
    pub fn create_pokedex(&mut self, name: &str, starter_choice: u32) -> ApplicationResult<OwnerId> {
        if !self.settings.allow_duplicate_owner_names && self.registry.find_by_name(name).is_ok() {
            return Err(DomainError::DuplicateOwner(name.to_string()).into());
        }
        let starter = self.catalog.starter(starter_choice)?;
        let id = self.registry.link(name, RecordTree::with_record(starter));
        debug!("created pokedex for {} with starter {}", name, starter.name);
        Ok(id)
    }

    pub fn find_owner(&self, name: &str) -> ApplicationResult<OwnerId> {
        Ok(self.registry.find_by_name(name)?)
    }

    /// Owner at 1-based `position` in list order.
    pub fn owner_at(&self, position: usize) -> ApplicationResult<OwnerId> {
        if self.registry.is_empty() {
            return Err(DomainError::EmptyCollection("Owner list").into());
        }
        Ok(self.registry.nth(position)?)
    }

    pub fn owners(&self) -> Vec<(usize, &str)> {
        self.registry.positions()
    }

    /// Unlink the owner; the returned value still holds its pokedex.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_pokedex(&mut self, owner: OwnerId) -> ApplicationResult<Owner> {
        let removed = self.registry.unlink(owner)?;
        debug!("deleted pokedex of {}", removed.name());
        Ok(removed)
    }

    /// Absorb the second owner's pokedex into the first's and drop the second owner.
    #[instrument(level = "debug", skip(self))]
    pub fn merge_pokedexes(&mut self, first: &str, second: &str) -> ApplicationResult<MergeReport> {
        if self.registry.count() < 2 {
            return Err(DomainError::NotEnoughOwners.into());
        }
        let first_id = self.registry.find_by_name(first)?;
        let second_id = self.registry.find_by_name(second)?;
        if first_id == second_id {
            return Err(DomainError::SelfMerge(first.to_string()).into());
        }

        let absorbed = self.registry.unlink(second_id)?;
        let report = self.pokedex_mut(first_id)?.merge(absorbed.pokedex());
        debug!(
            absorbed = report.absorbed,
            duplicates = report.duplicates,
            "merged {} into {}",
            second,
            first
        );
        Ok(report)
    }

    pub fn sort_owners(&mut self) -> SortOutcome {
        self.registry.sort_by_name()
    }

    /// Walk the owner cycle `count` times, capped at `max_walk`.
    pub fn walk_owners(&self, direction: Direction, count: usize) -> Vec<(usize, String)> {
        let capped = count.min(self.settings.max_walk);
        if capped < count {
            warn!(count, max_walk = self.settings.max_walk, "walk count capped");
        }
        self.registry
            .walk(direction, capped)
            .map(|(position, name)| (position, name.to_string()))
            .collect()
    }

    // ------------------------------------------------------------------
    // Records
    // ------------------------------------------------------------------

    /// Add the catalog entry `id` to the owner's pokedex.
    #[instrument(level = "debug", skip(self))]
    pub fn add_record(&mut self, owner: OwnerId, id: u32) -> ApplicationResult<&'static Record> {
        let record = self.catalog.get(id)?;
        self.pokedex_mut(owner)?.insert(RecordRef::from(record))?;
        debug!("added {} (ID {})", record.name, id);
        Ok(record)
    }

    /// Remove the record `id` from the owner's pokedex.
    #[instrument(level = "debug", skip(self))]
    pub fn release(&mut self, owner: OwnerId, id: u32) -> ApplicationResult<RecordRef> {
        self.non_empty_pokedex(owner)?;
        let removed = self.pokedex_mut(owner)?.remove(id)?;
        debug!("released {} (ID {})", removed.name, id);
        Ok(removed)
    }

    /// Replace record `id` by its evolved form `id + 1`.
    ///
    /// If the evolved form is already present only `id` is removed.
    #[instrument(level = "debug", skip(self))]
    pub fn evolve(&mut self, owner: OwnerId, id: u32) -> ApplicationResult<Evolution> {
        let pokedex = self.non_empty_pokedex(owner)?;
        let current = pokedex.search(id)?.record();
        if !current.evolvable {
            return Err(DomainError::CannotEvolve(id).into());
        }
        let evolved = self.catalog.evolution_of(id)?;
        let already_present = pokedex.contains(evolved.id);

        let pokedex = self.pokedex_mut(owner)?;
        if !already_present {
            pokedex.insert(RecordRef::from(evolved).to_owned_copy())?;
        }
        let from = pokedex.remove(id)?;
        debug!("evolved {} (ID {}) to {} (ID {})", from.name, id, evolved.name, evolved.id);
        Ok(Evolution {
            from,
            to: evolved,
            already_present,
        })
    }

    /// Score two records of the same pokedex against each other.
    #[instrument(level = "debug", skip(self))]
    pub fn fight(&self, owner: OwnerId, first: u32, second: u32) -> ApplicationResult<FightReport> {
        let pokedex = self.non_empty_pokedex(owner)?;
        let first = pokedex.search(first)?.record();
        let second = pokedex.search(second)?.record();

        let weights = self.settings.fight;
        let contender = |record: &Record| Contender {
            id: record.id,
            name: record.name.to_string(),
            score: record.fight_score(weights.attack_weight, weights.hp_weight),
        };
        let (first, second) = (contender(first), contender(second));

        let outcome = if first.score == second.score {
            FightOutcome::Tie
        } else if first.score > second.score {
            FightOutcome::Winner(first.name.clone())
        } else {
            FightOutcome::Winner(second.name.clone())
        };
        Ok(FightReport {
            first,
            second,
            outcome,
        })
    }

    /// Records of the owner's pokedex in the given order.
    pub fn records(&self, owner: OwnerId, order: TraversalOrder) -> ApplicationResult<Vec<&Record>> {
        Ok(self.non_empty_pokedex(owner)?.records(order))
    }

    /// Rendered tree view of the owner's pokedex.
    pub fn tree_view(&self, owner: OwnerId) -> ApplicationResult<String> {
        Ok(self.non_empty_pokedex(owner)?.to_tree_string().to_string())
    }

    /// Release every owner.
    pub fn shutdown(&mut self) {
        debug!(owners = self.registry.len(), "releasing all owners");
        self.registry.clear();
    }
}
