//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree and registry rules.
/// The menu layer decides how to present them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("No Pokemon with ID {0} found")]
    RecordNotFound(u32),

    #[error("Owner '{0}' not found")]
    OwnerNotFound(String),

    #[error("Pokemon with ID {0} is already in the Pokedex")]
    DuplicateRecord(u32),

    #[error("Owner '{0}' already exists")]
    DuplicateOwner(String),

    #[error("{0} is empty")]
    EmptyCollection(&'static str),

    #[error("ID {id} is outside the catalog range {min}..={max}")]
    OutOfRange { id: u32, min: u32, max: u32 },

    #[error("Pokemon with ID {0} cannot evolve")]
    CannotEvolve(u32),

    #[error("owner handle refers to a removed owner")]
    StaleOwner,

    #[error("invalid position {position}, expected 1..={count}")]
    InvalidPosition { position: usize, count: usize },

    #[error("Not enough owners to merge")]
    NotEnoughOwners,

    #[error("cannot merge owner '{0}' into itself")]
    SelfMerge(String),

    #[error("invalid starter choice {0}, expected 1..=3")]
    InvalidStarter(u32),
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
