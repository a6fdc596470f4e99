//! Domain layer: records, search trees and the owner registry
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod error;
pub mod record;
pub mod registry;
pub mod traversal;
pub mod tree;
pub mod tree_traits;

pub use catalog::Catalog;
pub use error::{DomainError, DomainResult};
pub use record::{Category, Record, RecordRef};
pub use registry::{Direction, Owner, OwnerId, OwnerRegistry, SortOutcome};
pub use traversal::TraversalOrder;
pub use tree::{MergeReport, RecordNode, RecordTree};
pub use tree_traits::TreeDisplay;
