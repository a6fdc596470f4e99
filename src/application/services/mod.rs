//! Application services

pub mod pokedex;

pub use pokedex::{Contender, Evolution, FightOutcome, FightReport, PokedexService};
