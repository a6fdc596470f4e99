//! Multi-owner pokedex: each owner keeps a binary search tree of pokemon keyed by id,
//! owners live in a circular doubly linked registry.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;
