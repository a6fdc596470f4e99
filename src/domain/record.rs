//! Record templates and the handle a tree node keeps to one of them.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

/// Elemental category of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Grass,
    Fire,
    Water,
    Bug,
    Normal,
    Poison,
    Electric,
    Ground,
    Fairy,
    Fighting,
    Psychic,
    Rock,
    Ghost,
    Dragon,
    Ice,
}

impl Category {
    pub const ALL: [Category; 15] = [
        Category::Grass,
        Category::Fire,
        Category::Water,
        Category::Bug,
        Category::Normal,
        Category::Poison,
        Category::Electric,
        Category::Ground,
        Category::Fairy,
        Category::Fighting,
        Category::Psychic,
        Category::Rock,
        Category::Ghost,
        Category::Dragon,
        Category::Ice,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Grass => "GRASS",
            Category::Fire => "FIRE",
            Category::Water => "WATER",
            Category::Bug => "BUG",
            Category::Normal => "NORMAL",
            Category::Poison => "POISON",
            Category::Electric => "ELECTRIC",
            Category::Ground => "GROUND",
            Category::Fairy => "FAIRY",
            Category::Fighting => "FIGHTING",
            Category::Psychic => "PSYCHIC",
            Category::Rock => "ROCK",
            Category::Ghost => "GHOST",
            Category::Dragon => "DRAGON",
            Category::Ice => "ICE",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a category name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category: {}", self.0)
    }
}

impl std::error::Error for ParseCategoryError {}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Immutable template data for one pokemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub id: u32,
    pub name: Cow<'static, str>,
    pub category: Category,
    pub hp: u32,
    pub attack: u32,
    pub evolvable: bool,
}

impl Record {
    pub const fn new(
        id: u32,
        name: &'static str,
        category: Category,
        hp: u32,
        attack: u32,
        evolvable: bool,
    ) -> Self {
        Self {
            id,
            name: Cow::Borrowed(name),
            category,
            hp,
            attack,
            evolvable,
        }
    }

    /// Weighted fighting strength: `attack * attack_weight + hp * hp_weight`.
    pub fn fight_score(&self, attack_weight: f64, hp_weight: f64) -> f64 {
        f64::from(self.attack) * attack_weight + f64::from(self.hp) * hp_weight
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Type: {}, HP: {}, Attack: {}, Can Evolve: {}",
            self.id,
            self.name,
            self.category,
            self.hp,
            self.attack,
            if self.evolvable { "Yes" } else { "No" }
        )
    }
}

/// Record held by a tree node.
///
/// Nodes created from the catalog borrow its static entries; nodes created by
/// merge or evolution own a private copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Borrowed(&'static Record),
    Owned(Box<Record>),
}

impl RecordRef {
    /// Detach from any shared catalog entry.
    pub fn to_owned_copy(&self) -> RecordRef {
        RecordRef::Owned(Box::new(self.deref().clone()))
    }

    pub fn is_borrowed(&self) -> bool {
        matches!(self, RecordRef::Borrowed(_))
    }
}

impl Deref for RecordRef {
    type Target = Record;

    fn deref(&self) -> &Record {
        match self {
            RecordRef::Borrowed(record) => record,
            RecordRef::Owned(record) => record,
        }
    }
}

impl From<&'static Record> for RecordRef {
    fn from(record: &'static Record) -> Self {
        RecordRef::Borrowed(record)
    }
}

impl From<Record> for RecordRef {
    fn from(record: Record) -> Self {
        RecordRef::Owned(Box::new(record))
    }
}
