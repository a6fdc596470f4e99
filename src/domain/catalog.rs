//! Built-in catalog of first-generation record templates.
//!
//! The catalog is ordered by ascending, contiguous id starting at 1. An evolvable
//! entry evolves into the entry directly after it.

use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::Category::*;
use crate::domain::record::Record;

/// Number of starter families offered when a pokedex is created.
pub const STARTER_CHOICES: u32 = 3;

/// Size of an evolution family, used to locate starters.
const FAMILY_SIZE: u32 = 3;

/// Read-only view over an ordered slice of records.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    records: &'static [Record],
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// The 150-entry first-generation catalog.
    pub fn builtin() -> Self {
        Self { records: &POKEDEX }
    }

    /// Wrap a custom slice. Ids must ascend contiguously from the first entry.
    pub fn new(records: &'static [Record]) -> Self {
        debug_assert!(
            records.windows(2).all(|w| w[1].id == w[0].id + 1),
            "catalog ids must be contiguous and ascending"
        );
        Self { records }
    }

    pub fn records(&self) -> &'static [Record] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn min_id(&self) -> u32 {
        self.records.first().map_or(0, |r| r.id)
    }

    pub fn max_id(&self) -> u32 {
        self.records.last().map_or(0, |r| r.id)
    }

    fn out_of_range(&self, id: u32) -> DomainError {
        DomainError::OutOfRange {
            id,
            min: self.min_id(),
            max: self.max_id(),
        }
    }

    /// Look up a record by id.
    #[instrument(level = "trace", skip(self))]
    pub fn get(&self, id: u32) -> DomainResult<&'static Record> {
        if id < self.min_id() {
            return Err(self.out_of_range(id));
        }
        self.records
            .get((id - self.min_id()) as usize)
            .filter(|r| r.id == id)
            .ok_or_else(|| self.out_of_range(id))
    }

    /// The evolved form of `id`, i.e. the entry at `id + 1`.
    pub fn evolution_of(&self, id: u32) -> DomainResult<&'static Record> {
        let next = id.checked_add(1).ok_or_else(|| self.out_of_range(id))?;
        self.get(next)
    }

    /// Starter for menu choice `1..=3`: the first member of that family.
    pub fn starter(&self, choice: u32) -> DomainResult<&'static Record> {
        if !(1..=STARTER_CHOICES).contains(&choice) {
            return Err(DomainError::InvalidStarter(choice));
        }
        self.get(self.min_id() + (choice - 1) * FAMILY_SIZE)
    }

    /// All starters, in menu order.
    pub fn starters(&self) -> Vec<&'static Record> {
        (1..=STARTER_CHOICES)
            .filter_map(|choice| self.starter(choice).ok())
            .collect()
    }
}

static POKEDEX: [Record; 150] = [
    Record::new(1, "Bulbasaur", Grass, 45, 49, true),
    Record::new(2, "Ivysaur", Grass, 60, 62, true),
    Record::new(3, "Venusaur", Grass, 80, 82, false),
    Record::new(4, "Charmander", Fire, 39, 52, true),
    Record::new(5, "Charmeleon", Fire, 58, 64, true),
    Record::new(6, "Charizard", Fire, 78, 84, false),
    Record::new(7, "Squirtle", Water, 44, 48, true),
    Record::new(8, "Wartortle", Water, 59, 63, true),
    Record::new(9, "Blastoise", Water, 79, 83, false),
    Record::new(10, "Caterpie", Bug, 45, 30, true),
    Record::new(11, "Metapod", Bug, 50, 20, true),
    Record::new(12, "Butterfree", Bug, 60, 45, false),
    Record::new(13, "Weedle", Bug, 40, 35, true),
    Record::new(14, "Kakuna", Bug, 45, 25, true),
    Record::new(15, "Beedrill", Bug, 65, 90, false),
    Record::new(16, "Pidgey", Normal, 40, 45, true),
    Record::new(17, "Pidgeotto", Normal, 63, 60, true),
    Record::new(18, "Pidgeot", Normal, 83, 80, false),
    Record::new(19, "Rattata", Normal, 30, 56, true),
    Record::new(20, "Raticate", Normal, 55, 81, false),
    Record::new(21, "Spearow", Normal, 40, 60, true),
    Record::new(22, "Fearow", Normal, 65, 90, false),
    Record::new(23, "Ekans", Poison, 35, 60, true),
    Record::new(24, "Arbok", Poison, 60, 95, false),
    Record::new(25, "Pikachu", Electric, 35, 55, true),
    Record::new(26, "Raichu", Electric, 60, 90, false),
    Record::new(27, "Sandshrew", Ground, 50, 75, true),
    Record::new(28, "Sandslash", Ground, 75, 100, false),
    Record::new(29, "Nidoran-F", Poison, 55, 47, true),
    Record::new(30, "Nidorina", Poison, 70, 62, true),
    Record::new(31, "Nidoqueen", Poison, 90, 92, false),
    Record::new(32, "Nidoran-M", Poison, 46, 57, true),
    Record::new(33, "Nidorino", Poison, 61, 72, true),
    Record::new(34, "Nidoking", Poison, 81, 102, false),
    Record::new(35, "Clefairy", Fairy, 70, 45, true),
    Record::new(36, "Clefable", Fairy, 95, 70, false),
    Record::new(37, "Vulpix", Fire, 38, 41, true),
    Record::new(38, "Ninetales", Fire, 73, 76, false),
    Record::new(39, "Jigglypuff", Normal, 115, 45, true),
    Record::new(40, "Wigglytuff", Normal, 140, 70, false),
    Record::new(41, "Zubat", Poison, 40, 45, true),
    Record::new(42, "Golbat", Poison, 75, 80, false),
    Record::new(43, "Oddish", Grass, 45, 50, true),
    Record::new(44, "Gloom", Grass, 60, 65, true),
    Record::new(45, "Vileplume", Grass, 75, 80, false),
    Record::new(46, "Paras", Bug, 35, 70, true),
    Record::new(47, "Parasect", Bug, 60, 95, false),
    Record::new(48, "Venonat", Bug, 60, 55, true),
    Record::new(49, "Venomoth", Bug, 70, 65, false),
    Record::new(50, "Diglett", Ground, 10, 55, true),
    Record::new(51, "Dugtrio", Ground, 35, 80, false),
    Record::new(52, "Meowth", Normal, 40, 45, true),
    Record::new(53, "Persian", Normal, 65, 70, false),
    Record::new(54, "Psyduck", Water, 50, 52, true),
    Record::new(55, "Golduck", Water, 80, 82, false),
    Record::new(56, "Mankey", Fighting, 40, 80, true),
    Record::new(57, "Primeape", Fighting, 65, 105, false),
    Record::new(58, "Growlithe", Fire, 55, 70, true),
    Record::new(59, "Arcanine", Fire, 90, 110, false),
    Record::new(60, "Poliwag", Water, 40, 50, true),
    Record::new(61, "Poliwhirl", Water, 65, 65, true),
    Record::new(62, "Poliwrath", Water, 90, 95, false),
    Record::new(63, "Abra", Psychic, 25, 20, true),
    Record::new(64, "Kadabra", Psychic, 40, 35, true),
    Record::new(65, "Alakazam", Psychic, 55, 50, false),
    Record::new(66, "Machop", Fighting, 70, 80, true),
    Record::new(67, "Machoke", Fighting, 80, 100, true),
    Record::new(68, "Machamp", Fighting, 90, 130, false),
    Record::new(69, "Bellsprout", Grass, 50, 75, true),
    Record::new(70, "Weepinbell", Grass, 65, 90, true),
    Record::new(71, "Victreebel", Grass, 80, 105, false),
    Record::new(72, "Tentacool", Water, 40, 40, true),
    Record::new(73, "Tentacruel", Water, 80, 70, false),
    Record::new(74, "Geodude", Rock, 40, 80, true),
    Record::new(75, "Graveler", Rock, 55, 95, true),
    Record::new(76, "Golem", Rock, 80, 120, false),
    Record::new(77, "Ponyta", Fire, 50, 85, true),
    Record::new(78, "Rapidash", Fire, 65, 100, false),
    Record::new(79, "Slowpoke", Water, 90, 65, true),
    Record::new(80, "Slowbro", Water, 95, 75, false),
    Record::new(81, "Magnemite", Electric, 25, 35, true),
    Record::new(82, "Magneton", Electric, 50, 60, false),
    Record::new(83, "Farfetch'd", Normal, 52, 65, false),
    Record::new(84, "Doduo", Normal, 35, 85, true),
    Record::new(85, "Dodrio", Normal, 60, 110, false),
    Record::new(86, "Seel", Water, 65, 45, true),
    Record::new(87, "Dewgong", Water, 90, 70, false),
    Record::new(88, "Grimer", Poison, 80, 80, true),
    Record::new(89, "Muk", Poison, 105, 105, false),
    Record::new(90, "Shellder", Water, 30, 65, true),
    Record::new(91, "Cloyster", Water, 50, 95, false),
    Record::new(92, "Gastly", Ghost, 30, 35, true),
    Record::new(93, "Haunter", Ghost, 45, 50, true),
    Record::new(94, "Gengar", Ghost, 60, 65, false),
    Record::new(95, "Onix", Rock, 35, 45, false),
    Record::new(96, "Drowzee", Psychic, 60, 48, true),
    Record::new(97, "Hypno", Psychic, 85, 73, false),
    Record::new(98, "Krabby", Water, 30, 105, true),
    Record::new(99, "Kingler", Water, 55, 130, false),
    Record::new(100, "Voltorb", Electric, 40, 30, true),
    Record::new(101, "Electrode", Electric, 60, 50, false),
    Record::new(102, "Exeggcute", Grass, 60, 40, true),
    Record::new(103, "Exeggutor", Grass, 95, 95, false),
    Record::new(104, "Cubone", Ground, 50, 50, true),
    Record::new(105, "Marowak", Ground, 60, 80, false),
    Record::new(106, "Hitmonlee", Fighting, 50, 120, false),
    Record::new(107, "Hitmonchan", Fighting, 50, 105, false),
    Record::new(108, "Lickitung", Normal, 90, 55, false),
    Record::new(109, "Koffing", Poison, 40, 65, true),
    Record::new(110, "Weezing", Poison, 65, 90, false),
    Record::new(111, "Rhyhorn", Ground, 80, 85, true),
    Record::new(112, "Rhydon", Ground, 105, 130, false),
    Record::new(113, "Chansey", Normal, 250, 5, false),
    Record::new(114, "Tangela", Grass, 65, 55, false),
    Record::new(115, "Kangaskhan", Normal, 105, 95, false),
    Record::new(116, "Horsea", Water, 30, 40, true),
    Record::new(117, "Seadra", Water, 55, 65, false),
    Record::new(118, "Goldeen", Water, 45, 67, true),
    Record::new(119, "Seaking", Water, 80, 92, false),
    Record::new(120, "Staryu", Water, 30, 45, true),
    Record::new(121, "Starmie", Water, 60, 75, false),
    Record::new(122, "Mr. Mime", Psychic, 40, 45, false),
    Record::new(123, "Scyther", Bug, 70, 110, false),
    Record::new(124, "Jynx", Ice, 65, 50, false),
    Record::new(125, "Electabuzz", Electric, 65, 83, false),
    Record::new(126, "Magmar", Fire, 65, 95, false),
    Record::new(127, "Pinsir", Bug, 65, 125, false),
    Record::new(128, "Tauros", Normal, 75, 100, false),
    Record::new(129, "Magikarp", Water, 20, 10, true),
    Record::new(130, "Gyarados", Water, 95, 125, false),
    Record::new(131, "Lapras", Water, 130, 85, false),
    Record::new(132, "Ditto", Normal, 48, 48, false),
    Record::new(133, "Eevee", Normal, 55, 55, true),
    Record::new(134, "Vaporeon", Water, 130, 65, false),
    Record::new(135, "Jolteon", Electric, 65, 65, false),
    Record::new(136, "Flareon", Fire, 65, 130, false),
    Record::new(137, "Porygon", Normal, 65, 60, false),
    Record::new(138, "Omanyte", Rock, 35, 40, true),
    Record::new(139, "Omastar", Rock, 70, 60, false),
    Record::new(140, "Kabuto", Rock, 30, 80, true),
    Record::new(141, "Kabutops", Rock, 60, 115, false),
    Record::new(142, "Aerodactyl", Rock, 80, 105, false),
    Record::new(143, "Snorlax", Normal, 160, 110, false),
    Record::new(144, "Articuno", Ice, 90, 85, false),
    Record::new(145, "Zapdos", Electric, 90, 90, false),
    Record::new(146, "Moltres", Fire, 90, 100, false),
    Record::new(147, "Dratini", Dragon, 41, 64, true),
    Record::new(148, "Dragonair", Dragon, 61, 84, true),
    Record::new(149, "Dragonite", Dragon, 91, 134, false),
    Record::new(150, "Mewtwo", Psychic, 106, 110, false),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_builtin_catalog_when_loaded_then_ids_run_from_1_to_150() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 150);
        assert_eq!(catalog.min_id(), 1);
        assert_eq!(catalog.max_id(), 150);
        for (index, record) in catalog.records().iter().enumerate() {
            assert_eq!(record.id as usize, index + 1);
        }
    }

    #[test]
    fn given_id_outside_catalog_when_getting_then_out_of_range() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.get(0),
            Err(DomainError::OutOfRange { id: 0, min: 1, max: 150 })
        );
        assert!(catalog.get(151).is_err());
        assert_eq!(catalog.get(25).map(|r| r.name.as_ref()), Ok("Pikachu"));
    }

    #[test]
    fn given_starter_choices_when_resolving_then_first_of_each_family() {
        let catalog = Catalog::builtin();
        let names: Vec<_> = catalog.starters().iter().map(|r| r.name.as_ref()).collect();
        assert_eq!(names, ["Bulbasaur", "Charmander", "Squirtle"]);
        assert_eq!(catalog.starter(4), Err(DomainError::InvalidStarter(4)));
        assert_eq!(catalog.starter(0), Err(DomainError::InvalidStarter(0)));
    }

    #[test]
    fn given_last_entry_when_evolving_then_out_of_range() {
        let catalog = Catalog::builtin();
        assert!(catalog.evolution_of(150).is_err());
        assert_eq!(catalog.evolution_of(1).map(|r| r.id), Ok(2));
    }

    #[test]
    fn given_evolvable_entries_when_checked_then_successor_exists() {
        let catalog = Catalog::builtin();
        for record in catalog.records().iter().filter(|r| r.evolvable) {
            assert!(catalog.evolution_of(record.id).is_ok(), "{}", record.name);
        }
    }
}
