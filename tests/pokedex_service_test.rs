//! Tests for PokedexService
//!
//! Covers owner lifecycle, evolution, fights, release and merge as seen by the menu.

use rstest::{fixture, rstest};

use pokedex::application::services::{FightOutcome, PokedexService};
use pokedex::application::ApplicationError;
use pokedex::config::Settings;
use pokedex::domain::{
    Catalog, Category, Direction, DomainError, OwnerId, Record, SortOutcome, TraversalOrder,
};
use pokedex::util::testing;

static TINY: [Record; 3] = [
    Record::new(1, "Alpha", Category::Normal, 10, 10, true),
    Record::new(2, "Beta", Category::Normal, 20, 20, true),
    Record::new(3, "Gamma", Category::Normal, 30, 30, true),
];

#[fixture]
fn service() -> PokedexService {
    testing::init_test_setup();
    PokedexService::new(Settings::default())
}

fn ids(service: &PokedexService, owner: OwnerId) -> Vec<u32> {
    service
        .records(owner, TraversalOrder::InOrder)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect()
}

fn domain(err: ApplicationError) -> DomainError {
    err.as_domain().cloned().expect("domain error")
}

#[rstest]
#[case(1, "Bulbasaur")]
#[case(2, "Charmander")]
#[case(3, "Squirtle")]
fn given_starter_choice_when_creating_pokedex_then_holds_starter(
    mut service: PokedexService,
    #[case] choice: u32,
    #[case] starter: &str,
) {
    let owner = service.create_pokedex("Ash", choice).unwrap();

    let records = service.records(owner, TraversalOrder::InOrder).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, starter);
}

#[rstest]
fn given_invalid_starter_when_creating_then_no_owner_is_linked(mut service: PokedexService) {
    let err = service.create_pokedex("Ash", 4).unwrap_err();

    assert_eq!(domain(err), DomainError::InvalidStarter(4));
    assert!(service.registry().is_empty());
}

#[rstest]
fn given_existing_name_when_creating_then_rejected(mut service: PokedexService) {
    service.create_pokedex("Ash", 1).unwrap();

    let err = service.create_pokedex("Ash", 2).unwrap_err();

    assert_eq!(domain(err), DomainError::DuplicateOwner("Ash".to_string()));
    assert_eq!(service.registry().count(), 1);
}

#[test]
fn given_duplicates_allowed_when_creating_same_name_then_both_exist() {
    let settings = Settings {
        allow_duplicate_owner_names: true,
        ..Settings::default()
    };
    let mut service = PokedexService::new(settings);

    let first = service.create_pokedex("Ash", 1).unwrap();
    service.create_pokedex("Ash", 2).unwrap();

    assert_eq!(service.registry().count(), 2);
    assert_eq!(service.find_owner("Ash").unwrap(), first);
}

#[rstest]
fn given_owned_id_when_adding_again_then_duplicate_and_unchanged(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let err = service.add_record(owner, 1).unwrap_err();

    assert_eq!(domain(err), DomainError::DuplicateRecord(1));
    assert_eq!(ids(&service, owner), vec![1]);
}

#[rstest]
#[case(0)]
#[case(151)]
fn given_id_outside_catalog_when_adding_then_out_of_range(
    mut service: PokedexService,
    #[case] id: u32,
) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let err = service.add_record(owner, id).unwrap_err();

    assert!(matches!(domain(err), DomainError::OutOfRange { .. }));
}

#[rstest]
fn given_evolvable_record_when_evolving_then_replaced_by_successor(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let evolution = service.evolve(owner, 1).unwrap();

    assert_eq!(evolution.from.name, "Bulbasaur");
    assert_eq!(evolution.to.name, "Ivysaur");
    assert!(!evolution.already_present);
    assert_eq!(ids(&service, owner), vec![2]);
    let evolved = service.owner(owner).unwrap().pokedex().search(2).unwrap();
    assert!(!evolved.record_ref().is_borrowed());
}

#[rstest]
fn given_successor_already_present_when_evolving_then_only_source_is_removed(
    mut service: PokedexService,
) {
    let owner = service.create_pokedex("Ash", 1).unwrap();
    service.add_record(owner, 2).unwrap();

    let evolution = service.evolve(owner, 1).unwrap();

    assert!(evolution.already_present);
    assert_eq!(ids(&service, owner), vec![2]);
}

#[rstest]
fn given_final_form_when_evolving_then_cannot_evolve(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();
    service.add_record(owner, 3).unwrap();

    let err = service.evolve(owner, 3).unwrap_err();

    assert_eq!(domain(err), DomainError::CannotEvolve(3));
    assert_eq!(ids(&service, owner), vec![1, 3]);
}

#[rstest]
fn given_missing_id_when_evolving_then_not_found(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let err = service.evolve(owner, 42).unwrap_err();

    assert_eq!(domain(err), DomainError::RecordNotFound(42));
}

#[test]
fn given_last_catalog_entry_marked_evolvable_when_evolving_then_out_of_range() {
    let mut service = PokedexService::with_catalog(Catalog::new(&TINY), Settings::default());
    let owner = service.create_pokedex("Ash", 1).unwrap();
    service.add_record(owner, 3).unwrap();

    let err = service.evolve(owner, 3).unwrap_err();

    assert!(matches!(
        domain(err),
        DomainError::OutOfRange { id: 4, min: 1, max: 3 }
    ));
    assert_eq!(ids(&service, owner), vec![1, 3]);
}

#[rstest]
fn given_two_records_when_fighting_then_higher_score_wins(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();
    service.add_record(owner, 2).unwrap();

    let report = service.fight(owner, 1, 2).unwrap();

    assert!((report.first.score - 127.5).abs() < 1e-9);
    assert!((report.second.score - 165.0).abs() < 1e-9);
    assert_eq!(report.outcome, FightOutcome::Winner("Ivysaur".to_string()));
}

#[rstest]
fn given_same_record_twice_when_fighting_then_tie(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let report = service.fight(owner, 1, 1).unwrap();

    assert_eq!(report.outcome, FightOutcome::Tie);
}

#[rstest]
fn given_unknown_id_when_fighting_then_not_found(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let err = service.fight(owner, 1, 99).unwrap_err();

    assert_eq!(domain(err), DomainError::RecordNotFound(99));
}

#[rstest]
fn given_released_last_record_when_releasing_again_then_empty(mut service: PokedexService) {
    let owner = service.create_pokedex("Ash", 1).unwrap();

    let released = service.release(owner, 1).unwrap();
    assert_eq!(released.name, "Bulbasaur");

    let err = service.release(owner, 1).unwrap_err();
    assert_eq!(domain(err), DomainError::EmptyCollection("Pokedex"));
}

#[rstest]
fn given_two_owners_when_merging_then_second_is_absorbed_and_removed(
    mut service: PokedexService,
) {
    let ash = service.create_pokedex("Ash", 1).unwrap();
    service.add_record(ash, 3).unwrap();
    let misty = service.create_pokedex("Misty", 3).unwrap();
    service.add_record(misty, 1).unwrap();
    service.add_record(misty, 2).unwrap();

    let report = service.merge_pokedexes("Ash", "Misty").unwrap();

    assert_eq!(report.absorbed, 2);
    assert_eq!(report.duplicates, 1);
    assert_eq!(ids(&service, ash), vec![1, 2, 3, 7]);
    assert_eq!(service.registry().count(), 1);
    assert!(service.find_owner("Misty").is_err());
}

#[rstest]
fn given_one_owner_when_merging_then_not_enough_owners(mut service: PokedexService) {
    service.create_pokedex("Ash", 1).unwrap();

    let err = service.merge_pokedexes("Ash", "Ash").unwrap_err();

    assert_eq!(domain(err), DomainError::NotEnoughOwners);
}

#[rstest]
fn given_same_name_twice_when_merging_then_self_merge_rejected(mut service: PokedexService) {
    service.create_pokedex("Ash", 1).unwrap();
    service.create_pokedex("Misty", 2).unwrap();

    let err = service.merge_pokedexes("Misty", "Misty").unwrap_err();

    assert_eq!(domain(err), DomainError::SelfMerge("Misty".to_string()));
    assert_eq!(service.registry().count(), 2);
}

#[rstest]
fn given_deleted_owner_when_using_handle_then_stale(mut service: PokedexService) {
    let ash = service.create_pokedex("Ash", 1).unwrap();
    service.create_pokedex("Misty", 2).unwrap();

    let removed = service.delete_pokedex(ash).unwrap();

    assert_eq!(removed.name(), "Ash");
    assert_eq!(removed.into_pokedex().len(), 1);
    assert_eq!(domain(service.add_record(ash, 5).unwrap_err()), DomainError::StaleOwner);
    assert_eq!(service.owners(), vec![(1, "Misty")]);
}

#[rstest]
fn given_owners_when_sorting_and_walking_then_sorted_cycle_is_printed(
    mut service: PokedexService,
) {
    for name in ["Misty", "Brock", "Ash"] {
        service.create_pokedex(name, 1).unwrap();
    }

    assert_eq!(service.sort_owners(), SortOutcome::Sorted(3));

    let walked = service.walk_owners(Direction::Forward, 4);
    let names: Vec<&str> = walked.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(names, vec!["Ash", "Brock", "Misty", "Ash"]);
}

#[test]
fn given_walk_above_limit_when_walking_then_capped() {
    let settings = Settings {
        max_walk: 2,
        ..Settings::default()
    };
    let mut service = PokedexService::new(settings);
    service.create_pokedex("Ash", 1).unwrap();

    assert_eq!(service.walk_owners(Direction::Backward, 10).len(), 2);
}

#[rstest]
fn given_owners_when_shutting_down_then_registry_is_empty(mut service: PokedexService) {
    service.create_pokedex("Ash", 1).unwrap();
    service.create_pokedex("Misty", 2).unwrap();

    service.shutdown();

    assert!(service.registry().is_empty());
}
