//! Scripted sessions against the interactive menu

use std::io::Cursor;

use rstest::rstest;

use pokedex::application::services::PokedexService;
use pokedex::cli::Menu;
use pokedex::config::Settings;
use pokedex::util::testing;

fn session(lines: &[&str]) -> String {
    let mut script = lines.join("\n");
    script.push('\n');
    session_bytes(script.into_bytes())
}

fn session_bytes(script: Vec<u8>) -> String {
    testing::init_test_setup();
    colored::control::set_override(false);

    let service = PokedexService::new(Settings::default());
    let mut menu = Menu::new(service, Cursor::new(script), Vec::new());
    menu.run().unwrap();

    let (service, out) = menu.into_parts();
    assert!(service.registry().is_empty(), "owners released on exit");
    String::from_utf8(out).unwrap()
}

#[test]
fn given_new_owner_when_adding_and_evolving_then_messages_reflect_pokedex() {
    let out = session(&[
        "1", "Ash", "1", // new pokedex with Bulbasaur
        "2", "1", // enter Ash's pokedex
        "1", "4", // add Charmander
        "2", "3", // display in-order
        "5", "1", // evolve Bulbasaur
        "2", "1", // display level-order
        "6", "7",
    ]);

    assert!(out.contains("New Pokedex created for Ash with starter Bulbasaur."));
    assert!(out.contains("Entering Ash's Pokedex..."));
    assert!(out.contains("Pokemon Charmander (ID 4) added."));
    assert!(out.contains("ID: 1, Name: Bulbasaur, Type: GRASS, HP: 45, Attack: 49, Can Evolve: Yes"));
    assert!(out.contains("Pokemon evolved from Bulbasaur (ID 1) to Ivysaur (ID 2)."));
    assert!(out.contains("ID: 2, Name: Ivysaur"));
    assert!(out.contains("Back to Main Menu."));
    assert!(out.contains("Goodbye!"));
}

#[rstest]
#[case(&["abc", "", "7"], 2)]
#[case(&["4.5", "7"], 1)]
#[case(&["7"], 0)]
fn given_non_numeric_input_when_choosing_then_prompt_repeats(
    #[case] lines: &[&str],
    #[case] invalid: usize,
) {
    let out = session(lines);

    assert_eq!(out.matches("Invalid input.").count(), invalid);
    assert!(out.contains("Goodbye!"));
}

#[test]
fn given_end_of_input_mid_prompt_when_running_then_exits_cleanly() {
    let out = session(&["1", "Ash"]);

    assert!(out.contains("Choose Starter:"));
    assert!(!out.contains("Goodbye!"));
}

#[test]
fn given_duplicate_owner_when_creating_then_refused() {
    let out = session(&["1", "Ash", "1", "1", "Ash", "7"]);

    assert!(out.contains("Owner 'Ash' already exists. Not creating a new Pokedex."));
}

#[test]
fn given_owners_when_sorting_and_printing_then_cycle_wraps() {
    let out = session(&[
        "1", "Misty", "3",
        "1", "Ash", "1",
        "5",
        "6", "F", "3",
        "6", "b", "2",
        "7",
    ]);

    assert!(out.contains("Owners sorted by name."));
    assert!(out.contains("[1] Ash\n[2] Misty\n[3] Ash\n"));
    assert!(out.contains("[1] Ash\n[2] Misty\n"));
}

#[test]
fn given_single_owner_when_sorting_then_nothing_to_sort() {
    let out = session(&["1", "Ash", "1", "5", "7"]);

    assert!(out.contains("0 or 1 owners only => no need to sort."));
}

#[test]
fn given_two_owners_when_merging_then_second_is_gone() {
    let out = session(&[
        "1", "Ash", "1",
        "1", "Misty", "3",
        "4", "Ash", "Misty",
        "2", "1", "2", "3", "6",
        "7",
    ]);

    assert!(out.contains("Merging Ash and Misty..."));
    assert!(out.contains("Merge completed."));
    assert!(out.contains("Owner 'Misty' has been removed after merging."));
    assert!(out.contains("ID: 7, Name: Squirtle"));
}

#[test]
fn given_one_owner_when_merging_then_not_enough_owners() {
    let out = session(&["1", "Ash", "1", "4", "7"]);

    assert!(out.contains("Not enough owners to merge."));
}

#[test]
fn given_two_records_when_fighting_then_scores_and_winner_printed() {
    let out = session(&["1", "Ash", "1", "2", "1", "1", "2", "4", "1", "2", "6", "7"]);

    assert!(out.contains("Pokemon 1: Bulbasaur (Score = 127.50)"));
    assert!(out.contains("Pokemon 2: Ivysaur (Score = 165.00)"));
    assert!(out.contains("Ivysaur wins!"));
}

#[test]
fn given_owner_when_deleting_then_no_pokedexes_remain() {
    let out = session(&["1", "Ash", "1", "3", "1", "2", "7"]);

    assert!(out.contains("Deleting Ash's entire Pokedex..."));
    assert!(out.contains("Pokedex deleted."));
    assert!(out.contains("No existing Pokedexes."));
}

#[test]
fn given_last_record_released_when_releasing_again_then_nothing_to_release() {
    let out = session(&["1", "Ash", "3", "2", "1", "3", "7", "3", "6", "7"]);

    assert!(out.contains("Removing Pokemon Squirtle (ID 7)."));
    assert!(out.contains("No Pokemon to release."));
}

#[test]
fn given_records_when_choosing_tree_view_then_children_are_tagged() {
    let out = session(&["1", "Ash", "1", "2", "1", "1", "4", "2", "6", "6", "7"]);

    assert!(out.contains("#1 Bulbasaur"));
    assert!(out.contains("R #4 Charmander"));
}

#[test]
fn given_non_utf8_line_when_choosing_then_prompt_repeats() {
    let out = session_bytes(b"\xff\xfe\n7\n".to_vec());

    assert_eq!(out.matches("Invalid input.").count(), 1);
    assert!(out.contains("Goodbye!"));
}

#[test]
fn given_absent_id_when_releasing_then_not_found_and_record_kept() {
    let out = session(&["1", "Ash", "1", "2", "1", "3", "99", "2", "3", "6", "7"]);

    assert!(out.contains("No Pokemon with ID 99 found."));
    assert!(out.contains("ID: 1, Name: Bulbasaur"));
}
