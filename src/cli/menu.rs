//! Interactive text menu
//!
//! Reads from any `BufRead` and writes to any `Write`. Integer prompts repeat until
//! a whole number is entered; end of input leaves the menu.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

use tracing::{debug, instrument};

use crate::application::services::{FightOutcome, PokedexService};
use crate::application::ApplicationError;
use crate::cli::output;
use crate::domain::{Direction, DomainError, OwnerId, SortOutcome, TraversalOrder};

/// Whether the menu keeps running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Unwraps a read, leaving the menu when input is exhausted.
macro_rules! read_or_quit {
    ($read:expr) => {
        match $read? {
            Some(value) => value,
            None => return Ok(Flow::Quit),
        }
    };
}

pub struct Menu<R, W> {
    service: PokedexService,
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Menu<R, W> {
    pub fn new(service: PokedexService, input: R, out: W) -> Self {
        Self {
            service,
            input,
            out,
        }
    }

    pub fn service(&self) -> &PokedexService {
        &self.service
    }

    pub fn into_parts(self) -> (PokedexService, W) {
        (self.service, self.out)
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Next line without surrounding spaces, tabs and line endings; `None` at end of input.
    ///
    /// Bytes that are not UTF-8 are replaced, so such a line reads as invalid input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&buf);
        let trimmed = line.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
        Ok(Some(trimmed.to_string()))
    }

    /// Prompt until a whole number is entered.
    fn read_int(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            output::prompt(&mut self.out, prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say("Invalid input.")?,
            }
        }
    }

    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        output::prompt(&mut self.out, prompt)?;
        self.read_line()
    }

    fn say(&mut self, msg: impl Display) -> io::Result<()> {
        output::info(&mut self.out, &msg)
    }

    fn fail(&mut self, msg: impl Display) -> io::Result<()> {
        output::failure(&mut self.out, &msg)
    }

    fn list_owners(&mut self) -> io::Result<()> {
        let lines: Vec<String> = self
            .service
            .owners()
            .into_iter()
            .map(|(position, name)| format!("{position}. {name}"))
            .collect();
        for line in lines {
            self.say(line)?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Main menu
    // ------------------------------------------------------------------

    /// Run the main menu until "Exit" or end of input, then release all owners.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            output::header(&mut self.out, "\n=== Main Menu ===")?;
            for line in [
                "1. New Pokedex",
                "2. Existing Pokedex",
                "3. Delete a Pokedex",
                "4. Merge Pokedexes",
                "5. Sort Owners by Name",
                "6. Print Owners in a direction X times",
                "7. Exit",
            ] {
                self.say(line)?;
            }

            let Some(choice) = self.read_int("Your choice: ")? else {
                break;
            };
            debug!(choice, "main menu");
            let flow = match choice {
                1 => self.new_pokedex()?,
                2 => self.existing_pokedex()?,
                3 => self.delete_pokedex()?,
                4 => self.merge_pokedexes()?,
                5 => self.sort_owners()?,
                6 => self.print_owners_circular()?,
                7 => {
                    self.say("Goodbye!")?;
                    Flow::Quit
                }
                _ => {
                    self.say("Invalid.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                break;
            }
        }
        self.service.shutdown();
        Ok(())
    }

    fn new_pokedex(&mut self) -> io::Result<Flow> {
        let name = read_or_quit!(self.ask("Your name: "));
        if name.is_empty() {
            self.say("Invalid input.")?;
            return Ok(Flow::Continue);
        }
        if !self.service.settings().allow_duplicate_owner_names
            && self.service.find_owner(&name).is_ok()
        {
            self.say(format!(
                "Owner '{name}' already exists. Not creating a new Pokedex."
            ))?;
            return Ok(Flow::Continue);
        }

        self.say("Choose Starter:")?;
        let starters: Vec<String> = self
            .service
            .catalog()
            .starters()
            .iter()
            .enumerate()
            .map(|(i, record)| format!("{}. {}", i + 1, record.name))
            .collect();
        for line in starters {
            self.say(line)?;
        }
        let choice = read_or_quit!(self.read_int("Your choice: "));
        let choice = u32::try_from(choice).unwrap_or(0);

        match self.service.create_pokedex(&name, choice) {
            Ok(owner) => {
                let starter = self
                    .service
                    .owner(owner)
                    .ok()
                    .and_then(|o| o.pokedex().root().map(|n| n.record().name.to_string()))
                    .unwrap_or_default();
                output::success(
                    &mut self.out,
                    &format!("New Pokedex created for {name} with starter {starter}."),
                )?;
            }
            Err(e) => self.fail(e)?,
        }
        Ok(Flow::Continue)
    }

    fn existing_pokedex(&mut self) -> io::Result<Flow> {
        if self.service.registry().is_empty() {
            self.say("No existing Pokedexes.")?;
            return Ok(Flow::Continue);
        }
        self.list_owners()?;
        let position = read_or_quit!(self.read_int("Choose a Pokedex by number: "));
        let owner = match usize::try_from(position)
            .ok()
            .and_then(|p| self.service.owner_at(p).ok())
        {
            Some(owner) => owner,
            None => {
                self.say("Invalid Pokedex number.")?;
                return Ok(Flow::Continue);
            }
        };
        self.pokedex_menu(owner)
    }

    fn delete_pokedex(&mut self) -> io::Result<Flow> {
        if self.service.registry().is_empty() {
            self.say("No existing Pokedexes to delete.")?;
            return Ok(Flow::Continue);
        }
        output::header(&mut self.out, "\n=== Delete a Pokedex ===")?;
        self.list_owners()?;
        let position = read_or_quit!(self.read_int("Choose a Pokedex to delete by number: "));
        let owner = match usize::try_from(position)
            .ok()
            .and_then(|p| self.service.owner_at(p).ok())
        {
            Some(owner) => owner,
            None => {
                self.say("Invalid owner number.")?;
                return Ok(Flow::Continue);
            }
        };

        match self.service.delete_pokedex(owner) {
            Ok(removed) => {
                self.say(format!("Deleting {}'s entire Pokedex...", removed.name()))?;
                output::success(&mut self.out, "Pokedex deleted.")?;
            }
            Err(e) => self.fail(e)?,
        }
        Ok(Flow::Continue)
    }

    fn merge_pokedexes(&mut self) -> io::Result<Flow> {
        if self.service.registry().count() < 2 {
            self.say("Not enough owners to merge.")?;
            return Ok(Flow::Continue);
        }
        output::header(&mut self.out, "\n=== Merge Pokedexes ===")?;

        let first = read_or_quit!(self.ask("Enter name of first owner: "));
        if self.service.find_owner(&first).is_err() {
            self.say(format!("Owner '{first}' not found."))?;
            return Ok(Flow::Continue);
        }
        let second = read_or_quit!(self.ask("Enter name of second owner: "));
        if self.service.find_owner(&second).is_err() {
            self.say(format!("Owner '{second}' not found."))?;
            return Ok(Flow::Continue);
        }

        self.say(format!("Merging {first} and {second}..."))?;
        match self.service.merge_pokedexes(&first, &second) {
            Ok(report) => {
                debug!(?report, "merge finished");
                output::success(&mut self.out, "Merge completed.")?;
                self.say(format!("Owner '{second}' has been removed after merging."))?;
            }
            Err(e) => self.fail(e)?,
        }
        Ok(Flow::Continue)
    }

    fn sort_owners(&mut self) -> io::Result<Flow> {
        match self.service.sort_owners() {
            SortOutcome::Sorted(_) => self.say("Owners sorted by name.")?,
            SortOutcome::NothingToSort => self.say("0 or 1 owners only => no need to sort.")?,
        }
        Ok(Flow::Continue)
    }

    fn print_owners_circular(&mut self) -> io::Result<Flow> {
        if self.service.registry().is_empty() {
            self.say("No owners.")?;
            return Ok(Flow::Continue);
        }
        let answer = read_or_quit!(self.ask("Enter direction (F or B): "));
        let direction = match answer.chars().next() {
            Some('F' | 'f') => Direction::Forward,
            Some('B' | 'b') => Direction::Backward,
            _ => {
                self.say("Invalid input.")?;
                return Ok(Flow::Continue);
            }
        };
        let count = read_or_quit!(self.read_int("How many prints? "));
        let count = usize::try_from(count).unwrap_or(0);

        for (position, name) in self.service.walk_owners(direction, count) {
            self.say(format!("[{position}] {name}"))?;
        }
        Ok(Flow::Continue)
    }

    // ------------------------------------------------------------------
    // Pokedex menu
    // ------------------------------------------------------------------

    fn owner_name(&self, owner: OwnerId) -> String {
        self.service
            .owner(owner)
            .map(|o| o.name().to_string())
            .unwrap_or_default()
    }

    fn pokedex_menu(&mut self, owner: OwnerId) -> io::Result<Flow> {
        let name = self.owner_name(owner);
        self.say(format!("\nEntering {name}'s Pokedex..."))?;
        loop {
            output::header(&mut self.out, &format!("\n-- {name}'s Pokedex Menu --"))?;
            for line in [
                "1. Add Pokemon",
                "2. Display Pokedex",
                "3. Release Pokemon (by ID)",
                "4. Pokemon Fight!",
                "5. Evolve Pokemon",
                "6. Back to Main",
            ] {
                self.say(line)?;
            }
            let choice = read_or_quit!(self.read_int("Your choice: "));
            let flow = match choice {
                1 => self.add_pokemon(owner)?,
                2 => self.display(owner)?,
                3 => self.release(owner)?,
                4 => self.fight(owner)?,
                5 => self.evolve(owner)?,
                6 => {
                    self.say("Back to Main Menu.")?;
                    return Ok(Flow::Continue);
                }
                _ => {
                    self.say("Invalid choice.")?;
                    Flow::Continue
                }
            };
            if flow == Flow::Quit {
                return Ok(Flow::Quit);
            }
        }
    }

    fn is_empty(&self, owner: OwnerId) -> bool {
        self.service
            .owner(owner)
            .map(|o| o.pokedex().is_empty())
            .unwrap_or(true)
    }

    fn add_pokemon(&mut self, owner: OwnerId) -> io::Result<Flow> {
        let id = read_or_quit!(self.read_int("Enter ID to add: "));
        let Ok(id) = u32::try_from(id) else {
            self.say("Invalid ID.")?;
            return Ok(Flow::Continue);
        };
        match self.service.add_record(owner, id) {
            Ok(record) => output::success(
                &mut self.out,
                &format!("Pokemon {} (ID {}) added.", record.name, record.id),
            )?,
            Err(ApplicationError::Domain(DomainError::OutOfRange { .. })) => {
                self.say("Invalid ID.")?
            }
            Err(ApplicationError::Domain(DomainError::DuplicateRecord(id))) => self.say(format!(
                "Pokemon with ID {id} is already in the Pokedex. No changes made."
            ))?,
            Err(e) => self.fail(e)?,
        }
        Ok(Flow::Continue)
    }

    fn display(&mut self, owner: OwnerId) -> io::Result<Flow> {
        if self.is_empty(owner) {
            self.say("Pokedex is empty.")?;
            return Ok(Flow::Continue);
        }
        self.say("Display:")?;
        for (i, order) in TraversalOrder::ALL.iter().enumerate() {
            self.say(format!("{}. {}", i + 1, order))?;
        }
        self.say(format!("{}. Tree view", TraversalOrder::ALL.len() + 1))?;

        let choice = read_or_quit!(self.read_int("Your choice: "));
        let lines: Vec<String> = match choice {
            1..=5 => {
                let order = TraversalOrder::ALL[(choice - 1) as usize];
                match self.service.records(owner, order) {
                    Ok(records) => records.iter().map(|r| r.to_string()).collect(),
                    Err(e) => vec![e.to_string()],
                }
            }
            6 => match self.service.tree_view(owner) {
                Ok(view) => vec![view.trim_end().to_string()],
                Err(e) => vec![e.to_string()],
            },
            _ => vec!["Invalid choice.".to_string()],
        };
        for line in lines {
            self.say(line)?;
        }
        Ok(Flow::Continue)
    }

    fn release(&mut self, owner: OwnerId) -> io::Result<Flow> {
        if self.is_empty(owner) {
            self.say("No Pokemon to release.")?;
            return Ok(Flow::Continue);
        }
        let id = read_or_quit!(self.read_int("Enter Pokemon ID to release: "));
        let Ok(id) = u32::try_from(id) else {
            self.say(format!("No Pokemon with ID {id} found."))?;
            return Ok(Flow::Continue);
        };
        match self.service.release(owner, id) {
            Ok(removed) => {
                self.say(format!("Removing Pokemon {} (ID {}).", removed.name, removed.id))?
            }
            Err(ApplicationError::Domain(DomainError::RecordNotFound(id))) => {
                self.say(format!("No Pokemon with ID {id} found."))?
            }
            Err(e) => self.fail(e)?,
        }
        Ok(Flow::Continue)
    }

    fn fight(&mut self, owner: OwnerId) -> io::Result<Flow> {
        if self.is_empty(owner) {
            self.say("Pokedex is empty.")?;
            return Ok(Flow::Continue);
        }
        let first = read_or_quit!(self.read_int("Enter ID of the first Pokemon: "));
        let second = read_or_quit!(self.read_int("Enter ID of the second Pokemon: "));
        let report = match (u32::try_from(first), u32::try_from(second)) {
            (Ok(first), Ok(second)) => self.service.fight(owner, first, second).ok(),
            _ => None,
        };
        let Some(report) = report else {
            self.say("One or both Pokemon IDs not found.")?;
            return Ok(Flow::Continue);
        };

        self.say(format!(
            "Pokemon 1: {} (Score = {:.2})",
            report.first.name, report.first.score
        ))?;
        self.say(format!(
            "Pokemon 2: {} (Score = {:.2})",
            report.second.name, report.second.score
        ))?;
        match report.outcome {
            FightOutcome::Tie => self.say("It's a tie!")?,
            FightOutcome::Winner(name) => self.say(format!("{name} wins!"))?,
        }
        Ok(Flow::Continue)
    }

    fn evolve(&mut self, owner: OwnerId) -> io::Result<Flow> {
        if self.is_empty(owner) {
            self.say("Cannot evolve. Pokedex empty.")?;
            return Ok(Flow::Continue);
        }
        let id = read_or_quit!(self.read_int("Enter ID of Pokemon to evolve: "));
        let Ok(id) = u32::try_from(id) else {
            self.say(format!("No Pokemon with ID {id} found."))?;
            return Ok(Flow::Continue);
        };
        match self.service.evolve(owner, id) {
            Ok(evolution) => output::success(
                &mut self.out,
                &format!(
                    "Pokemon evolved from {} (ID {}) to {} (ID {}).",
                    evolution.from.name, evolution.from.id, evolution.to.name, evolution.to.id
                ),
            )?,
            Err(e) => self.fail(format!("{e}."))?,
        }
        Ok(Flow::Continue)
    }
}
