//! Shell commands and the session state they act on.

use std::collections::BTreeMap;
use std::time::Duration;

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use pokedex_api::{LocationPage, PokeApiClient};
use pokedex_core::constants::{CATCH_DIFFICULTY, CATCH_MIDPOINT, FIRST_LOCATION_ID, LOCATION_PAGE_SIZE};
use pokedex_core::error::{PokedexError, Result};
use pokedex_core::types::Pokemon;

/// Help entry for a command.
pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec { name: "catch", usage: "catch <pokemon>", description: "Attempt to catch a Pokemon" },
    CommandSpec { name: "exit", usage: "exit", description: "Exit the Pokedex" },
    CommandSpec { name: "explore", usage: "explore <area>", description: "List the Pokemon found in a location area" },
    CommandSpec { name: "help", usage: "help", description: "Displays a help message" },
    CommandSpec { name: "inspect", usage: "inspect <pokemon>", description: "Show details of a caught Pokemon" },
    CommandSpec { name: "map", usage: "map", description: "List the next 20 location areas" },
    CommandSpec { name: "mapb", usage: "mapb", description: "List the previous 20 location areas" },
    CommandSpec { name: "pokedex", usage: "pokedex", description: "List every Pokemon you have caught" },
];

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore(String),
    Catch(String),
    Inspect(String),
    Pokedex,
}

impl Command {
    /// Parses cleaned input words. Blank input is `Ok(None)`.
    pub fn parse(words: &[String]) -> Result<Option<Self>> {
        let Some((name, args)) = words.split_first() else {
            return Ok(None);
        };

        let command = match name.as_str() {
            "help" => Command::Help,
            "exit" => Command::Exit,
            "map" => Command::Map,
            "mapb" => Command::MapBack,
            "pokedex" => Command::Pokedex,
            "explore" => Command::Explore(required_arg(name, args)?),
            "catch" => Command::Catch(required_arg(name, args)?),
            "inspect" => Command::Inspect(required_arg(name, args)?),
            other => {
                return Err(PokedexError::InvalidInput(format!(
                    "unknown command '{other}' (type 'help' for a list)"
                )))
            }
        };
        Ok(Some(command))
    }
}

fn required_arg(name: &str, args: &[String]) -> Result<String> {
    match args.first() {
        Some(arg) => Ok(arg.clone()),
        None => {
            let usage = COMMANDS
                .iter()
                .find(|c| c.name == name)
                .map_or(name, |c| c.usage);
            Err(PokedexError::InvalidInput(format!("usage: {usage}")))
        }
    }
}

/// What the shell does after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Where `map` and `mapb` are in the location list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapCursor {
    /// Start ids of the pages shown so far; the last one is on screen.
    pages: Vec<u32>,
    next: u32,
}

impl Default for MapCursor {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            next: FIRST_LOCATION_ID,
        }
    }
}

impl MapCursor {
    /// Start id of the page after the current one.
    pub fn next_start(&self) -> u32 {
        self.next
    }

    /// Records a page as the one on screen.
    pub fn record(&mut self, page: &LocationPage) {
        self.pages.push(page.start);
        self.next = page.next;
    }

    /// Start id of the page before the current one, or `None` on the first page.
    pub fn back(&mut self) -> Option<u32> {
        if self.pages.len() < 2 {
            return None;
        }
        self.pages.pop();
        self.pages.pop()
    }
}

/// Probability of catching a Pokémon with the given base experience.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let experience = base_experience.map_or(CATCH_MIDPOINT, f64::from);
    1.0 / (1.0 + ((experience - CATCH_MIDPOINT) / CATCH_DIFFICULTY).exp())
}

/// State of one shell session.
pub struct Session {
    client: PokeApiClient,
    cursor: MapCursor,
    caught: BTreeMap<String, Pokemon>,
    rng: StdRng,
}

impl Session {
    pub fn new(client: PokeApiClient) -> Self {
        Self::with_rng(client, StdRng::from_entropy())
    }

    pub fn with_rng(client: PokeApiClient, rng: StdRng) -> Self {
        Self {
            client,
            cursor: MapCursor::default(),
            caught: BTreeMap::new(),
            rng,
        }
    }

    pub fn cursor(&self) -> &MapCursor {
        &self.cursor
    }

    pub fn caught(&self) -> &BTreeMap<String, Pokemon> {
        &self.caught
    }

    /// Stops the client's cache sweepers.
    pub fn close(&self) {
        self.client.close();
    }

    pub async fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "Executing");
        match command {
            Command::Help => self.help(),
            Command::Exit => {
                println!("{}", "Closing the Pokedex... Goodbye!".cyan());
                return Ok(Flow::Exit);
            }
            Command::Map => self.map().await,
            Command::MapBack => self.map_back().await,
            Command::Explore(area) => self.explore(&area).await?,
            Command::Catch(name) => self.catch(&name).await?,
            Command::Inspect(name) => self.inspect(&name),
            Command::Pokedex => self.pokedex(),
        }
        Ok(Flow::Continue)
    }

    fn help(&self) {
        println!("{}", "Welcome to the Pokedex!".cyan().bold());
        println!("Usage:\n");

        let mut commands: Vec<&CommandSpec> = COMMANDS.iter().collect();
        commands.sort_by_key(|c| c.name);
        for c in commands {
            println!("  {:<20} {}", c.usage.yellow(), c.description);
        }
    }

    async fn map(&mut self) {
        let start = self.cursor.next_start();
        self.show_page(start).await;
    }

    async fn map_back(&mut self) {
        match self.cursor.back() {
            Some(start) => self.show_page(start).await,
            None => println!("{}", "You're on the first page".yellow()),
        }
    }

    async fn show_page(&mut self, start: u32) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Fetching locations...");
        spinner.enable_steady_tick(Duration::from_millis(80));

        let page = self.client.location_names(start, LOCATION_PAGE_SIZE).await;
        spinner.finish_and_clear();

        if page.names.is_empty() {
            println!("{}", "No more locations".yellow());
            return;
        }
        for name in &page.names {
            println!("{name}");
        }
        self.cursor.record(&page);
    }

    async fn explore(&self, area: &str) -> Result<()> {
        println!("{} {}...", "Exploring".cyan(), area);
        let pokemon = self.client.pokemon_in_area(area).await?;

        if pokemon.is_empty() {
            println!("{}", "No Pokemon here.".dimmed());
            return Ok(());
        }
        println!("{}", "Found Pokemon:".green());
        for name in pokemon {
            println!(" - {name}");
        }
        Ok(())
    }

    async fn catch(&mut self, name: &str) -> Result<()> {
        let pokemon = match self.client.pokemon(name).await {
            Ok(pokemon) => pokemon,
            Err(e) if e.is_not_found() => {
                println!("{}", "IDK what that is, but it ain't a Pokemon".yellow());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        println!("Throwing a Pokeball at {}...", pokemon.name);
        let chance = catch_chance(pokemon.base_experience);
        if self.rng.gen::<f64>() < chance {
            println!("{} {}", pokemon.name.green().bold(), "was caught!".green());
            println!("{}", "You may now inspect it with the inspect command.".dimmed());
            self.caught.insert(pokemon.name.clone(), pokemon);
        } else {
            println!("{} {}", pokemon.name.red(), "escaped!".red());
        }
        Ok(())
    }

    fn inspect(&self, name: &str) {
        let Some(pokemon) = self.caught.get(name) else {
            println!("{}", "you have not caught that pokemon".yellow());
            return;
        };

        println!("{} {}", "Name:".dimmed(), pokemon.name);
        println!("{} {}", "Height:".dimmed(), pokemon.height);
        println!("{} {}", "Weight:".dimmed(), pokemon.weight);
        println!("{}", "Stats:".dimmed());
        for stat in &pokemon.stats {
            println!("  -{}: {}", stat.stat.name, stat.base_stat);
        }
        println!("{}", "Types:".dimmed());
        for kind in pokemon.type_names() {
            println!("  - {kind}");
        }
    }

    fn pokedex(&self) {
        if self.caught.is_empty() {
            println!("{}", "Your Pokedex is empty. Go catch something!".dimmed());
            return;
        }
        println!("{}", "Your Pokedex:".cyan().bold());
        for name in self.caught.keys() {
            println!(" - {name}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokedex_api::ApiConfig;
    use serde_json::json;
    use test_case::test_case;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn words(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    fn session_for(server: &MockServer) -> Session {
        let client = PokeApiClient::with_config(ApiConfig::new(server.uri())).unwrap();
        Session::with_rng(client, StdRng::seed_from_u64(7))
    }

    /// Serves `/location-area/{id}/` for every id as `area-{id}`.
    async fn mount_all_areas(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path_regex(r"^/location-area/\d+/$"))
            .respond_with(|req: &wiremock::Request| {
                let id: u32 = req
                    .url
                    .path_segments()
                    .and_then(|mut s| s.nth(1))
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(0);
                ResponseTemplate::new(200).set_body_json(json!({ "id": id, "name": format!("area-{id}") }))
            })
            .mount(server)
            .await;
    }

    #[test_case("help", Command::Help ; "help")]
    #[test_case("exit", Command::Exit ; "exit")]
    #[test_case("map", Command::Map ; "map")]
    #[test_case("mapb", Command::MapBack ; "map back")]
    #[test_case("pokedex", Command::Pokedex ; "pokedex")]
    #[test_case("explore pastoria-city-area", Command::Explore("pastoria-city-area".into()) ; "explore")]
    #[test_case("catch pikachu extra", Command::Catch("pikachu".into()) ; "extra args ignored")]
    #[test_case("inspect pikachu", Command::Inspect("pikachu".into()) ; "inspect")]
    fn test_parse(line: &str, expected: Command) {
        assert_eq!(Command::parse(&words(line)).unwrap(), Some(expected));
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(Command::parse(&[]).unwrap(), None);
    }

    #[test]
    fn test_parse_unknown() {
        let err = Command::parse(&words("fly")).unwrap_err();
        assert!(err.to_string().contains("unknown command 'fly'"));
    }

    #[test_case("explore", "usage: explore <area>" ; "explore")]
    #[test_case("catch", "usage: catch <pokemon>" ; "catch")]
    #[test_case("inspect", "usage: inspect <pokemon>" ; "inspect")]
    fn test_parse_missing_argument(line: &str, message: &str) {
        let err = Command::parse(&words(line)).unwrap_err();
        assert!(matches!(err, PokedexError::InvalidInput(ref m) if m == message));
    }

    #[test]
    fn test_commands_sorted() {
        let names: Vec<_> = COMMANDS.iter().map(|c| c.name).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_cursor_paging() {
        let mut cursor = MapCursor::default();
        assert_eq!(cursor.next_start(), FIRST_LOCATION_ID);
        assert_eq!(cursor.back(), None);

        cursor.record(&LocationPage { start: 1, names: vec![], next: 21 });
        assert_eq!(cursor.back(), None);

        cursor.record(&LocationPage { start: 21, names: vec![], next: 45 });
        assert_eq!(cursor.next_start(), 45);
        assert_eq!(cursor.back(), Some(1));
    }

    #[test]
    fn test_catch_chance() {
        let easy = catch_chance(Some(36));
        let even = catch_chance(None);
        let hard = catch_chance(Some(340));

        assert!((even - 0.5).abs() < f64::EPSILON);
        assert!(easy > even && even > hard);
        assert!(hard > 0.0 && easy < 1.0);
    }

    #[tokio::test]
    async fn test_map_then_mapb() {
        let server = MockServer::start().await;
        mount_all_areas(&server).await;
        let mut session = session_for(&server);

        session.execute(Command::MapBack).await.unwrap();
        assert_eq!(session.cursor().next_start(), 1);

        session.execute(Command::Map).await.unwrap();
        assert_eq!(session.cursor().next_start(), 21);

        session.execute(Command::Map).await.unwrap();
        assert_eq!(session.cursor().next_start(), 41);

        session.execute(Command::MapBack).await.unwrap();
        assert_eq!(session.cursor().next_start(), 21);
    }

    #[tokio::test]
    async fn test_catch_then_inspect() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/pokemon/caterpie/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 10,
                "name": "caterpie",
                "base_experience": 39,
                "height": 3,
                "weight": 29,
                "stats": [{ "base_stat": 45, "effort": 1, "stat": { "name": "hp", "url": "" } }],
                "types": [{ "slot": 1, "type": { "name": "bug", "url": "" } }]
            })))
            .expect(1)
            .mount(&server)
            .await;
        let mut session = session_for(&server);

        // Repeated throws hit the cache, not the server.
        for _ in 0..20 {
            session.execute(Command::Catch("caterpie".into())).await.unwrap();
            if !session.caught().is_empty() {
                break;
            }
        }

        assert!(session.caught().contains_key("caterpie"));
        let flow = session.execute(Command::Inspect("caterpie".into())).await.unwrap();
        assert_eq!(flow, Flow::Continue);
    }

    #[tokio::test]
    async fn test_catch_unknown_pokemon_is_not_an_error() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        session.execute(Command::Catch("missingno".into())).await.unwrap();
        assert!(session.caught().is_empty());
    }

    #[tokio::test]
    async fn test_explore_unknown_area_errors() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        let err = session
            .execute(Command::Explore("nowhere".into()))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_exit() {
        let server = MockServer::start().await;
        let mut session = session_for(&server);

        assert_eq!(session.execute(Command::Exit).await.unwrap(), Flow::Exit);
        session.close();
    }
}
