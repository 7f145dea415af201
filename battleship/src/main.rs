// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use armada::{
    weapons::{self, SimpleTorpedo},
    Coordinate, Exploder, GameDefaults, GameId, GameState, GameSummary, Lobby, Orientation, Ship,
    ShipClass, ShotOutcome,
};
use clap::{App, Arg, ArgMatches};
use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Captures, Regex};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> io::Result<()> {
    let matches = App::new("Battleship")
        .version("1.0")
        .author("Zachary Stewart <zachary@zstewart.com>")
        .about("Hot-seat battleship lobby for any number of players.")
        .arg(
            Arg::with_name("loglevel")
                .short("l")
                .long("loglevel")
                .value_name("LEVEL")
                .help("log verbosity: 0 = errors, 1 = warnings, 2 = info, 3 = debug")
                .takes_value(true)
                .possible_values(&["0", "1", "2", "3"])
                .default_value("1"),
        )
        .arg(number_arg("width", "default board width"))
        .arg(number_arg("height", "default board height"))
        .arg(number_arg("max-ships", "default number of ships per board"))
        .arg(number_arg("max-players", "default number of players per game"))
        .get_matches();

    init_logging(&matches);
    let lobby = Lobby::new(game_defaults(&matches));
    info!(defaults = ?lobby.defaults(), "lobby ready");

    let stdin = std::io::stdin();
    let mut input = InputReader::new(stdin.lock());
    let mut rng = rand::thread_rng();

    println!("Battleship lobby. Type help or ? for commands.");
    loop {
        println!();
        let cmd = input.read_input(">", parse_command)?;
        match execute(&lobby, &mut rng, cmd) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) => println!("{} error: {}", err.kind(), err),
        }
    }
    Ok(())
}

/// Optional numeric flag overriding one of the game defaults.
fn number_arg(name: &'static str, help: &'static str) -> Arg<'static, 'static> {
    Arg::with_name(name)
        .long(name)
        .value_name("N")
        .help(help)
        .takes_value(true)
        .validator(|value| {
            value
                .parse::<usize>()
                .map(|_| ())
                .map_err(|_| format!("expected a positive number, got {:?}", value))
        })
}

/// Install a stderr log subscriber. `RUST_LOG` takes precedence over `--loglevel`.
fn init_logging(matches: &ArgMatches) {
    let level = match matches.value_of("loglevel") {
        Some("0") => "error",
        Some("2") => "info",
        Some("3") => "debug",
        _ => "warn",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .init();
}

fn game_defaults(matches: &ArgMatches) -> GameDefaults {
    let value = |name: &str, default: usize| {
        matches
            .value_of(name)
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    };
    let defaults = GameDefaults::default();
    GameDefaults {
        board_width: value("width", defaults.board_width),
        board_height: value("height", defaults.board_height),
        max_ships: value("max-ships", defaults.max_ships),
        max_participants: value("max-players", defaults.max_participants),
        ..defaults
    }
}

/// What to do after a command ran.
enum Flow {
    Continue,
    Quit,
}

enum Command {
    Register(String),
    Players(i64),
    DeletePlayer(String),
    Create {
        width: Option<usize>,
        height: Option<usize>,
        max_ships: Option<usize>,
        max_players: usize,
        players: Vec<String>,
        description: String,
    },
    Games(Option<GameState>),
    /// A command on the game whose id starts with the given prefix.
    Game(String, GameCommand),
    Help,
    Quit,
}

enum GameCommand {
    Join(String),
    Leave(String),
    Deploy {
        player: String,
        class: ShipClass,
        stern: Coordinate,
        orientation: Orientation,
    },
    Randomize(String),
    Transition(GameState),
    Fire {
        attacker: String,
        target: String,
        coord: Coordinate,
        weapon: Box<dyn Exploder>,
    },
    Show(Option<String>),
    Delete,
}

/// Parse one line of input. Prints the reason and returns `None` for invalid input.
fn parse_command(input: &str) -> Option<Command> {
    static REGISTER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^register\s+(?P<name>\S+)$").unwrap());
    static PLAYERS: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^(?:players|rank)(?:\s+(?P<n>-?[0-9]+))?$").unwrap());
    static DELETE_PLAYER: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^delete-player\s+(?P<name>\S+)$").unwrap());
    static CREATE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)create
        (?:\s+(?P<width>[0-9]+)x(?P<height>[0-9]+))?
        (?:\s+ships=(?P<ships>[0-9]+))?
        (?:\s+max=(?P<max>[0-9]+))?
        (?:\s+with\s+(?P<players>[\w,-]+))?
        (?:\s+(?P<desc>.+))?$",
        )
        .unwrap()
    });
    static GAMES: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^games(?:\s+(?P<state>.+))?$").unwrap());
    static MEMBERSHIP: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<cmd>join|leave|randomize)\s+(?P<game>[0-9a-f-]+)\s+(?P<name>\S+)$")
            .unwrap()
    });
    static DEPLOY: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)deploy\s+
        (?P<game>[0-9a-f-]+)\s+
        (?P<name>\S+)\s+
        (?P<class>\w+)\s+
        (?:(?:at|on)\s+)?
        (?P<x>-?[0-9]+)(?:\s*,\s*|\s+)(?P<y>-?[0-9]+)\s+
        (?P<dir>\w+)$",
        )
        .unwrap()
    });
    static TRANSITION: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^(?P<cmd>begin|start|abort)\s+(?P<game>[0-9a-f-]+)$").unwrap()
    });
    static FIRE: Lazy<Regex> = Lazy::new(|| {
        Regex::new(
            r"^(?x)fire\s+
        (?P<game>[0-9a-f-]+)\s+
        (?P<attacker>\S+)\s+
        (?:at\s+)?
        (?P<target>\S+)\s+
        (?P<x>-?[0-9]+)(?:\s*,\s*|\s+)(?P<y>-?[0-9]+)
        (?:\s+(?:with\s+)?(?P<weapon>\w+))?$",
        )
        .unwrap()
    });
    static SHOW: Lazy<Regex> = Lazy::new(|| {
        Regex::new(r"^show\s+(?P<game>[0-9a-f-]+)(?:\s+(?P<name>\S+))?$").unwrap()
    });
    static DELETE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^delete\s+(?P<game>[0-9a-f-]+)$").unwrap());

    let text = |caps: &Captures, name: &str| caps.name(name).map_or("", |m| m.as_str()).to_owned();

    match input {
        "" => None,
        "?" | "help" | "h" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        other => {
            if let Some(caps) = REGISTER.captures(other) {
                Some(Command::Register(text(&caps, "name")))
            } else if let Some(caps) = PLAYERS.captures(other) {
                match caps.name("n") {
                    None => Some(Command::Players(10)),
                    Some(_) => parse_capture(&caps, "n").map(Command::Players),
                }
            } else if let Some(caps) = DELETE_PLAYER.captures(other) {
                Some(Command::DeletePlayer(text(&caps, "name")))
            } else if let Some(caps) = CREATE.captures(other) {
                let number = |name: &str| match caps.name(name) {
                    None => Some(None),
                    Some(_) => parse_capture(&caps, name).map(Some),
                };
                Some(Command::Create {
                    width: number("width")?,
                    height: number("height")?,
                    max_ships: number("ships")?,
                    max_players: number("max")?.unwrap_or(0),
                    players: caps
                        .name("players")
                        .map(|m| {
                            m.as_str()
                                .split(',')
                                .filter(|name| !name.is_empty())
                                .map(str::to_owned)
                                .collect()
                        })
                        .unwrap_or_default(),
                    description: text(&caps, "desc"),
                })
            } else if let Some(caps) = GAMES.captures(other) {
                match caps.name("state") {
                    None => Some(Command::Games(None)),
                    Some(_) => parse_capture(&caps, "state").map(|s| Command::Games(Some(s))),
                }
            } else if let Some(caps) = MEMBERSHIP.captures(other) {
                let name = text(&caps, "name");
                let cmd = match &caps["cmd"] {
                    "join" => GameCommand::Join(name),
                    "leave" => GameCommand::Leave(name),
                    _ => GameCommand::Randomize(name),
                };
                Some(Command::Game(text(&caps, "game"), cmd))
            } else if let Some(caps) = DEPLOY.captures(other) {
                let cmd = GameCommand::Deploy {
                    player: text(&caps, "name"),
                    class: parse_capture(&caps, "class")?,
                    stern: Coordinate::new(parse_capture(&caps, "x")?, parse_capture(&caps, "y")?),
                    orientation: parse_capture(&caps, "dir")?,
                };
                Some(Command::Game(text(&caps, "game"), cmd))
            } else if let Some(caps) = TRANSITION.captures(other) {
                let to = match &caps["cmd"] {
                    "begin" => GameState::DeployingShips,
                    "start" => GameState::Running,
                    _ => GameState::Aborted,
                };
                Some(Command::Game(
                    text(&caps, "game"),
                    GameCommand::Transition(to),
                ))
            } else if let Some(caps) = FIRE.captures(other) {
                let weapon: Box<dyn Exploder> = match caps.name("weapon") {
                    None => Box::new(SimpleTorpedo),
                    Some(name) => match weapons::by_name(name.as_str()) {
                        Some(weapon) => weapon,
                        None => {
                            println!(
                                "unknown weapon {:?}, choose \"torpedo\" or \"mine\"",
                                name.as_str()
                            );
                            return None;
                        }
                    },
                };
                let cmd = GameCommand::Fire {
                    attacker: text(&caps, "attacker"),
                    target: text(&caps, "target"),
                    coord: Coordinate::new(parse_capture(&caps, "x")?, parse_capture(&caps, "y")?),
                    weapon,
                };
                Some(Command::Game(text(&caps, "game"), cmd))
            } else if let Some(caps) = SHOW.captures(other) {
                let name = caps.name("name").map(|m| m.as_str().to_owned());
                Some(Command::Game(text(&caps, "game"), GameCommand::Show(name)))
            } else if let Some(caps) = DELETE.captures(other) {
                Some(Command::Game(text(&caps, "game"), GameCommand::Delete))
            } else {
                println!("Invalid command \"{}\". Use '?' for help", other);
                None
            }
        }
    }
}

/// Parse a named capture, printing the parse error on failure.
fn parse_capture<T>(caps: &Captures, name: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = caps.name(name).map_or("", |m| m.as_str());
    match raw.parse() {
        Ok(value) => Some(value),
        Err(err) => {
            println!("invalid {} {:?}: {}", name, raw, err);
            None
        }
    }
}

fn execute(lobby: &Lobby, rng: &mut impl Rng, cmd: Command) -> armada::Result<Flow> {
    match cmd {
        Command::Register(name) => {
            let player = lobby.register_player(&name, "")?;
            println!("Registered {} ({})", player.name(), player.id());
        }
        Command::Players(n) => {
            for (i, player) in lobby.rank(n)?.iter().enumerate() {
                println!("{:>3}. {}", i + 1, player);
            }
        }
        Command::DeletePlayer(name) => {
            let player = lobby.delete_player(&name)?;
            println!("Deleted {}", player);
        }
        Command::Create {
            width,
            height,
            max_ships,
            max_players,
            players,
            description,
        } => {
            let names: Vec<&str> = players.iter().map(String::as_str).collect();
            let summary = lobby.create_game(
                width,
                height,
                max_ships,
                &description,
                max_players,
                &names,
            )?;
            print_summary(&summary);
        }
        Command::Games(state) => {
            let games = lobby.games(state);
            if games.is_empty() {
                println!("No games.");
            }
            for summary in &games {
                print_summary(summary);
            }
        }
        Command::Game(prefix, cmd) => {
            if let Some(id) = resolve_game(lobby, &prefix) {
                return execute_game(lobby, rng, id, cmd);
            }
        }
        Command::Help => print_help(),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn execute_game(
    lobby: &Lobby,
    rng: &mut impl Rng,
    id: GameId,
    cmd: GameCommand,
) -> armada::Result<Flow> {
    match cmd {
        GameCommand::Join(name) => lobby.join_game(id, &name)?,
        GameCommand::Leave(name) => lobby.leave_game(id, &name)?,
        GameCommand::Deploy {
            player,
            class,
            stern,
            orientation,
        } => {
            lobby.deploy_ship(id, &player, Ship::new(class, stern, orientation)?)?;
            print_board(lobby, id, &player)?;
        }
        GameCommand::Randomize(player) => {
            {
                let shared = lobby.shared_game(id)?;
                let mut game = shared.lock();
                let max = game.parameters().max_ships;
                loop {
                    let deployed = game.board(&player)?.ships().len();
                    if deployed >= max {
                        break;
                    }
                    let class = ShipClass::ALL[deployed % ShipClass::ALL.len()];
                    match game.board(&player)?.random_ship(class, &mut *rng) {
                        Some(ship) => game.deploy_ship(&player, ship)?,
                        None => {
                            println!("No room left for a {}.", class);
                            break;
                        }
                    }
                }
            }
            print_board(lobby, id, &player)?;
        }
        GameCommand::Transition(to) => lobby.transition(id, to)?,
        GameCommand::Fire {
            attacker,
            target,
            coord,
            weapon,
        } => {
            let outcomes = lobby.fire(id, &attacker, &target, weapon.as_ref(), coord)?;
            for outcome in outcomes {
                match outcome {
                    ShotOutcome::Miss(coord) => println!("{} missed at {}.", attacker, coord),
                    ShotOutcome::Hit(class) => println!("{} hit a {}!", attacker, class),
                    ShotOutcome::Sunk(class) => println!("{} sunk a {}!", attacker, class),
                    ShotOutcome::Defeated(class) => {
                        println!("{} sunk {}'s last ship, a {}!", attacker, target, class)
                    }
                }
            }
            let summary = lobby.game(id)?;
            match (&summary.winner, &summary.turn) {
                (Some(winner), _) => println!("{} wins the game!", winner),
                (None, Some(next)) => println!("{} fires next.", next),
                (None, None) => {}
            }
        }
        GameCommand::Show(Some(player)) => print_board(lobby, id, &player)?,
        GameCommand::Show(None) => print_summary(&lobby.game(id)?),
        GameCommand::Delete => {
            lobby.delete_game(id)?;
            println!("Deleted game {}.", id);
        }
    }
    Ok(Flow::Continue)
}

/// Find the single game whose id starts with `prefix`.
fn resolve_game(lobby: &Lobby, prefix: &str) -> Option<GameId> {
    if let Ok(id) = prefix.parse() {
        return Some(id);
    }
    let matching: Vec<_> = lobby
        .games(None)
        .into_iter()
        .map(|summary| summary.id)
        .filter(|id| id.to_string().starts_with(prefix))
        .collect();
    match matching.as_slice() {
        [id] => Some(*id),
        [] => {
            println!("No game id starts with {:?}.", prefix);
            None
        }
        _ => {
            println!("{:?} matches {} games, type more of the id.", prefix, matching.len());
            None
        }
    }
}

fn print_summary(summary: &GameSummary) {
    let id = summary.id.to_string();
    let (width, height) = summary.parameters.dimensions();
    println!(
        "{}  {:<16} {}x{}, {} ships, {}/{} players: {}  [{}]",
        &id[..8],
        summary.state,
        width,
        height,
        summary.parameters.max_ships,
        summary.participants.len(),
        summary.max_participants,
        summary.participants.join(", "),
        summary.description,
    );
    if let Some(winner) = &summary.winner {
        println!("          won by {}", winner);
    } else if let Some(turn) = &summary.turn {
        println!("          {} to fire", turn);
    }
}

/// Print a participant's board with row and column numbers.
fn print_board(lobby: &Lobby, id: GameId, player: &str) -> armada::Result<()> {
    let rendered = lobby.render_board(id, player)?;
    let rows: Vec<_> = rendered.lines().collect();
    let width = rows.first().map_or(0, |row| row.len() / 2);
    print!("    ");
    for x in 0..width {
        print!("{} ", x % 10);
    }
    println!();
    for (i, row) in rows.iter().enumerate() {
        println!("{:>3} {}", rows.len() - 1 - i, row);
    }
    Ok(())
}

fn print_help() {
    println!(
        "Available Commands:
    register <name>                         register a new player.
    players [n]                             show the top n players, or the bottom n if negative.
    delete-player <name>                    delete a player that is not in an active game.
    create [<w>x<h>] [ships=<n>] [max=<n>] [with <a>,<b>,...] [description]
                                            create a game, optionally seating players.
    games [state]                           list games, optionally only those in a state.
    join <game> <name>                      seat a player in an open game.
    leave <game> <name>                     remove a player from a game.
    begin <game>                            close the game and start deploying ships.
    deploy <game> <name> <class> <x>,<y> <dir>
                                            deploy a ship with its stern at x,y heading dir.
        Possible directions are \"n\", \"e\", \"s\", and \"w\".
    randomize <game> <name>                 fill the player's fleet with random ships.
    start <game>                            start firing once everyone has deployed.
    fire <game> <attacker> <target> <x>,<y> [weapon]
                                            fire a \"torpedo\" (default) or a \"mine\".
    show <game> [name]                      show a game, or a player's board.
    abort <game>                            abort a game that has not ended.
    delete <game>                           delete a game.
    quit                                    leave.

Games may be referred to by a unique prefix of their id.
Game states: {}.
Ship classes: {}.",
        GameState::ALL
            .iter()
            .map(|state| format!("\"{}\"", state))
            .collect::<Vec<_>>()
            .join(", "),
        ShipClass::ALL
            .iter()
            .map(|class| format!("{} ({})", class, class.len()))
            .collect::<Vec<_>>()
            .join(", "),
    );
}

/// Helper to read input from the player.
struct InputReader<B> {
    read: B,
    buf: String,
}

impl<B> InputReader<B> {
    fn new(read: B) -> Self {
        Self {
            read,
            buf: String::new(),
        }
    }
}

impl<B: BufRead> InputReader<B> {
    /// Repeatedly tries to read input until the input checker returns `Some`.
    fn read_input<F, T>(&mut self, prompt: &str, mut checker: F) -> io::Result<T>
    where
        F: FnMut(&str) -> Option<T>,
    {
        loop {
            self.read_input_inner(prompt)?;
            if let Some(val) = checker(self.buf.trim()) {
                return Ok(val);
            }
        }
    }

    /// Helper to print the prompt, clear the string buffer and read a line.
    fn read_input_inner(&mut self, prompt: &str) -> io::Result<()> {
        print!("{} ", prompt);
        io::stdout().flush()?;
        self.buf.clear();
        if self.read.read_line(&mut self.buf)? == 0 {
            println!();
            std::process::exit(0);
        }
        Ok(())
    }
}
