use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::style::{style, Color, Stylize};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, BufRead, Write};
use thousand_rooms::build_info;
use thousand_rooms::core::{handle_input, Game, GameConfig, NarrativeLine, Tone};
use thousand_rooms::logging::{init_tracing, TracingConfig};
use thousand_rooms::ui;

const USAGE: &str = "\
Usage: thousand-rooms [options]

Options:
  --seed N     Play a reproducible dungeon
  --save PATH  Read and write the save file at PATH
  --version    Show version information
  --help       Show this help message";

enum Command {
    Play(GameConfig),
    Version,
    Help,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, String> {
    let mut config = GameConfig::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("--seed needs a number, got '{value}'"))?;
                config = config.with_seed(seed);
            }
            "--save" => {
                let path = args.next().ok_or("--save needs a path")?;
                config = config.with_save_path(path);
            }
            other => return Err(format!("Unknown option: {other}")),
        }
    }
    Ok(Command::Play(config))
}

fn tone_color(tone: Tone) -> Option<Color> {
    match tone {
        Tone::Plain => None,
        Tone::Good => Some(Color::Green),
        Tone::Bad => Some(Color::Red),
        Tone::Loot => Some(Color::Yellow),
        Tone::Danger => Some(Color::DarkRed),
        Tone::Notice => Some(Color::Cyan),
        Tone::Effective => Some(Color::Magenta),
        Tone::Muted => Some(Color::DarkGrey),
    }
}

fn print_narrative(out: &mut impl Write, lines: &[NarrativeLine]) -> io::Result<()> {
    for line in lines {
        match tone_color(line.tone) {
            Some(color) => writeln!(out, "{}", style(&line.text).with(color))?,
            None => writeln!(out, "{}", line.text)?,
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    let config = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Play(config)) => config,
        Ok(Command::Version) => {
            println!("{}", build_info::version_line());
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("Thousand Rooms - a turn-based dungeon crawl\n");
            println!("{USAGE}");
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}\n");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    init_tracing(&TracingConfig::default());

    let mut game = match Game::from_config(config) {
        Ok(game) => game,
        Err(e) => {
            eprintln!("Could not prepare the save location: {e}");
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout();
    let mut input = io::stdin().lock().lines();
    while game.is_running() {
        execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
        writeln!(stdout, "{}\n", ui::render_screen(&game))?;
        print_narrative(&mut stdout, game.narrative.lines())?;
        write!(stdout, "{} > ", ui::options_line(&game))?;
        stdout.flush()?;

        let Some(line) = input.next() else {
            break;
        };
        handle_input(&mut game, &line?);
    }

    print_narrative(&mut stdout, game.narrative.lines())?;
    writeln!(stdout)?;
    Ok(())
}
