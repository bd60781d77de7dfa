use tokio::io::{AsyncBufReadExt, BufReader};

use gastroguru::notify::{ConsoleNotifier, LogNotifier, Notifier};
use gastroguru::session::{handle_session_event, CookingSession, SessionOptions, StepDirection};
use gastroguru::timer::{format_clock, TimerToggle};
use gastroguru::{Config, RecipeCatalog};

use super::CliResult;
use crate::clipboard;

const HELP: &str = "\
Commands:
  timer N     start or cancel the timer on step N
  read N      read step N aloud (again to stop)
  stop        stop reading
  check N     tick ingredient N off or back on
  next, prev  move between steps
  step N      jump to step N
  scale M     set the serving multiplier (e.g. 0.5, 2)
  bookmark    save or unsave this recipe
  like        like or unlike this recipe
  copy        copy the ingredient list to the clipboard
  share       print a link to this recipe
  status      show ingredients, current step and running timers
  help        show this list
  quit        leave the kitchen";

/// One line typed during a cooking session. Step and ingredient numbers
/// are 1-based as the user sees them.
#[derive(Debug, Clone, PartialEq)]
pub enum CookCommand {
    Timer(usize),
    Read(usize),
    Stop,
    Check(usize),
    Step(usize),
    Next,
    Prev,
    Scale(f64),
    Bookmark,
    Like,
    Copy,
    Share,
    Status,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<CookCommand, String> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err("Type a command, or 'help'".into());
    };
    let arg = words.next();

    let number = |arg: Option<&str>| -> Result<usize, String> {
        let raw = arg.ok_or_else(|| format!("'{verb}' needs a number"))?;
        match raw.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(format!("Not a valid number: {raw}")),
        }
    };

    let command = match verb.to_lowercase().as_str() {
        "timer" | "t" => CookCommand::Timer(number(arg)?),
        "read" | "r" => CookCommand::Read(number(arg)?),
        "stop" => CookCommand::Stop,
        "check" | "c" => CookCommand::Check(number(arg)?),
        "step" | "s" => CookCommand::Step(number(arg)?),
        "next" | "n" => CookCommand::Next,
        "prev" | "p" => CookCommand::Prev,
        "scale" | "x" => {
            let raw = arg.ok_or("'scale' needs a multiplier")?;
            match raw.parse::<f64>() {
                Ok(m) if m > 0.0 && m.is_finite() => CookCommand::Scale(m),
                _ => return Err(format!("Not a valid multiplier: {raw}")),
            }
        }
        "bookmark" => CookCommand::Bookmark,
        "like" => CookCommand::Like,
        "copy" => CookCommand::Copy,
        "share" => CookCommand::Share,
        "status" | "ls" => CookCommand::Status,
        "help" | "?" => CookCommand::Help,
        "quit" | "q" | "exit" => CookCommand::Quit,
        other => return Err(format!("Unknown command: {other}")),
    };
    Ok(command)
}

pub async fn cook(catalog: &RecipeCatalog, config: &Config, id: &str, quiet: bool) -> CliResult {
    let recipe = catalog
        .get(id)
        .ok_or_else(|| format!("Recipe not found: {id}"))?
        .clone();

    let options = SessionOptions::from_config(config);
    let notifier: Box<dyn Notifier> = if quiet {
        Box::new(LogNotifier)
    } else {
        Box::new(ConsoleNotifier)
    };
    let (mut session, events) = CookingSession::open(recipe, notifier, options);

    println!("Cooking: {}", session.recipe().title);
    if !session.can_read_aloud() {
        println!("(no speech synthesiser found, read-aloud is off)");
    }
    println!("Type 'help' for commands.");
    print_status(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(CookCommand::Quit) => break,
                    Ok(command) => apply(&mut session, command),
                    Err(e) => println!("{e}"),
                }
            }
            Ok(event) = events.recv() => {
                handle_session_event(&mut session, event);
            }
        }
    }

    session.close();
    log::info!("Left the kitchen");
    Ok(())
}

fn apply(session: &mut CookingSession, command: CookCommand) {
    match command {
        CookCommand::Timer(n) => {
            let Some(step) = session.recipe().steps.get(n - 1) else {
                println!("There is no step {n}");
                return;
            };
            let step_id = step.id.clone();
            match session.toggle_step_timer(&step_id) {
                TimerToggle::Started => {
                    let left = session.timers().remaining(&step_id).unwrap_or_default();
                    println!("Timer for step {n} started ({})", format_clock(left));
                }
                TimerToggle::Cancelled => println!("Timer for step {n} cancelled"),
                TimerToggle::NoTimer => println!("Step {n} has no timer"),
                TimerToggle::UnknownStep => println!("There is no step {n}"),
            }
        }
        CookCommand::Read(n) => {
            if !session.can_read_aloud() {
                println!("Read-aloud is not available");
            } else if n > session.recipe().steps.len() {
                println!("There is no step {n}");
            } else if session.read_step_aloud(n - 1) {
                println!("Reading step {n}");
            } else {
                println!("Stopped reading");
            }
        }
        CookCommand::Stop => session.stop_reading(),
        CookCommand::Check(n) => {
            let Some(ingredient) = session.recipe().ingredients.get(n - 1) else {
                println!("There is no ingredient {n}");
                return;
            };
            let (id, name) = (ingredient.id.clone(), ingredient.name.clone());
            let mark = if session.toggle_ingredient(&id) { "x" } else { " " };
            println!("[{mark}] {name}");
        }
        CookCommand::Step(n) => {
            if session.set_active_step(n - 1) {
                print_step(session);
            } else {
                println!("There is no step {n}");
            }
        }
        CookCommand::Next => {
            session.navigate(StepDirection::Next);
            print_step(session);
        }
        CookCommand::Prev => {
            session.navigate(StepDirection::Prev);
            print_step(session);
        }
        CookCommand::Scale(m) => {
            session.set_serving_multiplier(m);
            println!("Now serving {}", session.servings());
        }
        CookCommand::Bookmark => {
            session.toggle_bookmark();
        }
        CookCommand::Like => {
            session.toggle_like();
        }
        CookCommand::Copy => match clipboard::copy_to_clipboard(&session.ingredients_text()) {
            Ok(tool) => {
                log::debug!("Copied ingredients with {tool}");
                println!("Ingredients copied to clipboard");
            }
            Err(e) => {
                log::warn!("Clipboard copy failed: {e}");
                println!("{}", session.ingredients_text());
            }
        },
        CookCommand::Share => println!("{}", session.share_link()),
        CookCommand::Status => print_status(session),
        CookCommand::Help => println!("{HELP}"),
        CookCommand::Quit => {}
    }
}

fn print_step(session: &CookingSession) {
    let Some(index) = session.active_step() else {
        return;
    };
    let step = &session.recipe().steps[index];
    let timer = step
        .timer_minutes
        .map(|_| match session.timers().remaining(&step.id) {
            Some(left) => format!("  [running {}]", format_clock(left)),
            None => "  [timer available]".to_string(),
        })
        .unwrap_or_default();
    println!("Step {}: {}{timer}", index + 1, step.description);
}

fn print_status(session: &CookingSession) {
    println!("\nServes {}", session.servings());
    for (i, ing) in session.scaled_ingredients().iter().enumerate() {
        let mark = if ing.checked { "x" } else { " " };
        println!("  {:>2}. [{mark}] {} {} {}", i + 1, ing.quantity, ing.unit, ing.name);
    }
    for (i, step) in session.recipe().steps.iter().enumerate() {
        if let Some(left) = session.timers().remaining(&step.id) {
            println!("  Step {} timer: {}", i + 1, format_clock(left));
        }
    }
    if session.active_step().is_some() {
        print_step(session);
    }
    println!();
}
