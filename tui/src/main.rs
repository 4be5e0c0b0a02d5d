mod bell;
mod harness;

use std::fs;
use std::path::PathBuf;

use argh::FromArgs;
use ariadne::{Label, Report, ReportKind, Source};
use eyre::eyre;
use harness::GameHarness;
use river_crossing::{
  highscore::JsonFileStore,
  session::{CrossingOutcome, Session, Status},
  solver, Bank, Entity, Location, Position, Step,
};

fn main() -> eyre::Result<()> {
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("warn"),
  )
  .init();

  let args: ArgsEntrypoint = argh::from_env();

  match args.sub {
    Subcommands::Play(play) => play.run()?,
    Subcommands::Check(check) => check.run()?,
    Subcommands::Replay(replay) => replay.run()?,
    Subcommands::Solve(solve) => solve.run()?,
  }

  Ok(())
}

#[derive(FromArgs, Debug)]
/// Ferry the farmer, the wolf, the sheep and the cabbage across the river,
/// twenty times in a row.
struct ArgsEntrypoint {
  #[argh(subcommand)]
  sub: Subcommands,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Subcommands {
  Play(CmdPlay),
  Check(CmdCheck),
  Replay(CmdReplay),
  Solve(CmdSolve),
}

/// Play a game in the terminal.
///
/// Controls:
/// - F, S, W, C (or 1-4) to put someone in the boat or take them out.
/// - Space or Enter to row across. The farmer has to be aboard.
/// - H for a hint.
/// - M to mute the bell.
/// - Esc to give up and go back to the menu.
/// - Ctrl+C to quit.
/// - Ctrl+L to redraw the screen.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "play")]
struct CmdPlay {
  /// where the best score is kept (default: ~/.river-crossing.json).
  #[argh(option)]
  best_file: Option<String>,
  /// start with the bell muted.
  #[argh(switch)]
  mute: bool,
}

impl CmdPlay {
  fn run(&self) -> eyre::Result<()> {
    let path: PathBuf = match &self.best_file {
      Some(path) => path.into(),
      None => JsonFileStore::default_path(),
    };
    let store = JsonFileStore::new(path);
    log::info!("best score file: {}", store.path().display());
    GameHarness::enter(Box::new(store), self.mute)?;
    Ok(())
  }
}

/// Check whether a position is safe, e.g. `WC|F|S` (left|boat|right).
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "check")]
struct CmdCheck {
  /// the position, as `left|boat|right` using the letters F, S, W and C.
  #[argh(positional)]
  position: String,
}

impl CmdCheck {
  fn run(&self) -> eyre::Result<()> {
    let position = river_crossing::parse_position(&self.position)?;
    match position.validate() {
      Ok(()) => println!("{}: safe", position),
      Err(fail) => {
        println!("{}: {} (on the {} bank)", position, fail, fail.bank)
      }
    }
    for crossing in 0..2 {
      if position.is_round_complete(crossing) {
        println!(
          "everyone is on the {} bank",
          river_crossing::target_bank(crossing)
        );
      }
    }
    Ok(())
  }
}

/// Run a script of moves and report what happens.
///
/// One step per line: `board <entity>`, `land <entity>`, `cross` or
/// `wait <seconds>`. `#` starts a comment.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "replay")]
struct CmdReplay {
  /// path to the script.
  #[argh(positional)]
  path: String,
}

impl CmdReplay {
  fn run(&self) -> eyre::Result<()> {
    let src = fs::read_to_string(&self.path)?;
    let steps = match river_crossing::parse_script(&src) {
      Ok(steps) => steps,
      Err(e) => {
        Report::build(ReportKind::Error, (), e.span.start)
          .with_message(format!("bad step on line {}", e.line))
          .with_label(Label::new(e.span.clone()).with_message(&e.message))
          .finish()
          .eprint(Source::from(src.as_str()))?;
        return Err(eyre!("could not read {}", self.path));
      }
    };

    let mut session = Session::new();
    for step in steps {
      if !session.is_playing() {
        println!("game is over, ignoring the rest");
        break;
      }
      match step {
        Step::Board(e) | Step::Land(e) => {
          let want_board = matches!(step, Step::Board(_));
          let in_boat = session.position().location(e) == Location::Boat;
          if want_board == in_boat {
            println!("{:?}: ignored, the {} is already there", step, e);
            continue;
          }
          match session.toggle(e) {
            Some(t) => println!("{:?} -> {}", t, session.position()),
            None => println!("{:?}: not allowed", step),
          }
        }
        Step::Cross => match session.cross() {
          Some(outcome) => {
            print_outcome(outcome, &session);
          }
          None => println!("cross: the farmer has to be in the boat"),
        },
        Step::Wait(secs) => {
          for _ in 0..secs {
            session.tick();
          }
        }
      }
    }

    match session.status() {
      Status::Playing => println!(
        "unfinished: round {} of {}, {} trips, {}s",
        session.crossing() + 1,
        river_crossing::TOTAL_CROSSINGS,
        session.moves(),
        session.elapsed_secs()
      ),
      Status::Won { moves, score } => {
        println!("won in {} trips, score {}", moves, score)
      }
      Status::Lost(fail) => println!("lost: {}", fail),
    }
    Ok(())
  }
}

fn print_outcome(outcome: CrossingOutcome, session: &Session) {
  let position = session.position();
  match outcome {
    CrossingOutcome::Continue => println!("cross -> {}", position),
    CrossingOutcome::RoundComplete { crossing } => println!(
      "cross -> {}, round {} of {} done",
      position,
      crossing,
      river_crossing::TOTAL_CROSSINGS
    ),
    CrossingOutcome::Victory { .. } => println!("cross -> {}, won!", position),
    CrossingOutcome::GameOver(fail) => {
      println!("cross -> {}: {}", position, fail)
    }
  }
}

/// Print the shortest way to get everyone across.
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "solve")]
struct CmdSolve {
  /// starting position (default: everyone on the left, `FSWC||`).
  #[argh(option, default = "String::from(\"FSWC||\")")]
  from: String,
  /// bank to reach, `left` or `right` (default: right).
  #[argh(option, default = "Bank::Right", from_str_fn(parse_bank))]
  to: Bank,
}

fn parse_bank(s: &str) -> Result<Bank, String> {
  match s.to_ascii_lowercase().as_str() {
    "left" | "l" => Ok(Bank::Left),
    "right" | "r" => Ok(Bank::Right),
    _ => Err(format!("`{}` is not a bank, try left or right", s)),
  }
}

impl CmdSolve {
  fn run(&self) -> eyre::Result<()> {
    let from: Position = river_crossing::parse_position(&self.from)?;
    let trips = solver::solve(from, self.to).ok_or_else(|| {
      eyre!("no safe way from {} to the {} bank", from, self.to)
    })?;

    let mut here = from;
    for (i, trip) in trips.iter().enumerate() {
      let side = here.boat_side();
      let mut next = here.with(Entity::Farmer, side.opposite().into());
      if let Some(p) = trip.passenger {
        next = next.with(p, side.opposite().into());
      }
      match trip.passenger {
        Some(p) => println!("{}. farmer takes the {} -> {}", i + 1, p, next),
        None => println!("{}. farmer rows alone -> {}", i + 1, next),
      }
      here = next;
    }
    println!("{} trips", trips.len());
    Ok(())
  }
}
