//! Game harness

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use crossterm::{
  cursor::{Hide, MoveTo, Show},
  event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
  style::{
    Attribute, Attributes, Color, Colors, Print, ResetColor, SetAttributes,
    SetColors, SetForegroundColor,
  },
  terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
  },
  QueueableCommand,
};
use log::debug;
use river_crossing::{
  checker::Failure,
  cue::{AudioFeedback, Cue},
  highscore::{record_score_or_warn, ScoreRecord, ScoreStore},
  session::{CrossingOutcome, Session},
  solver::{self, Trip},
  Bank, Entity, Location, OPTIMAL_MOVES, TOTAL_CROSSINGS,
};

use crate::bell::Bell;

const START_X: u16 = 2;
const START_Y: u16 = 1;

/// Columns of the two banks and the two places the boat can be moored.
const LEFT_BANK_X: u16 = 4;
const BOAT_LEFT_X: u16 = 20;
const BOAT_MID_X: u16 = 30;
const BOAT_RIGHT_X: u16 = 40;
const RIGHT_BANK_X: u16 = 56;
const RIVER_X: u16 = 18;
const RIVER_WIDTH: usize = 36;

/// Row of the bank labels; entities are drawn below, one per stride.
const BOARD_Y: u16 = 5;
const ENTITY_STRIDE_Y: u16 = 2;
const MESSAGE_Y: u16 = 20;

const TICK: Duration = Duration::from_secs(1);
const CROSSING_TIME: Duration = Duration::from_secs(1);

pub struct GameHarness {
  screen: Screen,
  store: Box<dyn ScoreStore>,
  bell: Bell,

  /// The last thing worth telling the player.
  message: Option<String>,
  crossing_ends: Option<Instant>,
  next_tick: Instant,

  must_redraw: bool,
}

enum Screen {
  Start,
  Playing(Session),
  Complete {
    moves: u32,
    score: u64,
    record: ScoreRecord,
  },
  GameOver(Failure),
}

impl GameHarness {
  /// Transfer runtime to the harness.
  /// This will only return once the player is through.
  pub fn enter(store: Box<dyn ScoreStore>, muted: bool) -> io::Result<()> {
    let mut harness = Self {
      screen: Screen::Start,
      store,
      bell: Bell::new(muted),
      message: None,
      crossing_ends: None,
      next_tick: Instant::now() + TICK,
      must_redraw: true,
    };

    harness.spin()?;

    Ok(())
  }

  fn spin(&mut self) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.queue(EnterAlternateScreen)?.queue(Hide)?.flush()?;

    loop {
      self.draw(&mut stdout)?;

      let wait = self.next_deadline().saturating_duration_since(Instant::now());
      if event::poll(wait)? {
        if let Event::Key(ev) = event::read()? {
          if matches!(ev.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            let quit = self.update(ev.code, ev.modifiers);
            if quit {
              break;
            }
          }
        }
      }
      self.advance(Instant::now());
    }

    stdout.queue(Show)?.queue(LeaveAlternateScreen)?.flush()?;
    disable_raw_mode()?;

    Ok(())
  }

  fn next_deadline(&self) -> Instant {
    match self.crossing_ends {
      Some(ends) => ends.min(self.next_tick),
      None => self.next_tick,
    }
  }

  /// Run the clock and land the boat when it's due.
  fn advance(&mut self, now: Instant) {
    let Screen::Playing(session) = &mut self.screen else {
      self.next_tick = now + TICK;
      return;
    };

    while self.next_tick <= now {
      session.tick();
      self.next_tick += TICK;
      self.must_redraw = true;
    }

    let due = self.crossing_ends.map_or(false, |ends| ends <= now);
    if !due {
      return;
    }
    self.crossing_ends = None;
    self.must_redraw = true;
    let Some(outcome) = session.finish_crossing() else {
      return;
    };
    self.bell.play(outcome.cue());
    debug!("crossing outcome: {:?}", outcome);

    match outcome {
      CrossingOutcome::Continue => self.message = None,
      CrossingOutcome::RoundComplete { crossing } => {
        let target = river_crossing::target_bank(crossing);
        self.message = Some(format!(
          "Round {} done! Now take everyone back to the {} bank.",
          crossing, target
        ));
      }
      CrossingOutcome::Victory { moves, score } => {
        let record = record_score_or_warn(self.store.as_mut(), score);
        self.message = None;
        self.screen = Screen::Complete {
          moves,
          score,
          record,
        };
      }
      CrossingOutcome::GameOver(fail) => {
        self.message = None;
        self.screen = Screen::GameOver(fail);
      }
    }
  }

  /// return whether to quit
  fn update(&mut self, key: KeyCode, mods: KeyModifiers) -> bool {
    self.must_redraw = true;

    if key == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
      return true;
    }
    if key == KeyCode::Char('l') && mods.contains(KeyModifiers::CONTROL) {
      return false;
    }
    if let KeyCode::Char('m' | 'M') = key {
      let msg = if self.bell.toggle() {
        "Sound on."
      } else {
        "Sound off."
      };
      self.message = Some(msg.into());
      return false;
    }

    match &mut self.screen {
      Screen::Start => match key {
        KeyCode::Enter | KeyCode::Char(' ') => {
          self.bell.play(Cue::Success);
          self.new_game();
        }
        KeyCode::Esc | KeyCode::Char('q') => return true,
        _ => {}
      },
      Screen::Playing(session) => {
        if let Some(entity) = key_entity(key) {
          match session.toggle(entity) {
            Some(toggle) => {
              self.bell.play(Cue::from(toggle.entity()));
              self.message = None;
            }
            None => debug!("{} can't move right now", entity),
          }
          return false;
        }
        match key {
          KeyCode::Enter | KeyCode::Char(' ') => {
            if session.begin_crossing() {
              self.bell.play(Cue::Boat);
              self.crossing_ends = Some(Instant::now() + CROSSING_TIME);
              self.message = None;
            } else if !session.is_crossing() {
              self.message = Some("The farmer has to row the boat.".into());
            }
          }
          KeyCode::Char('h' | 'H') => {
            self.message = Some(match solver::hint(session) {
              Some(trip) => hint_text(trip),
              None => "No safe way from here.".into(),
            });
          }
          KeyCode::Esc => {
            self.bell.play(Cue::Click);
            self.crossing_ends = None;
            self.message = None;
            self.screen = Screen::Start;
          }
          _ => {}
        }
      }
      Screen::Complete { .. } | Screen::GameOver(_) => match key {
        KeyCode::Enter | KeyCode::Char(' ') => {
          self.bell.play(Cue::Click);
          self.new_game();
        }
        KeyCode::Esc => {
          self.bell.play(Cue::Click);
          self.screen = Screen::Start;
        }
        KeyCode::Char('q') => return true,
        _ => {}
      },
    }

    false
  }

  fn new_game(&mut self) {
    self.screen = Screen::Playing(Session::new());
    self.crossing_ends = None;
    self.next_tick = Instant::now() + TICK;
    self.message = None;
  }

  fn draw(&mut self, stdout: &mut Stdout) -> io::Result<()> {
    if !self.must_redraw {
      return Ok(());
    }
    self.must_redraw = false;

    stdout
      .queue(Clear(ClearType::All))?
      .queue(MoveTo(START_X, START_Y))?
      .queue(ResetColor)?
      .queue(SetAttributes(Attribute::Bold.into()))?
      .queue(Print("River Crossing"))?
      .queue(SetAttributes(Attribute::Reset.into()))?;

    let lines = match &self.screen {
      Screen::Start => start_lines(),
      Screen::Playing(session) => {
        self.draw_board(stdout, session)?;
        Vec::new()
      }
      Screen::Complete {
        moves,
        score,
        record,
      } => complete_lines(*moves, *score, *record),
      Screen::GameOver(fail) => game_over_lines(*fail),
    };
    for (i, (line, color)) in lines.iter().enumerate() {
      stdout
        .queue(MoveTo(START_X, START_Y + 2 + i as u16))?
        .queue(SetForegroundColor(*color))?
        .queue(Print(line))?;
    }

    if let Some(msg) = &self.message {
      stdout
        .queue(MoveTo(START_X, MESSAGE_Y))?
        .queue(SetForegroundColor(Color::Yellow))?
        .queue(Print(msg))?;
    }
    let sound = if self.bell.is_muted() { "off" } else { "on" };
    stdout
      .queue(MoveTo(RIGHT_BANK_X, START_Y))?
      .queue(SetForegroundColor(Color::DarkGrey))?
      .queue(Print(format!("sound {} (M)", sound)))?
      .queue(ResetColor)?;

    stdout.flush()?;
    Ok(())
  }

  fn draw_board(
    &self,
    stdout: &mut Stdout,
    session: &Session,
  ) -> io::Result<()> {
    let secs = session.elapsed_secs();
    stdout
      .queue(MoveTo(START_X, START_Y + 2))?
      .queue(ResetColor)?
      .queue(Print(format!(
        "Progress {}/{}   Trips {}   Time {}:{:02}",
        session.crossing(),
        TOTAL_CROSSINGS,
        session.moves(),
        secs / 60,
        secs % 60
      )))?;

    for row in 0..(Entity::ALL.len() as u16 * ENTITY_STRIDE_Y + 1) {
      stdout
        .queue(MoveTo(RIVER_X, BOARD_Y + row))?
        .queue(SetColors(Colors::new(Color::DarkBlue, Color::Reset)))?
        .queue(Print("~".repeat(RIVER_WIDTH)))?;
    }

    let target = river_crossing::target_bank(session.crossing());
    for (bank, x) in [(Bank::Left, LEFT_BANK_X), (Bank::Right, RIGHT_BANK_X)] {
      let (label, color) = if bank == target {
        ("GOAL", Color::Green)
      } else {
        ("START", Color::White)
      };
      stdout
        .queue(MoveTo(x, BOARD_Y))?
        .queue(SetForegroundColor(color))?
        .queue(Print(format!("{} bank", label)))?;
    }

    let position = session.position();
    for (i, entity) in Entity::ALL.into_iter().enumerate() {
      let x = match position.location(entity) {
        Location::Left => LEFT_BANK_X,
        Location::Right => RIGHT_BANK_X,
        Location::Boat => continue,
      };
      let (ch, cols, fmt) = entity_display(entity);
      stdout
        .queue(MoveTo(x, BOARD_Y + (i as u16 + 1) * ENTITY_STRIDE_Y))?
        .queue(SetColors(cols))?
        .queue(SetAttributes(fmt))?
        .queue(Print(format!("{} {}", ch, entity)))?
        .queue(SetAttributes(Attribute::Reset.into()))?;
    }

    let boat_x = if session.is_crossing() {
      BOAT_MID_X
    } else {
      match session.boat_side() {
        Bank::Left => BOAT_LEFT_X,
        Bank::Right => BOAT_RIGHT_X,
      }
    };
    let boat_y = BOARD_Y + 2 * ENTITY_STRIDE_Y;
    stdout
      .queue(MoveTo(boat_x, boat_y))?
      .queue(SetColors(Colors::new(Color::White, Color::DarkYellow)))?
      .queue(Print("\\"))?;
    let aboard: Vec<_> = position.on(Location::Boat).collect();
    for slot in 0..2 {
      match aboard.get(slot) {
        Some(&e) => {
          let (ch, cols, fmt) = entity_display(e);
          let fg = cols.foreground.unwrap_or(Color::White);
          stdout
            .queue(SetColors(Colors::new(fg, Color::DarkYellow)))?
            .queue(SetAttributes(fmt))?
            .queue(Print(format!(" {} ", ch)))?
            .queue(SetAttributes(Attribute::Reset.into()))?;
        }
        None => {
          stdout
            .queue(SetColors(Colors::new(Color::White, Color::DarkYellow)))?
            .queue(Print("   "))?;
        }
      }
    }
    stdout
      .queue(SetColors(Colors::new(Color::White, Color::DarkYellow)))?
      .queue(Print("/"))?
      .queue(ResetColor)?;

    let help_y = BOARD_Y + (Entity::ALL.len() as u16 + 1) * ENTITY_STRIDE_Y + 1;
    let help = [
      "F S W C  board / land      Space  row across",
      "H  hint      Esc  give up      Ctrl+C  quit",
    ];
    for (i, line) in help.iter().enumerate() {
      stdout
        .queue(MoveTo(START_X, help_y + i as u16))?
        .queue(SetForegroundColor(Color::DarkGrey))?
        .queue(Print(line))?;
    }
    stdout.queue(ResetColor)?;
    Ok(())
  }
}

fn key_entity(key: KeyCode) -> Option<Entity> {
  match key {
    KeyCode::Char('f' | 'F' | '1') => Some(Entity::Farmer),
    KeyCode::Char('s' | 'S' | '2') => Some(Entity::Sheep),
    KeyCode::Char('w' | 'W' | '3') => Some(Entity::Wolf),
    KeyCode::Char('c' | 'C' | '4') => Some(Entity::Cabbage),
    _ => None,
  }
}

fn hint_text(trip: Trip) -> String {
  match trip.passenger {
    Some(p) => format!("Hint: take the {} across.", p),
    None => "Hint: row across alone.".into(),
  }
}

fn start_lines() -> Vec<(String, Color)> {
  let rules = [
    "Help the farmer cross the river 20 times!",
    "",
    "- The farmer has to bring a sheep, a wolf and a cabbage across.",
    "- The boat carries the farmer plus ONE passenger.",
    "- Never leave the wolf alone with the sheep.",
    "- Never leave the sheep alone with the cabbage.",
    "- Breaking these rules ends the game!",
    "- Every round, take everyone to the other bank. 20 rounds win.",
    "- Fewer trips and less time mean a higher score.",
    "",
    "Press Enter to start, Q to quit.",
  ];
  rules.iter().map(|l| (l.to_string(), Color::White)).collect()
}

fn complete_lines(
  moves: u32,
  score: u64,
  record: ScoreRecord,
) -> Vec<(String, Color)> {
  let mut lines = vec![
    ("Puzzle complete!".to_string(), Color::Green),
    (String::new(), Color::Reset),
  ];
  if record.is_new_record {
    lines.push(("New high score!".into(), Color::Yellow));
  }
  lines.push((format!("Trips used: {}", moves), Color::White));
  lines.push((format!("Your score: {}", score), Color::White));
  lines.push((format!("Best score: {}", record.best), Color::White));
  if moves == OPTIMAL_MOVES {
    lines.push(("Perfect solution!".into(), Color::Yellow));
  }
  lines.push((String::new(), Color::Reset));
  lines.push(("Enter to play again, Esc for the menu.".into(), Color::White));
  lines
}

fn game_over_lines(fail: Failure) -> Vec<(String, Color)> {
  vec![
    ("Game over".to_string(), Color::Red),
    (String::new(), Color::Reset),
    (fail.to_string(), Color::White),
    (String::new(), Color::Reset),
    ("Remember:".into(), Color::White),
    ("  wolf + sheep = danger".into(), Color::White),
    ("  sheep + cabbage = danger".into(), Color::White),
    ("  the farmer has to watch dangerous pairs".into(), Color::White),
    (String::new(), Color::Reset),
    ("Enter to try again, Esc for the menu.".into(), Color::White),
  ]
}

fn entity_display(entity: Entity) -> (char, Colors, Attributes) {
  let bold = Attributes::default() | Attribute::Bold | Attribute::NoItalic;
  match entity {
    Entity::Farmer => ('F', Colors::new(Color::Magenta, Color::Reset), bold),
    Entity::Sheep => ('S', Colors::new(Color::White, Color::Reset), bold),
    Entity::Wolf => ('W', Colors::new(Color::DarkGrey, Color::Reset), bold),
    Entity::Cabbage => ('C', Colors::new(Color::Green, Color::Reset), bold),
  }
}
