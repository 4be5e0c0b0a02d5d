//! One game, from the first boarding to victory or a lost animal.

use log::{debug, info};

use crate::checker::Failure;
use crate::cue::Cue;
use crate::{score, Bank, Entity, Location, Position, TOTAL_CROSSINGS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
  Playing,
  Won { moves: u32, score: u64 },
  Lost(Failure),
}

/// What a single click on an entity did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
  Boarded(Entity),
  Landed(Entity, Bank),
}

impl Toggle {
  pub fn entity(self) -> Entity {
    match self {
      Toggle::Boarded(e) | Toggle::Landed(e, _) => e,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossingOutcome {
  /// Safe trip, round still going.
  Continue,
  /// Everyone reached the target bank. `crossing` is the round now being
  /// played.
  RoundComplete { crossing: u32 },
  Victory { moves: u32, score: u64 },
  GameOver(Failure),
}

impl CrossingOutcome {
  pub fn cue(self) -> Cue {
    match self {
      CrossingOutcome::Continue | CrossingOutcome::RoundComplete { .. } => {
        Cue::Success
      }
      CrossingOutcome::Victory { .. } => Cue::Complete,
      CrossingOutcome::GameOver(_) => Cue::Error,
    }
  }
}

/// Session state.
///
/// Actions the rules don't allow return `None`/`false` and leave the
/// session untouched.
#[derive(Debug, Clone)]
pub struct Session {
  position: Position,
  boat_side: Bank,
  moves: u32,
  elapsed_secs: u32,
  crossing: u32,
  crossing_in_progress: bool,
  status: Status,
}

impl Default for Session {
  fn default() -> Self {
    Self::new()
  }
}

impl Session {
  pub fn new() -> Self {
    Self {
      position: Position::initial(),
      boat_side: Bank::Left,
      moves: 0,
      elapsed_secs: 0,
      crossing: 0,
      crossing_in_progress: false,
      status: Status::Playing,
    }
  }

  pub fn position(&self) -> Position {
    self.position
  }

  pub fn boat_side(&self) -> Bank {
    self.boat_side
  }

  /// Completed boat trips.
  pub fn moves(&self) -> u32 {
    self.moves
  }

  pub fn elapsed_secs(&self) -> u32 {
    self.elapsed_secs
  }

  /// Index of the round being played, which is also the number of rounds
  /// finished so far.
  pub fn crossing(&self) -> u32 {
    self.crossing
  }

  pub fn is_crossing(&self) -> bool {
    self.crossing_in_progress
  }

  pub fn status(&self) -> Status {
    self.status
  }

  pub fn is_playing(&self) -> bool {
    self.status == Status::Playing
  }

  /// The position with anyone in the boat put back on the boat's bank.
  pub fn landed_position(&self) -> Position {
    self.position.land_boat(self.boat_side)
  }

  /// Board an entity standing at the boat, or land one sitting in it.
  pub fn toggle(&mut self, entity: Entity) -> Option<Toggle> {
    if !self.is_playing() || self.crossing_in_progress {
      return None;
    }

    let toggle = match self.position.location(entity) {
      Location::Boat => {
        self.position = self.position.with(entity, self.boat_side.into());
        Toggle::Landed(entity, self.boat_side)
      }
      here => {
        if here != Location::from(self.boat_side)
          || !self.position.can_board(entity)
          || self.position.is_boat_full()
        {
          debug!("{} can't board from {:?}", entity, here);
          return None;
        }
        self.position = self.position.with(entity, Location::Boat);
        Toggle::Boarded(entity)
      }
    };
    debug!("{:?} -> {}", toggle, self.position);
    Some(toggle)
  }

  /// Push off. Only works with the farmer aboard and no trip underway.
  pub fn begin_crossing(&mut self) -> bool {
    if !self.is_playing()
      || self.crossing_in_progress
      || self.position.location(Entity::Farmer) != Location::Boat
    {
      return false;
    }
    self.crossing_in_progress = true;
    debug!("crossing from the {} bank", self.boat_side);
    true
  }

  /// Arrive at the other bank and judge the result.
  pub fn finish_crossing(&mut self) -> Option<CrossingOutcome> {
    if !self.crossing_in_progress {
      return None;
    }

    let arrival = self.boat_side.opposite();
    self.position = self.position.land_boat(arrival);
    self.boat_side = arrival;
    self.moves += 1;
    self.crossing_in_progress = false;
    debug!("trip {} landed: {}", self.moves, self.position);

    let outcome = if let Err(fail) = self.position.validate() {
      info!("game over after {} trips: {}", self.moves, fail);
      self.status = Status::Lost(fail);
      CrossingOutcome::GameOver(fail)
    } else if self.position.is_round_complete(self.crossing) {
      self.crossing += 1;
      if self.crossing >= TOTAL_CROSSINGS {
        let score = score(self.moves, self.elapsed_secs);
        info!(
          "won in {} trips and {}s, score {}",
          self.moves, self.elapsed_secs, score
        );
        self.status = Status::Won {
          moves: self.moves,
          score,
        };
        CrossingOutcome::Victory {
          moves: self.moves,
          score,
        }
      } else {
        debug!("round {} of {} done", self.crossing, TOTAL_CROSSINGS);
        CrossingOutcome::RoundComplete {
          crossing: self.crossing,
        }
      }
    } else {
      CrossingOutcome::Continue
    };
    Some(outcome)
  }

  /// Cross without waiting in between.
  pub fn cross(&mut self) -> Option<CrossingOutcome> {
    if self.begin_crossing() {
      self.finish_crossing()
    } else {
      None
    }
  }

  /// Count one second of play.
  pub fn tick(&mut self) {
    if self.is_playing() {
      self.elapsed_secs += 1;
    }
  }
}
