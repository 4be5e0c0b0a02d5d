pub mod checker;
pub mod cue;
pub mod highscore;
mod parse;
mod rules;
mod score;
pub mod session;
pub mod solver;

pub use parse::{parse_position, parse_script, NotationError, ScriptError, Step};
pub use rules::target_bank;
pub use score::score;

use std::fmt;

/// Rounds needed to win a game.
pub const TOTAL_CROSSINGS: u32 = 20;
/// Fewest trips that take everyone from one bank to the other.
pub const OPTIMAL_TRIPS_PER_ROUND: u32 = 7;
pub const OPTIMAL_MOVES: u32 = OPTIMAL_TRIPS_PER_ROUND * TOTAL_CROSSINGS;
/// Farmer plus one passenger.
pub const BOAT_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
  Farmer,
  Sheep,
  Wolf,
  Cabbage,
}

impl Entity {
  pub const ALL: [Entity; 4] =
    [Entity::Farmer, Entity::Sheep, Entity::Wolf, Entity::Cabbage];

  fn index(self) -> usize {
    self as usize
  }

  pub fn name(self) -> &'static str {
    match self {
      Entity::Farmer => "farmer",
      Entity::Sheep => "sheep",
      Entity::Wolf => "wolf",
      Entity::Cabbage => "cabbage",
    }
  }

  /// Single letter used by the position notation.
  pub fn letter(self) -> char {
    match self {
      Entity::Farmer => 'F',
      Entity::Sheep => 'S',
      Entity::Wolf => 'W',
      Entity::Cabbage => 'C',
    }
  }
}

impl fmt::Display for Entity {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Location {
  Left,
  Right,
  Boat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bank {
  Left,
  Right,
}

impl Bank {
  pub const BOTH: [Bank; 2] = [Bank::Left, Bank::Right];

  pub fn opposite(self) -> Bank {
    match self {
      Bank::Left => Bank::Right,
      Bank::Right => Bank::Left,
    }
  }
}

impl From<Bank> for Location {
  fn from(bank: Bank) -> Self {
    match bank {
      Bank::Left => Location::Left,
      Bank::Right => Location::Right,
    }
  }
}

impl fmt::Display for Bank {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Bank::Left => "left",
      Bank::Right => "right",
    })
  }
}

/// Where every entity currently is.
///
/// This is a plain value: every transition hands back a new `Position`
/// instead of changing one in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
  locations: [Location; 4],
}

impl Position {
  pub fn new(
    farmer: Location,
    sheep: Location,
    wolf: Location,
    cabbage: Location,
  ) -> Self {
    Self {
      locations: [farmer, sheep, wolf, cabbage],
    }
  }

  /// Everyone on the left bank.
  pub fn initial() -> Self {
    Self::everyone_on(Bank::Left)
  }

  pub fn everyone_on(bank: Bank) -> Self {
    let loc = Location::from(bank);
    Self::new(loc, loc, loc, loc)
  }

  pub fn location(&self, entity: Entity) -> Location {
    self.locations[entity.index()]
  }

  /// Copy of this position with one entity moved.
  pub fn with(&self, entity: Entity, location: Location) -> Self {
    let mut locations = self.locations;
    locations[entity.index()] = location;
    Self { locations }
  }

  /// Every entity at `location`, in [`Entity::ALL`] order.
  pub fn on(
    &self,
    location: Location,
  ) -> impl Iterator<Item = Entity> + '_ {
    Entity::ALL
      .into_iter()
      .filter(move |&e| self.location(e) == location)
  }

  pub fn is_empty(&self, location: Location) -> bool {
    self.on(location).next().is_none()
  }

  /// Unload the boat onto `bank`.
  pub fn land_boat(&self, bank: Bank) -> Self {
    let mut out = *self;
    for e in self.on(Location::Boat) {
      out = out.with(e, bank.into());
    }
    out
  }
}

impl fmt::Display for Position {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let zones = [Location::Left, Location::Boat, Location::Right];
    for (i, zone) in zones.into_iter().enumerate() {
      if i != 0 {
        f.write_str("|")?;
      }
      for e in self.on(zone) {
        write!(f, "{}", e.letter())?;
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn initial_is_all_left() {
    let p = Position::initial();
    for e in Entity::ALL {
      assert_eq!(p.location(e), Location::Left);
    }
    assert!(p.is_empty(Location::Boat));
    assert!(p.is_empty(Location::Right));
  }

  #[test]
  fn with_leaves_original_alone() {
    let p = Position::initial();
    let q = p.with(Entity::Sheep, Location::Boat);
    assert_eq!(p.location(Entity::Sheep), Location::Left);
    assert_eq!(q.location(Entity::Sheep), Location::Boat);
    assert_eq!(q.on(Location::Boat).collect::<Vec<_>>(), vec![Entity::Sheep]);
  }

  #[test]
  fn land_boat_moves_only_passengers() {
    let p = Position::initial()
      .with(Entity::Farmer, Location::Boat)
      .with(Entity::Sheep, Location::Boat);
    let q = p.land_boat(Bank::Right);
    assert_eq!(
      q,
      Position::new(
        Location::Right,
        Location::Right,
        Location::Left,
        Location::Left
      )
    );
  }

  #[test]
  fn display_notation() {
    let p = Position::new(
      Location::Boat,
      Location::Right,
      Location::Left,
      Location::Left,
    );
    assert_eq!(p.to_string(), "WC|F|S");
    assert_eq!(Position::initial().to_string(), "FSWC||");
  }

  #[test]
  fn optimal_moves_constant() {
    assert_eq!(OPTIMAL_MOVES, 140);
  }
}
