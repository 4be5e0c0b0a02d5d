use std::fmt;

use log::trace;

use crate::{Bank, Entity, Location, Position};

impl Position {
  /// Check that nothing gets eaten.
  ///
  /// - On a bank without the farmer, the wolf and the sheep can't be
  ///   together.
  /// - On a bank without the farmer, the sheep and the cabbage can't be
  ///   together.
  ///
  /// The boat is never checked. Banks are checked left first, and on each
  /// bank the wolf is checked before the cabbage, so exactly one failure is
  /// reported.
  pub fn validate(&self) -> Result<(), Failure> {
    for bank in Bank::BOTH {
      self.check_bank(bank)?;
    }
    Ok(())
  }

  pub fn is_valid(&self) -> bool {
    self.validate().is_ok()
  }

  fn check_bank(&self, bank: Bank) -> Result<(), Failure> {
    let here = Location::from(bank);
    let has = |e: Entity| self.location(e) == here;

    if has(Entity::Farmer) {
      trace!("{} bank is supervised", bank);
      return Ok(());
    }

    if has(Entity::Wolf) && has(Entity::Sheep) {
      trace!("{} bank: wolf and sheep alone", bank);
      return Err(Failure::new(bank, FailureReason::WolfAteSheep));
    }
    if has(Entity::Sheep) && has(Entity::Cabbage) {
      trace!("{} bank: sheep and cabbage alone", bank);
      return Err(Failure::new(bank, FailureReason::SheepAteCabbage));
    }

    Ok(())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Failure {
  pub reason: FailureReason,
  pub bank: Bank,
}

impl Failure {
  pub fn new(bank: Bank, reason: FailureReason) -> Self {
    Self { reason, bank }
  }
}

impl fmt::Display for Failure {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.reason, f)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
  WolfAteSheep,
  SheepAteCabbage,
}

impl FailureReason {
  /// The game-over message.
  pub fn message(self) -> &'static str {
    match self {
      FailureReason::WolfAteSheep => "The wolf ate the sheep!",
      FailureReason::SheepAteCabbage => "The sheep ate the cabbage!",
    }
  }
}

impl fmt::Display for FailureReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Location::{Boat, Left, Right};
  use proptest::prelude::*;

  fn any_location() -> impl Strategy<Value = Location> {
    prop_oneof![Just(Left), Just(Right), Just(Boat)]
  }

  fn any_position() -> impl Strategy<Value = Position> {
    (any_location(), any_location(), any_location(), any_location())
      .prop_map(|(f, s, w, c)| Position::new(f, s, w, c))
  }

  #[test]
  fn initial_is_valid() {
    assert_eq!(Position::initial().validate(), Ok(()));
  }

  #[test]
  fn farmer_took_sheep_over() {
    let p = Position::new(Right, Right, Left, Left);
    assert_eq!(p.validate(), Ok(()));
  }

  #[test]
  fn wolf_eats_sheep() {
    // farmer went back for the cabbage and left the wolf with the sheep
    let p = Position::new(Left, Right, Right, Left);
    let fail = p.validate().unwrap_err();
    assert_eq!(fail.reason, FailureReason::WolfAteSheep);
    assert_eq!(fail.bank, Bank::Right);
    assert_eq!(fail.to_string(), "The wolf ate the sheep!");
  }

  #[test]
  fn sheep_eats_cabbage() {
    let p = Position::new(Right, Left, Right, Left);
    let fail = p.validate().unwrap_err();
    assert_eq!(fail.reason, FailureReason::SheepAteCabbage);
    assert_eq!(fail.bank, Bank::Left);
  }

  #[test]
  fn wolf_takes_priority_when_all_three_alone() {
    let p = Position::new(Right, Left, Left, Left);
    assert_eq!(
      p.validate().unwrap_err().reason,
      FailureReason::WolfAteSheep
    );
  }

  #[test]
  fn boat_is_exempt() {
    // everyone but the farmer is sitting in the boat together
    let p = Position::new(Left, Boat, Boat, Boat);
    assert!(p.is_valid());
    let p = Position::new(Boat, Boat, Boat, Left);
    assert!(p.is_valid());
  }

  #[test]
  fn farmer_in_boat_supervises_neither_bank() {
    let p = Position::new(Boat, Left, Left, Right);
    assert_eq!(
      p.validate(),
      Err(Failure::new(Bank::Left, FailureReason::WolfAteSheep))
    );
  }

  proptest! {
    #[test]
    fn matches_reference_rule(p in any_position()) {
      let unsafe_on = |bank: Bank| {
        let here = Location::from(bank);
        let has = |e| p.location(e) == here;
        if has(Entity::Farmer) {
          None
        } else if has(Entity::Wolf) && has(Entity::Sheep) {
          Some(FailureReason::WolfAteSheep)
        } else if has(Entity::Sheep) && has(Entity::Cabbage) {
          Some(FailureReason::SheepAteCabbage)
        } else {
          None
        }
      };
      let expected = unsafe_on(Bank::Left)
        .map(|r| Failure::new(Bank::Left, r))
        .or_else(|| unsafe_on(Bank::Right).map(|r| Failure::new(Bank::Right, r)));
      prop_assert_eq!(p.validate().err(), expected);
    }

    #[test]
    fn supervised_banks_are_always_valid(p in any_position()) {
      let farmer = p.location(Entity::Farmer);
      let unsupervised_occupied = Bank::BOTH.into_iter().any(|b| {
        let loc = Location::from(b);
        loc != farmer && !p.is_empty(loc)
      });
      if !unsupervised_occupied {
        prop_assert!(p.is_valid());
      }
    }
  }
}
