//! Boarding, capacity and round rules.

use crate::{Bank, Entity, Location, Position, BOAT_CAPACITY};

/// The bank everyone has to reach during round `crossing`.
///
/// Rounds alternate: even rounds head right, odd rounds head back left.
pub fn target_bank(crossing: u32) -> Bank {
  match crossing % 2 {
    0 => Bank::Right,
    _ => Bank::Left,
  }
}

impl Position {
  /// The farmer can always move. Anyone else has to be standing with the
  /// farmer.
  pub fn can_board(&self, entity: Entity) -> bool {
    entity == Entity::Farmer
      || self.location(entity) == self.location(Entity::Farmer)
  }

  pub fn is_boat_full(&self) -> bool {
    self.on(Location::Boat).count() >= BOAT_CAPACITY
  }

  pub fn is_round_complete(&self, crossing: u32) -> bool {
    let target = Location::from(target_bank(crossing));
    Entity::ALL.iter().all(|&e| self.location(e) == target)
  }

  /// Which bank the boat is moored at, judging by the farmer alone.
  ///
  /// A farmer sitting in the boat counts as the left bank; sessions track
  /// the real side themselves.
  pub fn boat_side(&self) -> Bank {
    match self.location(Entity::Farmer) {
      Location::Left | Location::Boat => Bank::Left,
      Location::Right => Bank::Right,
    }
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

  fn any_entity() -> impl Strategy<Value = Entity> {
    prop::sample::select(Entity::ALL.to_vec())
  }

  #[test]
  fn target_alternates() {
    assert_eq!(target_bank(0), Bank::Right);
    assert_eq!(target_bank(1), Bank::Left);
    assert_eq!(target_bank(2), Bank::Right);
    assert_eq!(target_bank(19), Bank::Left);
  }

  #[test]
  fn sheep_cannot_board_without_farmer() {
    let p = Position::new(Right, Left, Left, Left);
    assert!(!p.can_board(Entity::Sheep));
    assert!(p.can_board(Entity::Farmer));
  }

  #[test]
  fn nobody_joins_a_farmer_already_in_the_boat() {
    let p = Position::initial().with(Entity::Farmer, Boat);
    assert!(!p.can_board(Entity::Wolf));
  }

  #[test]
  fn boat_holds_two() {
    let one = Position::initial().with(Entity::Sheep, Boat);
    assert!(!one.is_boat_full());
    let two = one.with(Entity::Farmer, Boat);
    assert!(two.is_boat_full());
  }

  #[test]
  fn round_completion_depends_on_parity() {
    let right = Position::everyone_on(Bank::Right);
    let left = Position::everyone_on(Bank::Left);
    assert!(right.is_round_complete(0));
    assert!(!right.is_round_complete(1));
    assert!(left.is_round_complete(1));
    assert!(!left.is_round_complete(0));
  }

  #[test]
  fn boat_side_follows_farmer() {
    assert_eq!(Position::initial().boat_side(), Bank::Left);
    let p = Position::initial().with(Entity::Farmer, Right);
    assert_eq!(p.boat_side(), Bank::Right);
  }

  proptest! {
    #[test]
    fn farmer_can_always_board(p in any_position()) {
      prop_assert!(p.can_board(Entity::Farmer));
    }

    #[test]
    fn others_board_only_beside_farmer(
      p in any_position(),
      e in any_entity(),
    ) {
      prop_assume!(e != Entity::Farmer);
      prop_assert_eq!(
        p.can_board(e),
        p.location(e) == p.location(Entity::Farmer)
      );
    }

    #[test]
    fn full_means_two_aboard(p in any_position()) {
      let aboard = Entity::ALL
        .iter()
        .filter(|&&e| p.location(e) == Boat)
        .count();
      prop_assert_eq!(p.is_boat_full(), aboard >= 2);
    }

    #[test]
    fn complete_iff_all_on_target(p in any_position(), crossing in 0u32..40) {
      let target = if crossing % 2 == 0 { Right } else { Left };
      let all_there = Entity::ALL.iter().all(|&e| p.location(e) == target);
      prop_assert_eq!(p.is_round_complete(crossing), all_there);
    }
  }
}
