//! Shortest ways across.

use std::collections::VecDeque;

use ahash::AHashMap;
use log::trace;

use crate::session::Session;
use crate::{target_bank, Bank, Entity, Location, Position};

/// One boat trip: the farmer rows, optionally with a passenger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Trip {
  pub passenger: Option<Entity>,
}

impl Trip {
  pub fn alone() -> Self {
    Self { passenger: None }
  }

  pub fn with(passenger: Entity) -> Self {
    Self {
      passenger: Some(passenger),
    }
  }
}

/// Fewest trips taking everyone from `from` to `target`.
///
/// `from` must be a safe position with nobody in the boat. Returns `None` if
/// it isn't, or if `target` can't be reached.
pub fn solve(from: Position, target: Bank) -> Option<Vec<Trip>> {
  if !from.is_empty(Location::Boat) || !from.is_valid() {
    return None;
  }
  let goal = Position::everyone_on(target);

  let mut came_from: AHashMap<Position, (Position, Trip)> = AHashMap::new();
  let mut todo = VecDeque::from([from]);
  let mut found = from == goal;
  while let Some(here) = todo.pop_front() {
    if found {
      break;
    }
    for (trip, next) in trips_from(here) {
      if next == from || came_from.contains_key(&next) {
        continue;
      }
      came_from.insert(next, (here, trip));
      if next == goal {
        found = true;
        break;
      }
      todo.push_back(next);
    }
  }
  if !found {
    trace!("no way from {} to the {} bank", from, target);
    return None;
  }

  let mut path = Vec::new();
  let mut cursor = goal;
  while cursor != from {
    let (prev, trip) = came_from[&cursor];
    path.push(trip);
    cursor = prev;
  }
  path.reverse();
  Some(path)
}

/// Every safe trip out of a landed position.
fn trips_from(here: Position) -> impl Iterator<Item = (Trip, Position)> {
  let side = here.boat_side();
  let across = Location::from(side.opposite());

  let passengers = Entity::ALL
    .into_iter()
    .filter(move |&e| e != Entity::Farmer && here.can_board(e))
    .map(Trip::with);
  std::iter::once(Trip::alone())
    .chain(passengers)
    .filter_map(move |trip| {
      let mut next = here.with(Entity::Farmer, across);
      if let Some(p) = trip.passenger {
        next = next.with(p, across);
      }
      next.is_valid().then_some((trip, next))
    })
}

/// The next trip toward finishing the current round.
pub fn hint(session: &Session) -> Option<Trip> {
  if !session.is_playing() {
    return None;
  }
  let target = target_bank(session.crossing());
  solve(session.landed_position(), target)?.into_iter().next()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::Location::{Left, Right};
  use crate::OPTIMAL_TRIPS_PER_ROUND;

  #[test]
  fn classic_puzzle_takes_seven() {
    let trips = solve(Position::initial(), Bank::Right).unwrap();
    assert_eq!(trips.len(), OPTIMAL_TRIPS_PER_ROUND as usize);
    // sheep always goes first and last
    assert_eq!(trips[0], Trip::with(Entity::Sheep));
    assert_eq!(trips[6], Trip::with(Entity::Sheep));
  }

  #[test]
  fn way_back_takes_seven_too() {
    let trips = solve(Position::everyone_on(Bank::Right), Bank::Left).unwrap();
    assert_eq!(trips.len(), 7);
  }

  #[test]
  fn solution_replays_through_a_session() {
    let mut s = Session::new();
    for trip in solve(Position::initial(), Bank::Right).unwrap() {
      if let Some(p) = trip.passenger {
        s.toggle(p).unwrap();
      }
      s.toggle(Entity::Farmer).unwrap();
      s.cross().unwrap();
    }
    assert_eq!(s.crossing(), 1);
    assert!(s.is_playing());
  }

  #[test]
  fn already_there() {
    let p = Position::everyone_on(Bank::Left);
    assert_eq!(solve(p, Bank::Left), Some(vec![]));
  }

  #[test]
  fn unsafe_or_loaded_starts_are_refused() {
    let eaten = Position::new(Left, Right, Right, Left);
    assert_eq!(solve(eaten, Bank::Right), None);
    let loaded = Position::initial().with(Entity::Sheep, Location::Boat);
    assert_eq!(solve(loaded, Bank::Right), None);
  }

  #[test]
  fn hint_follows_the_round() {
    let mut s = Session::new();
    assert_eq!(hint(&s), Some(Trip::with(Entity::Sheep)));

    s.toggle(Entity::Sheep);
    s.toggle(Entity::Farmer);
    s.cross();
    assert_eq!(hint(&s), Some(Trip::alone()));
  }
}
