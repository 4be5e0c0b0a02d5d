use crate::OPTIMAL_MOVES;

const BASE_SCORE: i64 = 10_000;
const EXTRA_MOVE_PENALTY: i64 = 10;
/// Finishing under ten minutes earns a bonus per second saved.
const TIME_BONUS_LIMIT_SECS: i64 = 600;
const TIME_BONUS_PER_SEC: i64 = 5;
const PERFECT_BONUS: i64 = 5_000;

/// Final score for a won game.
///
/// `moves` counts boat trips, not boarding or landing.
pub fn score(moves: u32, seconds: u32) -> u64 {
  let moves = i64::from(moves);
  let seconds = i64::from(seconds);
  let optimal = i64::from(OPTIMAL_MOVES);

  let move_penalty = ((moves - optimal) * EXTRA_MOVE_PENALTY).max(0);
  let time_bonus = if seconds < TIME_BONUS_LIMIT_SECS {
    (TIME_BONUS_LIMIT_SECS - seconds) * TIME_BONUS_PER_SEC
  } else {
    0
  };
  let perfect_bonus = if moves == optimal { PERFECT_BONUS } else { 0 };

  (BASE_SCORE - move_penalty + time_bonus + perfect_bonus).max(0) as u64
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn perfect_and_fast() {
    assert_eq!(score(140, 300), 16_500);
  }

  #[test]
  fn perfect_at_ten_minutes() {
    assert_eq!(score(140, 600), 15_000);
  }

  #[test]
  fn extra_moves_and_slow() {
    assert_eq!(score(160, 700), 9_800);
  }

  #[test]
  fn fewer_moves_than_optimal_is_not_penalised() {
    assert_eq!(score(100, 600), 10_000);
  }

  #[test]
  fn never_negative() {
    assert_eq!(score(5_000, 10_000), 0);
  }

  #[test]
  fn bonuses_stack_without_cap() {
    assert_eq!(score(140, 0), 10_000 + 3_000 + 5_000);
  }
}
