use std::ops::Range;

use nom::{
  branch::alt,
  bytes::complete::tag_no_case,
  character::complete::{char, one_of, space0, space1, u32 as decimal},
  combinator::{all_consuming, map, value},
  error::{context, VerboseError},
  multi::many0,
  sequence::{delimited, preceded, terminated, tuple},
  Finish, IResult,
};
use thiserror::Error;

use crate::{Entity, Location, Position};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
  #[error("expected `left|boat|right` using the letters F, S, W and C")]
  Syntax,
  #[error("the {0} appears more than once")]
  Duplicate(Entity),
  #[error("the {0} is missing")]
  Missing(Entity),
}

/// Parse the `left|boat|right` notation, e.g. `WC|F|S`.
pub fn parse_position(s: &str) -> Result<Position, NotationError> {
  let (_, zones) = all_consuming(zones)(s)
    .finish()
    .map_err(|_: VerboseError<&str>| NotationError::Syntax)?;

  let mut found: [Option<Location>; 4] = [None; 4];
  let places = [Location::Left, Location::Boat, Location::Right];
  for (zone, place) in zones.into_iter().zip(places) {
    for e in zone {
      let slot = &mut found[e as usize];
      if slot.is_some() {
        return Err(NotationError::Duplicate(e));
      }
      *slot = Some(place);
    }
  }

  let mut locs = [Location::Left; 4];
  for e in Entity::ALL {
    locs[e as usize] = found[e as usize].ok_or(NotationError::Missing(e))?;
  }
  Ok(Position::new(locs[0], locs[1], locs[2], locs[3]))
}

fn zones(s: &str) -> IResult<&str, [Vec<Entity>; 3], VerboseError<&str>> {
  let (s, (left, _, boat, _, right)) =
    tuple((zone, char('|'), zone, char('|'), zone))(s)?;
  Ok((s, [left, boat, right]))
}

fn zone(s: &str) -> IResult<&str, Vec<Entity>, VerboseError<&str>> {
  delimited(space0, many0(terminated(entity_letter, space0)), space0)(s)
}

fn entity_letter(s: &str) -> IResult<&str, Entity, VerboseError<&str>> {
  context(
    "entity letter",
    map(one_of("FSWCfswc"), |c| match c.to_ascii_uppercase() {
      'F' => Entity::Farmer,
      'S' => Entity::Sheep,
      'W' => Entity::Wolf,
      _ => Entity::Cabbage,
    }),
  )(s)
}

/// One line of a replay script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
  Board(Entity),
  Land(Entity),
  Cross,
  /// Let the clock run.
  Wait(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ScriptError {
  /// 1-based.
  pub line: usize,
  /// Byte range of the bad line in the whole script.
  pub span: Range<usize>,
  pub message: String,
}

/// Parse a replay script.
///
/// ```text
/// # first trip
/// board sheep
/// board farmer
/// cross
/// wait 3
/// ```
///
/// Blank lines and `#` comments are skipped.
pub fn parse_script(src: &str) -> Result<Vec<Step>, ScriptError> {
  let mut steps = Vec::new();
  let mut offset = 0;
  for (idx, raw) in src.split_inclusive('\n').enumerate() {
    let start = offset;
    offset += raw.len();

    let text = raw.split('#').next().unwrap_or("");
    let trimmed = text.trim();
    if trimmed.is_empty() {
      continue;
    }
    let lead = text.len() - text.trim_start().len();
    let span = start + lead..start + lead + trimmed.len();

    match all_consuming(step)(trimmed).finish() {
      Ok((_, step)) => steps.push(step),
      Err(_) => {
        return Err(ScriptError {
          line: idx + 1,
          span,
          message: format!(
            "expected `board <entity>`, `land <entity>`, `cross` or \
             `wait <seconds>`, found `{}`",
            trimmed
          ),
        })
      }
    }
  }
  Ok(steps)
}

fn step(s: &str) -> IResult<&str, Step, VerboseError<&str>> {
  alt((
    map(preceded(keyword("board"), entity_name), Step::Board),
    map(preceded(keyword("land"), entity_name), Step::Land),
    value(Step::Cross, tag_no_case("cross")),
    map(preceded(keyword("wait"), decimal), Step::Wait),
  ))(s)
}

/// A command word followed by at least one space.
fn keyword<'a>(
  word: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str, VerboseError<&'a str>> {
  terminated(tag_no_case(word), space1)
}

fn entity_name(s: &str) -> IResult<&str, Entity, VerboseError<&str>> {
  context(
    "entity",
    alt((
      value(Entity::Farmer, tag_no_case("farmer")),
      value(Entity::Sheep, tag_no_case("sheep")),
      value(Entity::Wolf, tag_no_case("wolf")),
      value(Entity::Cabbage, tag_no_case("cabbage")),
    )),
  )(s)
}
