//! Sound cues.
//!
//! Front ends play a cue for game events. Sound is purely cosmetic: a cue
//! that can't be played is skipped and the game carries on.

use std::fmt;

use crate::Entity;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
  Click,
  Boat,
  Success,
  Error,
  Complete,
  Sheep,
  Wolf,
  Cabbage,
  Farmer,
}

impl Cue {
  pub fn as_str(self) -> &'static str {
    match self {
      Cue::Click => "click",
      Cue::Boat => "boat",
      Cue::Success => "success",
      Cue::Error => "error",
      Cue::Complete => "complete",
      Cue::Sheep => "sheep",
      Cue::Wolf => "wolf",
      Cue::Cabbage => "cabbage",
      Cue::Farmer => "farmer",
    }
  }
}

impl From<Entity> for Cue {
  fn from(entity: Entity) -> Self {
    match entity {
      Entity::Farmer => Cue::Farmer,
      Entity::Sheep => Cue::Sheep,
      Entity::Wolf => Cue::Wolf,
      Entity::Cabbage => Cue::Cabbage,
    }
  }
}

impl fmt::Display for Cue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

pub trait AudioFeedback {
  fn play(&mut self, cue: Cue);
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioFeedback for Silent {
  fn play(&mut self, _cue: Cue) {}
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn entity_cues_use_entity_names() {
    for e in Entity::ALL {
      assert_eq!(Cue::from(e).as_str(), e.name());
    }
  }

  #[test]
  fn silent_accepts_everything() {
    let mut audio = Silent;
    audio.play(Cue::Error);
    audio.play(Cue::Complete);
  }
}
