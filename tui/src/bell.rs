//! The only sound a terminal can make.

use std::io::{self, Write};

use log::{trace, warn};
use river_crossing::cue::{AudioFeedback, Cue};

pub struct Bell {
  muted: bool,
}

impl Bell {
  pub fn new(muted: bool) -> Self {
    Self { muted }
  }

  pub fn is_muted(&self) -> bool {
    self.muted
  }

  /// Flip mute and return whether sound is now on.
  pub fn toggle(&mut self) -> bool {
    self.muted = !self.muted;
    !self.muted
  }
}

impl AudioFeedback for Bell {
  fn play(&mut self, cue: Cue) {
    trace!("cue: {}", cue);
    if self.muted || !matches!(cue, Cue::Error | Cue::Complete) {
      return;
    }
    let mut stdout = io::stdout();
    if let Err(e) = stdout.write_all(b"\x07").and_then(|()| stdout.flush()) {
      warn!("bell failed: {}", e);
    }
  }
}
