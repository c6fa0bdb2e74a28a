//! The two decks and the operations that span both

use crate::deck::{Deck, Direction, MUTE_STEPS};
use crate::error::ToolResult;
use serde::Deserialize;
use std::fmt;
use std::thread;

/// Volume raised on the incoming deck during a quickfade
pub const QUICKFADE_STEPS: i32 = 10;

/// How a crossfade schedules the key-presses for the two decks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossfadePolicy {
    /// Each deck's full run of steps on its own thread, joined before returning
    #[default]
    Concurrent,
    /// One step on the left, then one on the right, repeated
    Sequential,
}

/// Which decks can be reached over session control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    pub left: bool,
    pub right: bool,
}

/// Which deck an action applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

pub struct Decks {
    pub left: Deck,
    pub right: Deck,
    policy: CrossfadePolicy,
}

impl Decks {
    pub fn new(left: Deck, right: Deck, policy: CrossfadePolicy) -> Self {
        Self {
            left,
            right,
            policy,
        }
    }

    pub fn deck(&self, side: Side) -> &Deck {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn capabilities(&self) -> Capabilities {
        Capabilities {
            left: self.left.has_session_control(),
            right: self.right.has_session_control(),
        }
    }

    /// Move `|delta|` steps of volume between the decks
    ///
    /// Positive `delta` fades towards the right deck (left down, right up),
    /// negative towards the left. The first failure on either side is
    /// returned; a side stops at its first failure.
    pub fn crossfade(&self, delta: i32) -> ToolResult<()> {
        if delta == 0 {
            return Ok(());
        }
        log::debug!("crossfade {:+} ({:?})", delta, self.policy);

        match self.policy {
            CrossfadePolicy::Sequential => {
                let d = delta.signum();
                for _ in 0..delta.unsigned_abs() {
                    self.left.change_volume(-d)?;
                    self.right.change_volume(d)?;
                }
                Ok(())
            }
            CrossfadePolicy::Concurrent => thread::scope(|s| {
                let (towards, steps) = (Direction::of(delta), delta.unsigned_abs());
                let left = s.spawn(move || self.left.step_volume(towards.reverse(), steps));
                let right = s.spawn(move || self.right.step_volume(towards, steps));
                let left = left.join().unwrap_or_else(|e| std::panic::resume_unwind(e));
                let right = right.join().unwrap_or_else(|e| std::panic::resume_unwind(e));
                left.and(right)
            }),
        }
    }

    /// Hand playback over from one deck to the other in one go
    ///
    /// The order matters: the incoming deck is readied and started before
    /// the outgoing one is silenced and stopped.
    pub fn quickfade(&self, from: Side, to: Side) -> ToolResult<()> {
        let (from, to) = (self.deck(from), self.deck(to));
        log::debug!("quickfade {} -> {}", from, to);

        to.pause()?;
        to.volume_up(QUICKFADE_STEPS)?;
        to.toggle()?;
        from.pause()?;
        from.mute()?;
        from.toggle()
    }

    pub fn quickfade_left(&self) -> ToolResult<()> {
        self.quickfade(Side::Right, Side::Left)
    }

    pub fn quickfade_right(&self) -> ToolResult<()> {
        self.quickfade(Side::Left, Side::Right)
    }

    pub fn mute(&self) -> ToolResult<()> {
        self.left.mute()?;
        self.right.mute()
    }

    /// Put the left deck at full volume and playing, the right one silent
    pub fn reset(&self) -> ToolResult<()> {
        self.left.change_volume(MUTE_STEPS)?;
        self.right.change_volume(-MUTE_STEPS)?;
        self.left.toggle()
    }
}

impl fmt::Display for Decks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decks({}, {})", self.left, self.right)
    }
}
