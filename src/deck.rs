//! One controlled player instance
//!
//! A deck never reads anything back from its player. Volume and play state
//! live in the player; every operation here is a fixed sequence of
//! external calls.

use crate::dbus::{PlayerCommand, SessionControl};
use crate::error::{ToolError, ToolResult};
use crate::xdotool::InputAutomation;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Player key bound to one step of volume up / down
pub const VOLUME_UP_KEY: &str = "Ctrl+Up";
pub const VOLUME_DOWN_KEY: &str = "Ctrl+Down";

/// Play/pause key used when a deck has no session control
pub const TOGGLE_KEY: &str = "space";

/// Steps sent by [`Deck::mute`]
///
/// Not a real mute: assumes the player never sits more than this many
/// steps above silence.
pub const MUTE_STEPS: i32 = 10;

/// Most key-presses handed to the automation tool in one call
const KEY_BATCH: usize = 64;

/// Which way a volume step goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Direction of a signed delta; zero counts as up and is never stepped
    pub fn of(delta: i32) -> Self {
        if delta < 0 { Direction::Down } else { Direction::Up }
    }

    pub fn reverse(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    fn key(self) -> &'static str {
        match self {
            Direction::Up => VOLUME_UP_KEY,
            Direction::Down => VOLUME_DOWN_KEY,
        }
    }
}

/// X11 window handle passed to the automation tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WindowId {
    type Err = String;

    /// Decimal, or hexadecimal with a `0x` prefix as printed by xwininfo
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => s.parse::<u64>(),
        };
        parsed
            .map(WindowId)
            .map_err(|e| format!("invalid window id '{}': {}", s, e))
    }
}

/// How a deck reaches its player's transport (play/pause)
pub enum Transport {
    /// Only keystrokes; toggling sends the space key
    Keystroke,
    /// Session messaging as the player's owner
    Session(Box<dyn SessionControl>),
}

pub struct Deck {
    name: String,
    window: WindowId,
    automation: Arc<dyn InputAutomation>,
    transport: Transport,
}

impl Deck {
    pub fn new(
        name: impl Into<String>,
        window: WindowId,
        automation: Arc<dyn InputAutomation>,
        transport: Transport,
    ) -> Self {
        Self {
            name: name.into(),
            window,
            automation,
            transport,
        }
    }

    pub fn has_session_control(&self) -> bool {
        matches!(self.transport, Transport::Session(_))
    }

    /// Start or stop playback
    pub fn toggle(&self) -> ToolResult<()> {
        log::debug!("{}: toggle", self);
        match &self.transport {
            Transport::Session(session) => session.send(PlayerCommand::PlayPause),
            Transport::Keystroke => self.automation.key(self.window, &[TOGGLE_KEY]),
        }
    }

    /// Pause playback; only decks with session control can do this
    pub fn pause(&self) -> ToolResult<()> {
        log::debug!("{}: pause", self);
        match &self.transport {
            Transport::Session(session) => session.send(PlayerCommand::Pause),
            Transport::Keystroke => Err(ToolError::Unsupported {
                deck: self.name.clone(),
                operation: "pause",
            }),
        }
    }

    /// Step the player volume by `delta` discrete units
    ///
    /// One key-press is exactly one unit, so the count must be exact.
    pub fn change_volume(&self, delta: i32) -> ToolResult<()> {
        self.step_volume(Direction::of(delta), delta.unsigned_abs())
    }

    /// Send `steps` volume keys in `direction`, at most [`KEY_BATCH`] per call
    pub fn step_volume(&self, direction: Direction, steps: u32) -> ToolResult<()> {
        if steps == 0 {
            return Ok(());
        }
        log::debug!("{}: volume {:?} x{}", self, direction, steps);

        let batch = [direction.key(); KEY_BATCH];
        let mut remaining = steps as usize;
        while remaining > 0 {
            let n = remaining.min(KEY_BATCH);
            self.automation.key(self.window, &batch[..n])?;
            remaining -= n;
        }
        Ok(())
    }

    pub fn mute(&self) -> ToolResult<()> {
        self.change_volume(-MUTE_STEPS)
    }

    pub fn volume_up(&self, delta: i32) -> ToolResult<()> {
        self.change_volume(delta)
    }

    /// Opposite of [`Deck::volume_up`]; no negation, so `i32::MIN` is fine
    pub fn volume_down(&self, delta: i32) -> ToolResult<()> {
        self.step_volume(Direction::of(delta).reverse(), delta.unsigned_abs())
    }
}

impl fmt::Display for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.transport {
            Transport::Session(session) => {
                write!(f, "{}({}, {})", self.name, session.identity(), self.window)
            }
            Transport::Keystroke => write!(f, "{}({})", self.name, self.window),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dbus::testing::RecordingSession;
    use crate::xdotool::testing::RecordingAutomation;
    use std::sync::Mutex;

    fn keystroke_deck(window: u64) -> (Deck, Arc<RecordingAutomation>) {
        let automation = Arc::new(RecordingAutomation::new());
        let deck = Deck::new("left", WindowId(window), automation.clone(), Transport::Keystroke);
        (deck, automation)
    }

    #[test]
    fn test_volume_up_three_steps() {
        let (deck, automation) = keystroke_deck(42);
        deck.change_volume(3).unwrap();
        assert_eq!(
            automation.presses(),
            vec![(WindowId(42), "Ctrl+Up".to_string()); 3]
        );
    }

    #[test]
    fn test_volume_down_two_steps() {
        let (deck, automation) = keystroke_deck(7);
        deck.change_volume(-2).unwrap();
        assert_eq!(
            automation.presses(),
            vec![(WindowId(7), "Ctrl+Down".to_string()); 2]
        );
    }

    #[test]
    fn test_zero_delta_is_noop() {
        let (deck, automation) = keystroke_deck(1);
        deck.change_volume(0).unwrap();
        deck.volume_up(0).unwrap();
        deck.volume_down(0).unwrap();
        assert!(automation.presses().is_empty());
        assert!(automation.batches().is_empty());
    }

    #[test]
    fn test_zero_delta_is_noop_with_session_control() {
        let automation = Arc::new(RecordingAutomation::new());
        let sent = Arc::new(Mutex::new(Vec::new()));
        let deck = Deck::new(
            "left",
            WindowId(1),
            automation.clone(),
            Transport::Session(Box::new(RecordingSession::new("alice", &sent))),
        );

        deck.change_volume(0).unwrap();
        deck.volume_up(0).unwrap();
        deck.volume_down(0).unwrap();
        assert!(automation.presses().is_empty());
        assert!(automation.batches().is_empty());
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_large_delta_split_into_batches() {
        let (deck, automation) = keystroke_deck(4);
        deck.change_volume(150).unwrap();
        assert_eq!(automation.batches(), vec![64, 64, 22]);
        assert_eq!(automation.keys_for(WindowId(4)), vec!["Ctrl+Up"; 150]);
    }

    #[test]
    fn test_extreme_deltas_do_not_overflow() {
        // The fake refuses the very first press, so nothing near 2^31 keys is built
        let automation = Arc::new(RecordingAutomation::failing(WindowId(6), 0));
        let deck = Deck::new("left", WindowId(6), automation.clone(), Transport::Keystroke);

        for delta in [i32::MIN, i32::MAX] {
            assert!(matches!(deck.volume_down(delta), Err(ToolError::Failed { .. })));
            assert!(matches!(deck.volume_up(delta), Err(ToolError::Failed { .. })));
        }
        assert!(automation.presses().is_empty());
    }

    #[test]
    fn test_volume_down_of_negative_goes_up() {
        let (deck, automation) = keystroke_deck(2);
        deck.volume_down(-3).unwrap();
        assert_eq!(automation.keys_for(WindowId(2)), vec!["Ctrl+Up"; 3]);
    }

    #[test]
    fn test_step_count_matches_delta() {
        for delta in [-17, -5, -1, 1, 4, 25] {
            let (deck, automation) = keystroke_deck(3);
            deck.change_volume(delta).unwrap();
            let keys = automation.keys_for(WindowId(3));
            assert_eq!(keys.len(), delta.unsigned_abs() as usize);
            let expected = if delta > 0 { "Ctrl+Up" } else { "Ctrl+Down" };
            assert!(keys.iter().all(|k| k == expected));
        }
    }

    #[test]
    fn test_mute_equals_ten_steps_down() {
        let (muted, a) = keystroke_deck(5);
        let (stepped, b) = keystroke_deck(5);
        muted.mute().unwrap();
        stepped.change_volume(-10).unwrap();
        assert_eq!(a.presses(), b.presses());
        assert_eq!(a.presses().len(), 10);
    }

    #[test]
    fn test_volume_down_negates() {
        let (deck, automation) = keystroke_deck(9);
        deck.volume_down(2).unwrap();
        assert_eq!(automation.keys_for(WindowId(9)), vec!["Ctrl+Down"; 2]);
    }

    #[test]
    fn test_keystroke_toggle_sends_space() {
        let (deck, automation) = keystroke_deck(11);
        deck.toggle().unwrap();
        assert_eq!(automation.presses(), vec![(WindowId(11), "space".to_string())]);
    }

    #[test]
    fn test_keystroke_pause_unsupported() {
        let (deck, automation) = keystroke_deck(11);
        let err = deck.pause().unwrap_err();
        assert!(matches!(err, ToolError::Unsupported { operation: "pause", .. }));
        assert!(automation.presses().is_empty());
    }

    #[test]
    fn test_session_toggle_uses_messaging_only() {
        let automation = Arc::new(RecordingAutomation::new());
        let sent = Arc::new(Mutex::new(Vec::new()));
        let deck = Deck::new(
            "right",
            WindowId(8),
            automation.clone(),
            Transport::Session(Box::new(RecordingSession::new("bob", &sent))),
        );

        deck.toggle().unwrap();
        assert_eq!(
            *sent.lock().unwrap(),
            vec![("bob".to_string(), PlayerCommand::PlayPause)]
        );
        assert!(automation.presses().is_empty());

        deck.pause().unwrap();
        assert_eq!(sent.lock().unwrap().last().unwrap().1, PlayerCommand::Pause);
        assert!(deck.has_session_control());
        assert_eq!(deck.to_string(), "right(bob, 8)");
    }

    #[test]
    fn test_window_id_parse() {
        assert_eq!("123".parse::<WindowId>().unwrap(), WindowId(123));
        assert_eq!("0x1e".parse::<WindowId>().unwrap(), WindowId(30));
        assert!("window".parse::<WindowId>().is_err());
    }
}
