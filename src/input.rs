use std::collections::{HashMap, HashSet};
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::config::KEY_HOLD_FALLBACK;
use crate::snake::Point;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Order in which held arrows are considered on a simulation step.
    pub const LATCH_ORDER: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the unit step added to the head on each advance.
    #[must_use]
    pub fn delta(self) -> Point {
        match self {
            Self::Up => Point { x: 0, y: -1 },
            Self::Down => Point { x: 0, y: 1 },
            Self::Left => Point { x: -1, y: 0 },
            Self::Right => Point { x: 1, y: 0 },
        }
    }

    #[must_use]
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// Returns true when the two headings lie on different axes.
    #[must_use]
    pub fn is_perpendicular_to(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

/// Keys the simulation asks the input probe about.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    R,
}

impl Key {
    fn from_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left => Some(Self::Left),
            KeyCode::Right => Some(Self::Right),
            KeyCode::Up => Some(Self::Up),
            KeyCode::Down => Some(Self::Down),
            KeyCode::Char('r' | 'R') => Some(Self::R),
            _ => None,
        }
    }
}

impl From<Direction> for Key {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Self::Up,
            Direction::Down => Self::Down,
            Direction::Left => Self::Left,
            Direction::Right => Self::Right,
        }
    }
}

/// Read-only view of the keyboard consumed by the simulation.
pub trait InputProbe {
    /// Level signal: true while the arrow for `direction` is held.
    fn is_held(&self, direction: Direction) -> bool;

    /// Edge signal: true only on the frame where `key` went from released to
    /// pressed.
    fn was_just_pressed(&self, key: Key) -> bool;
}

/// Input probe fed from crossterm key events.
///
/// Terminals without release reporting only send presses and auto-repeats,
/// so a key is then treated as held until [`KEY_HOLD_FALLBACK`] has passed
/// since its last press.
#[derive(Debug)]
pub struct KeyboardProbe {
    reports_release: bool,
    held: HashMap<Key, Instant>,
    just_pressed: HashSet<Key>,
    close_requested: bool,
}

impl KeyboardProbe {
    #[must_use]
    pub fn new(reports_release: bool) -> Self {
        Self {
            reports_release,
            held: HashMap::new(),
            just_pressed: HashSet::new(),
            close_requested: false,
        }
    }

    /// Records one key event observed at `now`.
    pub fn handle_key_event(&mut self, event: KeyEvent, now: Instant) {
        if event.kind == KeyEventKind::Press && is_close_key(event) {
            self.close_requested = true;
            return;
        }

        let Some(key) = Key::from_code(event.code) else {
            return;
        };

        match event.kind {
            KeyEventKind::Press => {
                if self.held.insert(key, now).is_none() {
                    self.just_pressed.insert(key);
                }
            }
            KeyEventKind::Repeat => {
                self.held.insert(key, now);
            }
            KeyEventKind::Release => {
                self.held.remove(&key);
            }
        }
    }

    /// Releases keys whose fallback hold window has run out.
    pub fn expire_stale(&mut self, now: Instant) {
        if self.reports_release {
            return;
        }

        self.held.retain(|_, last_seen| {
            now.saturating_duration_since(*last_seen) < KEY_HOLD_FALLBACK
        });
    }

    /// Clears edge events once the frame that could observe them is over.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Returns true after `Esc`, `q` or `Ctrl+C` was pressed.
    #[must_use]
    pub fn close_requested(&self) -> bool {
        self.close_requested
    }
}

impl InputProbe for KeyboardProbe {
    fn is_held(&self, direction: Direction) -> bool {
        self.held.contains_key(&Key::from(direction))
    }

    fn was_just_pressed(&self, key: Key) -> bool {
        self.just_pressed.contains(&key)
    }
}

fn is_close_key(event: KeyEvent) -> bool {
    match event.code {
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    use super::{Direction, InputProbe, Key, KeyboardProbe};
    use crate::config::KEY_HOLD_FALLBACK;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn deltas_are_unit_axis_vectors() {
        for direction in Direction::LATCH_ORDER {
            let delta = direction.delta();
            assert_eq!(delta.x.abs() + delta.y.abs(), 1);
        }
    }

    #[test]
    fn perpendicular_only_across_axes() {
        assert!(Direction::Up.is_perpendicular_to(Direction::Left));
        assert!(Direction::Right.is_perpendicular_to(Direction::Down));
        assert!(!Direction::Right.is_perpendicular_to(Direction::Left));
        assert!(!Direction::Up.is_perpendicular_to(Direction::Up));
    }

    #[test]
    fn press_is_an_edge_only_once() {
        let now = Instant::now();
        let mut probe = KeyboardProbe::new(true);

        probe.handle_key_event(key(KeyCode::Char('r'), KeyEventKind::Press), now);
        assert!(probe.was_just_pressed(Key::R));

        probe.end_frame();
        assert!(!probe.was_just_pressed(Key::R));

        probe.handle_key_event(key(KeyCode::Char('r'), KeyEventKind::Repeat), now);
        assert!(!probe.was_just_pressed(Key::R));
    }

    #[test]
    fn release_events_end_the_hold() {
        let now = Instant::now();
        let mut probe = KeyboardProbe::new(true);

        probe.handle_key_event(key(KeyCode::Left, KeyEventKind::Press), now);
        assert!(probe.is_held(Direction::Left));
        assert!(!probe.is_held(Direction::Right));

        probe.expire_stale(now + KEY_HOLD_FALLBACK * 10);
        assert!(probe.is_held(Direction::Left));

        probe.handle_key_event(key(KeyCode::Left, KeyEventKind::Release), now);
        assert!(!probe.is_held(Direction::Left));
    }

    #[test]
    fn fallback_hold_expires_without_release_events() {
        let start = Instant::now();
        let mut probe = KeyboardProbe::new(false);

        probe.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), start);
        probe.expire_stale(start + Duration::from_millis(50));
        assert!(probe.is_held(Direction::Up));

        // An auto-repeat arrives as another press and must not re-trigger the edge.
        probe.end_frame();
        let repeat_at = start + Duration::from_millis(100);
        probe.handle_key_event(key(KeyCode::Up, KeyEventKind::Press), repeat_at);
        assert!(!probe.was_just_pressed(Key::Up));

        probe.expire_stale(repeat_at + KEY_HOLD_FALLBACK);
        assert!(!probe.is_held(Direction::Up));
    }

    #[test]
    fn close_keys_request_close() {
        let now = Instant::now();

        let mut probe = KeyboardProbe::new(false);
        probe.handle_key_event(key(KeyCode::Esc, KeyEventKind::Press), now);
        assert!(probe.close_requested());

        let mut probe = KeyboardProbe::new(false);
        let mut ctrl_c = key(KeyCode::Char('c'), KeyEventKind::Press);
        ctrl_c.modifiers = KeyModifiers::CONTROL;
        probe.handle_key_event(ctrl_c, now);
        assert!(probe.close_requested());

        let mut probe = KeyboardProbe::new(false);
        probe.handle_key_event(key(KeyCode::Char('c'), KeyEventKind::Press), now);
        assert!(!probe.close_requested());
    }
}
