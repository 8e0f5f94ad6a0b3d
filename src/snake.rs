use std::collections::VecDeque;
use std::ops::Add;

use crate::config::GridSize;
use crate::input::Direction;

/// Grid position in logical cell coordinates. Doubles as a unit step vector.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Returns true when the point lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

/// Ordered chain of body cells, a heading and pending growth.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Snake {
    body: VecDeque<Point>,
    direction: Direction,
    grow_counter: u32,
}

impl Snake {
    /// Creates the one-cell starting snake at the centre of `grid`, heading right.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self::at(grid.center(), Direction::Right)
    }

    /// Creates a one-cell snake at `start` with the provided direction.
    #[must_use]
    pub fn at(start: Point, direction: Direction) -> Self {
        let mut body = VecDeque::new();
        body.push_front(start);

        Self {
            body,
            direction,
            grow_counter: 0,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Point>, direction: Direction) -> Self {
        assert!(!segments.is_empty(), "a snake needs at least one segment");

        Self {
            body: VecDeque::from(segments),
            direction,
            grow_counter: 0,
        }
    }

    /// Queues a single cell of growth for the next advance.
    pub fn grow_next(&mut self) {
        self.grow_counter = 1;
    }

    /// Advances one cell along the current heading.
    ///
    /// The tail is kept while growth is pending, so the body lengthens by one
    /// for every pending growth tick and otherwise keeps its length.
    pub fn move_forward(&mut self) {
        let next_head = self.head() + self.direction.delta();
        self.body.push_front(next_head);

        if self.grow_counter > 0 {
            self.grow_counter -= 1;
        } else {
            let _ = self.body.pop_back();
        }
    }

    /// Changes heading when `direction` is perpendicular to the current one.
    ///
    /// Returns true when the heading changed.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !self.direction.is_perpendicular_to(direction) {
            return false;
        }

        self.direction = direction;
        true
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Point {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if the head overlaps any non-head segment.
    #[must_use]
    pub fn head_overlaps_body(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| *segment == head)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the number of upcoming advances that keep the tail.
    #[must_use]
    pub fn grow_counter(&self) -> u32 {
        self.grow_counter
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }
}
