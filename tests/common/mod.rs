#![allow(dead_code)]

use std::collections::HashSet;

use tile_snake::game::GameState;
use tile_snake::input::{Direction, InputProbe, Key};

/// Fixed set of held arrows and edge presses for one frame.
#[derive(Debug, Default)]
pub struct Keys {
    held: HashSet<Direction>,
    pressed: HashSet<Key>,
}

impl Keys {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn holding(direction: Direction) -> Self {
        Self {
            held: HashSet::from([direction]),
            pressed: HashSet::new(),
        }
    }

    pub fn pressing(key: Key) -> Self {
        Self {
            held: HashSet::new(),
            pressed: HashSet::from([key]),
        }
    }

    /// Holds the arrows that steer the head toward the current food.
    pub fn toward_food(state: &GameState) -> Self {
        let head = state.snake.head();
        let food = state.food.position;
        let mut held = HashSet::new();

        if food.x < head.x {
            held.insert(Direction::Left);
        } else if food.x > head.x {
            held.insert(Direction::Right);
        }
        if food.y < head.y {
            held.insert(Direction::Up);
        } else if food.y > head.y {
            held.insert(Direction::Down);
        }

        Self {
            held,
            pressed: HashSet::new(),
        }
    }
}

impl InputProbe for Keys {
    fn is_held(&self, direction: Direction) -> bool {
        self.held.contains(&direction)
    }

    fn was_just_pressed(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }
}
