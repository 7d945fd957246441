use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::Validate;
use super::types::{Cell, FieldSize};

/// Tunables for one game. Defaults reproduce the classic 20x20 board.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnakeSettings {
    pub cols: u32,
    pub rows: u32,
    pub initial_length: u32,
    /// Steps per second at the starting length.
    pub base_speed: f64,
    /// Extra steps per second for every segment beyond the starting three.
    pub speed_step: f64,
}

impl Default for SnakeSettings {
    fn default() -> Self {
        Self {
            cols: 20,
            rows: 20,
            initial_length: 3,
            base_speed: 6.0,
            speed_step: 0.4,
        }
    }
}

const MIN_FIELD_SIDE: u32 = 5;
const MAX_FIELD_SIDE: u32 = 100;
const SPEED_FREE_LENGTH: usize = 3;
const HEAD_OFFSET: u32 = 2;
/// Steps per second allowed at the longest snake the field can hold.
pub const MAX_STEPS_PER_SECOND: f64 = 1000.0;
const MIN_MOVE_INTERVAL: Duration = Duration::from_nanos(1);

impl SnakeSettings {
    pub fn field_size(&self) -> FieldSize {
        FieldSize {
            cols: self.cols as i32,
            rows: self.rows as i32,
        }
    }

    /// Starting head cell; the body trails to the left of it.
    pub fn start_head(&self) -> Cell {
        Cell::new((self.initial_length + HEAD_OFFSET) as i32, (self.rows / 2) as i32)
    }

    /// Time between steps for a snake of `length` segments. Unvalidated
    /// non-positive speeds yield `Duration::MAX`, i.e. the snake never moves.
    /// Never shorter than one nanosecond.
    pub fn move_interval(&self, length: usize) -> Duration {
        Duration::try_from_secs_f64(1.0 / self.speed_at(length))
            .unwrap_or(Duration::MAX)
            .max(MIN_MOVE_INTERVAL)
    }

    fn speed_at(&self, length: usize) -> f64 {
        let extra = length.saturating_sub(SPEED_FREE_LENGTH) as f64;
        self.base_speed + extra * self.speed_step
    }

    /// Speed reached once the snake covers the whole field.
    pub fn top_speed(&self) -> f64 {
        self.speed_at((self.cols as usize) * (self.rows as usize))
    }
}

impl Validate for SnakeSettings {
    fn validate(&self) -> Result<(), String> {
        if !(MIN_FIELD_SIDE..=MAX_FIELD_SIDE).contains(&self.cols)
            || !(MIN_FIELD_SIDE..=MAX_FIELD_SIDE).contains(&self.rows)
        {
            return Err(format!(
                "field must be between {min}x{min} and {max}x{max}, got {}x{}",
                self.cols,
                self.rows,
                min = MIN_FIELD_SIDE,
                max = MAX_FIELD_SIDE,
            ));
        }
        if self.initial_length < 3 {
            return Err("initial_length must be at least 3".to_string());
        }
        if self.initial_length + HEAD_OFFSET >= self.cols {
            return Err(format!(
                "initial_length {} does not fit a field {} cells wide",
                self.initial_length, self.cols
            ));
        }
        if !self.base_speed.is_finite() || self.base_speed <= 0.0 {
            return Err("base_speed must be greater than 0".to_string());
        }
        if !self.speed_step.is_finite() || self.speed_step < 0.0 {
            return Err("speed_step must not be negative".to_string());
        }
        let top_speed = self.top_speed();
        if top_speed > MAX_STEPS_PER_SECOND {
            return Err(format!(
                "speed on a full field would be {:.1} steps/s, at most {} allowed",
                top_speed, MAX_STEPS_PER_SECOND
            ));
        }
        Ok(())
    }
}
