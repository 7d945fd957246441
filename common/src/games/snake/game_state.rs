use std::time::Duration;

use serde::Serialize;

use crate::games::session_rng::RandomSource;
use crate::log;
use super::settings::SnakeSettings;
use super::snake::Snake;
use super::types::{Cell, Direction, FieldSize, GameEndReason, Phase};

/// Random draws tried before food placement falls back to enumerating the
/// free cells.
const MAX_FOOD_DRAWS: usize = 100;

/// Immutable view handed to render sinks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub phase: Phase,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    pub steps: u32,
    pub food_eaten: u32,
    pub game_over: bool,
}

impl TickOutcome {
    pub fn changed(&self) -> bool {
        self.steps > 0 || self.game_over
    }
}

enum StepResult {
    Moved,
    Ate,
    Collided,
}

/// Rules engine for a single snake on a fixed grid.
///
/// Every `(phase, operation)` pair is defined: calls that make no sense in
/// the current phase return `false` or an empty [`TickOutcome`] and leave the
/// state untouched. A finished game stays in [`Phase::GameOver`]; hosts build
/// a new state to play again.
#[derive(Clone, Debug)]
pub struct SnakeGameState {
    settings: SnakeSettings,
    field_size: FieldSize,
    snake: Snake,
    direction: Direction,
    pending_direction: Direction,
    food: Cell,
    score: u32,
    move_interval: Duration,
    move_timer: Duration,
    phase: Phase,
    end_reason: Option<GameEndReason>,
}

impl SnakeGameState {
    /// Expects settings that passed [`Validate`](crate::config::Validate);
    /// otherwise the starting snake may lie outside the field.
    pub fn new<R: RandomSource + ?Sized>(settings: &SnakeSettings, rng: &mut R) -> Self {
        let direction = Direction::Right;
        let snake = Snake::new(
            settings.start_head(),
            direction,
            settings.initial_length as usize,
        );

        let mut state = Self {
            settings: settings.clone(),
            field_size: settings.field_size(),
            food: snake.head(),
            move_interval: settings.move_interval(snake.len()),
            snake,
            direction,
            pending_direction: direction,
            score: 0,
            move_timer: Duration::ZERO,
            phase: Phase::NotStarted,
            end_reason: None,
        };

        match state.place_food(rng) {
            Some(food) => state.food = food,
            None => state.end(GameEndReason::BoardFilled),
        }
        state
    }

    pub fn start(&mut self) -> bool {
        if self.phase != Phase::NotStarted {
            return false;
        }
        self.phase = Phase::Running;
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        self.phase = match self.phase {
            Phase::Running => Phase::Paused,
            Phase::Paused => Phase::Running,
            Phase::NotStarted | Phase::GameOver => return false,
        };
        true
    }

    /// Buffers `intent` for the next step. Reversing onto the neck is judged
    /// against the direction of the last step, not the buffered one.
    pub fn set_direction(&mut self, intent: Direction) -> bool {
        if self.phase != Phase::Running || intent.is_opposite(&self.direction) {
            return false;
        }
        self.pending_direction = intent;
        true
    }

    /// Advances game time. Runs as many steps as fit into the accumulated
    /// time, so splitting the same total into more calls gives the same
    /// result.
    pub fn tick<R: RandomSource + ?Sized>(&mut self, elapsed: Duration, rng: &mut R) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if self.phase != Phase::Running {
            return outcome;
        }

        self.move_timer = self.move_timer.saturating_add(elapsed);
        while self.move_timer >= self.move_interval {
            self.move_timer -= self.move_interval;

            match self.step(rng) {
                StepResult::Moved => outcome.steps += 1,
                StepResult::Ate => {
                    outcome.steps += 1;
                    outcome.food_eaten += 1;
                }
                StepResult::Collided => {}
            }

            if self.phase == Phase::GameOver {
                outcome.game_over = true;
                break;
            }
        }

        outcome
    }

    fn step<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> StepResult {
        self.direction = self.pending_direction;
        let new_head = self.snake.head().step(self.direction);

        if !self.field_size.contains(new_head) {
            self.end(GameEndReason::WallCollision);
            return StepResult::Collided;
        }

        // The tail still counts even though it would move away this step.
        if self.snake.occupies(new_head) {
            self.end(GameEndReason::SelfCollision);
            return StepResult::Collided;
        }

        self.snake.push_head(new_head);

        if new_head != self.food {
            self.snake.pop_tail();
            return StepResult::Moved;
        }

        self.score += 1;
        self.move_interval = self.settings.move_interval(self.snake.len());
        log!(
            "Ate food at ({}, {}). Score: {}, length: {}",
            new_head.x,
            new_head.y,
            self.score,
            self.snake.len()
        );

        match self.place_food(rng) {
            Some(food) => self.food = food,
            None => self.end(GameEndReason::BoardFilled),
        }
        StepResult::Ate
    }

    fn place_food<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if self.snake.len() >= self.field_size.cell_count() {
            return None;
        }

        let cols = self.field_size.cols as usize;
        let rows = self.field_size.rows as usize;

        for _ in 0..MAX_FOOD_DRAWS {
            let candidate = Cell::new(rng.next_index(cols) as i32, rng.next_index(rows) as i32);
            if !self.snake.occupies(candidate) {
                return Some(candidate);
            }
        }

        let free_cells: Vec<Cell> = (0..self.field_size.rows)
            .flat_map(|y| (0..self.field_size.cols).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.snake.occupies(*cell))
            .collect();

        if free_cells.is_empty() {
            return None;
        }
        Some(free_cells[rng.next_index(free_cells.len())])
    }

    fn end(&mut self, reason: GameEndReason) {
        self.phase = Phase::GameOver;
        self.end_reason = Some(reason);
        log!("Game over ({:?}). Final score: {}", reason, self.score);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            snake: self.snake.cells().collect(),
            food: self.food,
            score: self.score,
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Set once the game is over.
    pub fn final_score(&self) -> Option<u32> {
        (self.phase == Phase::GameOver).then_some(self.score)
    }

    pub fn end_reason(&self) -> Option<GameEndReason> {
        self.end_reason
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    pub fn move_interval(&self) -> Duration {
        self.move_interval
    }

    pub fn field_size(&self) -> FieldSize {
        self.field_size
    }

    pub fn settings(&self) -> &SnakeSettings {
        &self.settings
    }

    #[cfg(test)]
    pub(crate) fn set_snake(&mut self, cells: &[Cell], direction: Direction) {
        self.snake = Snake::from_cells(cells);
        self.direction = direction;
        self.pending_direction = direction;
        self.move_interval = self.settings.move_interval(self.snake.len());
    }

    #[cfg(test)]
    pub(crate) fn set_food(&mut self, food: Cell) {
        self.food = food;
    }
}
