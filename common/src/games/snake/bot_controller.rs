use super::game_state::SnakeGameState;
use super::types::{Cell, Direction, Phase};

/// Greedy autopilot: heads for the food along the shortest Manhattan route
/// while avoiding walls and its own body one step ahead.
pub struct BotController;

impl BotController {
    pub fn calculate_move(state: &SnakeGameState) -> Option<Direction> {
        if state.phase() != Phase::Running {
            return None;
        }

        let head = state.snake().head();
        let food = state.food();
        let current_direction = state.direction();

        let safe_directions: Vec<Direction> = Self::get_valid_directions(current_direction)
            .into_iter()
            .filter(|&dir| Self::is_safe_position(head.step(dir), state))
            .collect();

        let best = safe_directions
            .iter()
            .copied()
            .min_by_key(|&dir| Self::route_cost(head.step(dir), food, current_direction, dir));

        Some(best.unwrap_or(current_direction))
    }

    fn get_valid_directions(current: Direction) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_opposite(&current))
            .collect()
    }

    /// Distance first; keeping the current heading breaks ties so the bot
    /// does not zig-zag.
    fn route_cost(next: Cell, food: Cell, current: Direction, dir: Direction) -> (u32, bool) {
        (next.manhattan_distance(food), dir != current)
    }

    fn is_safe_position(pos: Cell, state: &SnakeGameState) -> bool {
        state.field_size().contains(pos) && !state.snake().occupies(pos)
    }
}
