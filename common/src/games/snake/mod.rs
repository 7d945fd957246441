mod bot_controller;
mod game_state;
mod input;
mod session;
mod settings;
mod snake;
mod types;

pub use bot_controller::BotController;
pub use game_state::{GameSnapshot, SnakeGameState, TickOutcome};
pub use input::{InputSignal, KeyInput};
pub use session::{GameOverCallback, RenderSink, SnakeSession};
pub use settings::SnakeSettings;
pub use snake::Snake;
pub use types::{Cell, Direction, FieldSize, GameEndReason, Phase};
