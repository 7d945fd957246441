use std::time::Duration;

use crate::games::session_rng::RandomSource;
use crate::high_score::HighScoreStore;
use crate::log;
use super::game_state::{GameSnapshot, SnakeGameState, TickOutcome};
use super::input::InputSignal;
use super::settings::SnakeSettings;
use super::types::Phase;

pub trait RenderSink {
    fn render(&mut self, snapshot: &GameSnapshot, high_score: u32);
}

impl<F> RenderSink for F
where
    F: FnMut(&GameSnapshot, u32),
{
    fn render(&mut self, snapshot: &GameSnapshot, high_score: u32) {
        self(snapshot, high_score)
    }
}

/// Receives the final score once per finished game. An `Err` is logged and
/// otherwise ignored.
pub type GameOverCallback = Box<dyn FnMut(u32) -> Result<(), String>>;

/// Owns one game plus the collaborators around it: randomness, high-score
/// persistence, rendering and the game-over notification.
///
/// Collaborator failures stop here; they are logged and never reach the game
/// state.
pub struct SnakeSession<TRng, TStore, TSink>
where
    TRng: RandomSource,
    TStore: HighScoreStore,
    TSink: RenderSink,
{
    settings: SnakeSettings,
    state: SnakeGameState,
    rng: TRng,
    store: TStore,
    sink: TSink,
    on_game_over: Option<GameOverCallback>,
    high_score: u32,
    game_over_reported: bool,
}

impl<TRng, TStore, TSink> SnakeSession<TRng, TStore, TSink>
where
    TRng: RandomSource,
    TStore: HighScoreStore,
    TSink: RenderSink,
{
    pub fn new(settings: SnakeSettings, mut rng: TRng, mut store: TStore, sink: TSink) -> Self {
        let high_score = load_high_score(&mut store);
        let state = SnakeGameState::new(&settings, &mut rng);

        let mut session = Self {
            settings,
            state,
            rng,
            store,
            sink,
            on_game_over: None,
            high_score,
            game_over_reported: false,
        };
        session.render();
        session
    }

    pub fn with_game_over_callback(
        mut self,
        callback: impl FnMut(u32) -> Result<(), String> + 'static,
    ) -> Self {
        self.on_game_over = Some(Box::new(callback));
        self
    }

    /// Returns whether the signal had any effect.
    pub fn handle_input(&mut self, signal: InputSignal) -> bool {
        let changed = match signal {
            InputSignal::Turn(direction) => return self.state.set_direction(direction),
            InputSignal::Start => self.state.start(),
            InputSignal::TogglePause => self.state.toggle_pause(),
            InputSignal::Restart => self.restart(),
        };

        if changed {
            self.render();
        }
        changed
    }

    pub fn advance(&mut self, elapsed: Duration) -> TickOutcome {
        let outcome = self.state.tick(elapsed, &mut self.rng);

        if outcome.game_over {
            self.finish_game();
        }
        if outcome.changed() {
            self.render();
        }
        outcome
    }

    fn restart(&mut self) -> bool {
        if self.state.phase() != Phase::GameOver {
            return false;
        }

        self.high_score = self.high_score.max(load_high_score(&mut self.store));
        self.state = SnakeGameState::new(&self.settings, &mut self.rng);
        self.game_over_reported = false;
        true
    }

    fn finish_game(&mut self) {
        if self.game_over_reported {
            return;
        }
        self.game_over_reported = true;

        let final_score = self.state.final_score().unwrap_or(self.state.score());
        if final_score > self.high_score {
            self.high_score = final_score;
            log!("New high score: {}", final_score);
            if let Err(e) = self.store.save(final_score) {
                log!("Failed to save high score: {}", e);
            }
        }

        if let Some(callback) = self.on_game_over.as_mut()
            && let Err(e) = callback(final_score)
        {
            log!("Game over callback failed: {}", e);
        }
    }

    fn render(&mut self) {
        let snapshot = self.state.snapshot();
        self.sink.render(&snapshot, self.high_score);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn state(&self) -> &SnakeGameState {
        &self.state
    }

    pub fn sink(&self) -> &TSink {
        &self.sink
    }

    pub fn store(&self) -> &TStore {
        &self.store
    }
}

fn load_high_score<TStore: HighScoreStore>(store: &mut TStore) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(e) => {
            log!("Failed to load high score, starting from 0: {}", e);
            0
        }
    }
}
