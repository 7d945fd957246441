use std::collections::VecDeque;
use std::time::Duration;

use snake_common::games::RandomSource;
use snake_common::games::snake::{
    BotController, InputSignal, KeyInput, Phase, RenderSink, SnakeGameState, SnakeSession,
};
use snake_common::high_score::HighScoreStore;
use snake_common::log;
use tokio::time::{Instant, MissedTickBehavior, interval};

/// Where the runner's input comes from.
pub enum Pilot {
    Autopilot,
    /// One key per frame, in order.
    Keys(VecDeque<KeyInput>),
}

impl Pilot {
    /// Parses a comma separated key script such as `space,w,w,d,p`.
    pub fn from_script(script: &str) -> Result<Self, String> {
        let keys = script
            .split(',')
            .filter(|token| !token.trim().is_empty())
            .map(str::parse::<KeyInput>)
            .collect::<Result<VecDeque<_>, _>>()?;
        Ok(Pilot::Keys(keys))
    }

    fn next_signal(&mut self, state: &SnakeGameState) -> Option<InputSignal> {
        match self {
            Pilot::Autopilot => match state.phase() {
                Phase::NotStarted => Some(InputSignal::Start),
                Phase::Paused => Some(InputSignal::TogglePause),
                Phase::GameOver => Some(InputSignal::Restart),
                Phase::Running => BotController::calculate_move(state).map(InputSignal::Turn),
            },
            Pilot::Keys(keys) => keys.pop_front().and_then(InputSignal::from_key),
        }
    }

    /// True once nothing further can happen without more input.
    fn is_idle(&self, phase: Phase) -> bool {
        match self {
            Pilot::Autopilot => false,
            Pilot::Keys(keys) => keys.is_empty() && phase != Phase::Running,
        }
    }
}

pub struct LoopOptions {
    pub frame_interval: Duration,
    pub games: u32,
    /// Feed `frame_interval` per frame without waiting on the clock.
    pub simulate: bool,
    pub max_frames: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct LoopSummary {
    pub scores: Vec<u32>,
    pub frames: u64,
}

pub async fn run_games<TRng, TStore, TSink>(
    session: &mut SnakeSession<TRng, TStore, TSink>,
    mut pilot: Pilot,
    options: &LoopOptions,
) -> LoopSummary
where
    TRng: RandomSource,
    TStore: HighScoreStore,
    TSink: RenderSink,
{
    let mut summary = LoopSummary::default();
    let mut frame_timer = interval(options.frame_interval);
    frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_frame = Instant::now();

    while summary.frames < options.max_frames {
        let elapsed = if options.simulate {
            options.frame_interval
        } else {
            frame_timer.tick().await;
            let now = Instant::now();
            let elapsed = now - last_frame;
            last_frame = now;
            elapsed
        };
        summary.frames += 1;

        if let Some(signal) = pilot.next_signal(session.state()) {
            session.handle_input(signal);
        }

        let outcome = session.advance(elapsed);
        if outcome.game_over {
            let score = session.state().score();
            summary.scores.push(score);
            log!(
                "Game {} finished after {} frames. Score: {}",
                summary.scores.len(),
                summary.frames,
                score
            );
            if summary.scores.len() >= options.games as usize {
                return summary;
            }
        }

        if pilot.is_idle(session.phase()) {
            log!("Key script exhausted");
            return summary;
        }
    }

    log!("Stopped after {} frames", summary.frames);
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use snake_common::games::SessionRng;
    use snake_common::games::snake::{Cell, Direction, GameSnapshot, SnakeSettings};
    use snake_common::high_score::InMemoryHighScoreStore;

    type Frames = Vec<GameSnapshot>;

    fn create_session(
        seed: u64,
    ) -> SnakeSession<SessionRng, InMemoryHighScoreStore, impl FnMut(&GameSnapshot, u32)> {
        SnakeSession::new(
            SnakeSettings::default(),
            SessionRng::new(seed),
            InMemoryHighScoreStore::default(),
            |_: &GameSnapshot, _: u32| {},
        )
    }

    fn simulated(games: u32, max_frames: u64) -> LoopOptions {
        LoopOptions {
            frame_interval: Duration::from_millis(50),
            games,
            simulate: true,
            max_frames,
        }
    }

    #[test]
    fn test_parse_key_script() {
        let Ok(Pilot::Keys(keys)) = Pilot::from_script("space, w ,d,,p") else {
            panic!("script should parse");
        };
        assert_eq!(
            keys,
            VecDeque::from(vec![
                KeyInput::Space,
                KeyInput::Char('w'),
                KeyInput::Char('d'),
                KeyInput::Char('p'),
            ])
        );
        assert!(Pilot::from_script("space,jump").is_err());
    }

    #[tokio::test]
    async fn test_autopilot_plays_requested_games() {
        let mut session = create_session(42);
        let summary = run_games(&mut session, Pilot::Autopilot, &simulated(2, 1_000_000)).await;

        assert_eq!(summary.scores.len(), 2);
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.high_score(), summary.scores.iter().copied().max().unwrap());
    }

    #[tokio::test]
    async fn test_key_script_drives_the_session() {
        let mut session = create_session(1);
        let pilot = Pilot::from_script("space,w,a,p").unwrap();
        let summary = run_games(&mut session, pilot, &simulated(1, 100)).await;

        assert!(summary.scores.is_empty());
        assert_eq!(summary.frames, 4);
        assert_eq!(session.phase(), Phase::Paused);
        // No step happened yet, so Left still reversed the committed Right.
        assert_eq!(session.state().direction(), Direction::Right);
        assert_eq!(session.state().pending_direction(), Direction::Up);
    }

    #[tokio::test]
    async fn test_max_frames_bounds_the_loop() {
        let mut session = create_session(3);
        let summary = run_games(&mut session, Pilot::Autopilot, &simulated(1, 5)).await;

        assert_eq!(summary.frames, 5);
        assert!(summary.scores.is_empty());
    }

    #[tokio::test]
    async fn test_frames_are_rendered() {
        let mut frames: Frames = Vec::new();
        {
            let mut session = SnakeSession::new(
                SnakeSettings::default(),
                SessionRng::new(9),
                InMemoryHighScoreStore::default(),
                |snapshot: &GameSnapshot, _: u32| frames.push(snapshot.clone()),
            );
            run_games(&mut session, Pilot::Autopilot, &simulated(1, 10)).await;
        }

        assert_eq!(frames[0].phase, Phase::NotStarted);
        assert_eq!(frames[0].snake[0], Cell::new(5, 10));
        assert!(frames.iter().any(|f| f.phase == Phase::Running));
    }
}
