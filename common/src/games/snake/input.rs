use std::str::FromStr;

use super::types::Direction;

/// Discrete request delivered by an input source to a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSignal {
    Turn(Direction),
    Start,
    TogglePause,
    Restart,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Enter,
    Char(char),
}

impl InputSignal {
    /// Arrows and WASD steer, Space/Enter start, P pauses, R restarts.
    pub fn from_key(key: KeyInput) -> Option<Self> {
        let signal = match key {
            KeyInput::ArrowUp => InputSignal::Turn(Direction::Up),
            KeyInput::ArrowDown => InputSignal::Turn(Direction::Down),
            KeyInput::ArrowLeft => InputSignal::Turn(Direction::Left),
            KeyInput::ArrowRight => InputSignal::Turn(Direction::Right),
            KeyInput::Space | KeyInput::Enter => InputSignal::Start,
            KeyInput::Char(c) => match c.to_ascii_lowercase() {
                'w' => InputSignal::Turn(Direction::Up),
                's' => InputSignal::Turn(Direction::Down),
                'a' => InputSignal::Turn(Direction::Left),
                'd' => InputSignal::Turn(Direction::Right),
                'p' => InputSignal::TogglePause,
                'r' => InputSignal::Restart,
                ' ' => InputSignal::Start,
                _ => return None,
            },
        };
        Some(signal)
    }
}

impl FromStr for KeyInput {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token.to_ascii_lowercase().as_str() {
            "up" => Ok(KeyInput::ArrowUp),
            "down" => Ok(KeyInput::ArrowDown),
            "left" => Ok(KeyInput::ArrowLeft),
            "right" => Ok(KeyInput::ArrowRight),
            "space" => Ok(KeyInput::Space),
            "enter" => Ok(KeyInput::Enter),
            _ => {
                let mut chars = token.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(KeyInput::Char(c)),
                    _ => Err(format!("Unknown key: '{}'", token)),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows_map_to_the_same_turns() {
        let pairs = [
            (KeyInput::ArrowUp, 'w'),
            (KeyInput::ArrowDown, 's'),
            (KeyInput::ArrowLeft, 'a'),
            (KeyInput::ArrowRight, 'd'),
        ];
        for (arrow, letter) in pairs {
            assert_eq!(
                InputSignal::from_key(arrow),
                InputSignal::from_key(KeyInput::Char(letter))
            );
            assert_eq!(
                InputSignal::from_key(KeyInput::Char(letter)),
                InputSignal::from_key(KeyInput::Char(letter.to_ascii_uppercase()))
            );
        }
    }

    #[test]
    fn test_control_keys() {
        assert_eq!(InputSignal::from_key(KeyInput::Space), Some(InputSignal::Start));
        assert_eq!(InputSignal::from_key(KeyInput::Enter), Some(InputSignal::Start));
        assert_eq!(
            InputSignal::from_key(KeyInput::Char('P')),
            Some(InputSignal::TogglePause)
        );
        assert_eq!(InputSignal::from_key(KeyInput::Char('r')), Some(InputSignal::Restart));
        assert_eq!(InputSignal::from_key(KeyInput::Char('x')), None);
    }

    #[test]
    fn test_parse_key_tokens() {
        assert_eq!("Up".parse::<KeyInput>(), Ok(KeyInput::ArrowUp));
        assert_eq!(" enter ".parse::<KeyInput>(), Ok(KeyInput::Enter));
        assert_eq!("d".parse::<KeyInput>(), Ok(KeyInput::Char('d')));
        assert!("dd".parse::<KeyInput>().is_err());
        assert!("".parse::<KeyInput>().is_err());
    }
}
