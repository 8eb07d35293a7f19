//! Keyboard mapping

use crate::sim::{Move, TickInput};

/// Map a DOM `KeyboardEvent.key` value to frame input. Unknown keys map to
/// `None`; Enter only skips the level when debugging is enabled.
pub fn key_to_input(key: &str, debug: bool) -> Option<TickInput> {
    let step = match key {
        "ArrowLeft" | "a" | "A" => Move::Left,
        "ArrowUp" | "w" | "W" => Move::Up,
        "ArrowRight" | "d" | "D" => Move::Right,
        "ArrowDown" | "s" | "S" => Move::Down,
        "Enter" if debug => {
            return Some(TickInput {
                step: None,
                advance_level: true,
            });
        }
        _ => return None,
    };
    Some(TickInput {
        step: Some(step),
        advance_level: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_and_wasd() {
        let step = |key| key_to_input(key, false).and_then(|i| i.step);
        assert_eq!(step("ArrowUp"), Some(Move::Up));
        assert_eq!(step("s"), Some(Move::Down));
        assert_eq!(step("A"), Some(Move::Left));
        assert_eq!(step("ArrowRight"), Some(Move::Right));
    }

    #[test]
    fn test_enter_needs_debug() {
        assert!(key_to_input("Enter", false).is_none());
        let input = key_to_input("Enter", true).unwrap();
        assert!(input.advance_level);
        assert!(input.step.is_none());
    }

    #[test]
    fn test_unknown_keys_ignored() {
        assert!(key_to_input("q", true).is_none());
        assert!(key_to_input(" ", false).is_none());
    }
}
