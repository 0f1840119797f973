//! Alternating turn invariant: players alternate A, B, A, B, ...

use super::Invariant;
use crate::engine::TurnEngine;
use crate::phase::Phase;
use crate::types::Player;

/// Invariant: players alternate turns.
///
/// History must show A, B, A, B, ... and, while waiting for input, the
/// player on turn must be the one the history implies.
pub struct AlternatingTurnInvariant;

impl Invariant<TurnEngine> for AlternatingTurnInvariant {
    fn holds(engine: &TurnEngine) -> bool {
        let history = engine.history();

        if let Some(first) = history.first()
            && first.player != Player::A
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        match engine.phase() {
            Phase::AwaitingTurn { player } => {
                let expected = if history.len() % 2 == 0 {
                    Player::A
                } else {
                    Player::B
                };
                *player == expected && engine.active_player() == expected
            }
            _ => true,
        }
    }

    fn description() -> &'static str {
        "Players alternate turns (A, B, A, B, ...)"
    }
}
