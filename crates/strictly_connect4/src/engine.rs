//! Frame-driven turn engine.
//!
//! The engine owns the board, the phase and the drop history. Callers feed
//! it drop requests and one `tick` per rendered frame; everything it
//! publishes back is a clone.

use crate::action::{DropRecord, DropRequest, DropResponse, RejectReason};
use crate::board::Board;
use crate::config::EngineConfig;
use crate::error::{DropError, EngineError};
use crate::gate::AnimationGate;
use crate::phase::{Phase, PhaseSnapshot};
use crate::rules::{self, Landing, WinOutcome};
use crate::types::Player;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Turn-based state machine for one connect-four table.
///
/// Starts in [`Phase::AwaitingTurn`] for [`Player::A`]. A drop moves it to
/// [`Phase::Dropping`] until the animation gate reports the piece at rest,
/// then the mark is committed and the board scanned. A finished game
/// restarts by itself once `restart_delay` of engine time has passed.
#[derive(Debug, Clone)]
pub struct TurnEngine {
    config: EngineConfig,
    pub(crate) board: Board,
    pub(crate) phase: Phase,
    pub(crate) active: Player,
    pub(crate) history: Vec<DropRecord>,
    clock: Duration,
}

impl TurnEngine {
    /// Creates an engine with an empty board.
    ///
    /// The configuration is validated when it is built, so this cannot fail.
    #[instrument(skip(config), fields(width = config.width(), height = config.height()))]
    pub fn new(config: EngineConfig) -> Self {
        let board = Board::new(*config.width(), *config.height());
        Self {
            config,
            board,
            phase: Phase::AwaitingTurn { player: Player::A },
            active: Player::A,
            history: Vec::new(),
            clock: Duration::ZERO,
        }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the active phase.
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Player on turn, or the player who moved last once the game ended.
    pub fn active_player(&self) -> Player {
        self.active
    }

    /// Drops committed since the last restart, oldest first.
    pub fn history(&self) -> &[DropRecord] {
        &self.history
    }

    /// Total engine time fed through [`TurnEngine::tick`].
    pub fn clock(&self) -> Duration {
        self.clock
    }

    /// Requests a drop into `column` for the player on turn.
    ///
    /// # Errors
    ///
    /// [`DropError::InvalidColumn`] if `column` is off the board, whatever the
    /// phase. Full columns and drops outside [`Phase::AwaitingTurn`] are
    /// ordinary rejections, not errors.
    #[instrument(skip(self))]
    pub fn request_drop(&mut self, column: usize) -> Result<DropResponse, DropError> {
        self.submit(DropRequest::new(self.active, column))
    }

    /// Submits a drop on behalf of a specific player.
    ///
    /// Same as [`TurnEngine::request_drop`], but a request from the player
    /// who is not on turn is rejected with [`RejectReason::WrongPlayer`].
    #[instrument(skip(self), fields(request = %request))]
    pub fn submit(&mut self, request: DropRequest) -> Result<DropResponse, DropError> {
        let width = self.board.width();
        if request.column >= width {
            warn!(column = request.column, width, "Drop into invalid column");
            return Err(DropError::InvalidColumn {
                column: request.column,
                width,
            });
        }

        let Phase::AwaitingTurn { player } = self.phase else {
            debug!(phase = %self.phase, "Drop ignored");
            return Ok(DropResponse::Rejected(RejectReason::NotAcceptingInput));
        };

        if request.player != player {
            warn!(on_turn = %player, "Drop from wrong player");
            return Ok(DropResponse::Rejected(RejectReason::WrongPlayer(request.player)));
        }

        match rules::resolve(&self.board, request.column)? {
            Landing::NoSpace => {
                warn!(column = request.column, "Drop into full column");
                Ok(DropResponse::Rejected(RejectReason::ColumnFull(request.column)))
            }
            Landing::Row(row) => {
                self.phase = Phase::Dropping {
                    player,
                    column: request.column,
                    row,
                };
                debug!(row, "Piece dropping");
                Ok(DropResponse::Accepted {
                    player,
                    column: request.column,
                    row,
                })
            }
        }
    }

    /// Advances the engine by one frame.
    ///
    /// `delta` is added to the engine clock first. `piece_at_rest` is the
    /// animation gate's answer for this frame and only matters while a
    /// piece is dropping. At most one externally driven transition happens
    /// per call; transient phases resolve within it.
    ///
    /// # Errors
    ///
    /// [`EngineError::Board`] if the commit is refused by the board, and
    /// (debug builds) [`EngineError::InvariantViolation`] if a post-commit
    /// invariant fails. Either means the engine itself is wrong. A refused
    /// commit discards the drop and hands the turn back to the same player;
    /// [`TurnEngine::restart`] recovers from anything else.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn tick(&mut self, delta: Duration, piece_at_rest: bool) -> Result<PhaseSnapshot, EngineError> {
        self.clock = self.clock.saturating_add(delta);

        match self.phase {
            Phase::Dropping { player, column, row } if piece_at_rest => {
                self.phase = Phase::Resolved { player, row, column };
                self.commit()?;
            }
            Phase::Won { since, .. } | Phase::Draw { since }
                if self.clock.saturating_sub(since) >= self.config.restart_delay() =>
            {
                self.restart();
            }
            _ => {}
        }

        Ok(self.current_phase())
    }

    /// Advances one frame, reading the landing signal from `gate`.
    pub fn tick_with<G: AnimationGate + ?Sized>(
        &mut self,
        delta: Duration,
        gate: &G,
    ) -> Result<PhaseSnapshot, EngineError> {
        self.tick(delta, gate.piece_at_rest())
    }

    /// Writes the resolved piece and decides what comes next.
    fn commit(&mut self) -> Result<(), EngineError> {
        let Phase::Resolved { player, row, column } = self.phase else {
            return Ok(());
        };

        if let Err(e) = self.board.set(row, column, player.mark()) {
            warn!(%e, %player, "Commit refused, drop discarded");
            self.phase = Phase::AwaitingTurn { player };
            return Err(e.into());
        }
        self.history.push(DropRecord::new(player, row, column));
        debug!(%player, row, column, "Committed drop");

        self.phase = match rules::scan(&self.board, *self.config.run_length()) {
            WinOutcome::Win { player: winner, line } => {
                info!(winner = %winner, ?line, drops = self.history.len(), "Game won");
                Phase::Won {
                    player: winner,
                    line,
                    since: self.clock,
                }
            }
            WinOutcome::Draw => {
                info!(drops = self.history.len(), "Game drawn");
                Phase::Draw { since: self.clock }
            }
            WinOutcome::Ongoing => {
                self.active = player.opponent();
                Phase::AwaitingTurn { player: self.active }
            }
        };

        #[cfg(debug_assertions)]
        self.verify_invariants()?;

        Ok(())
    }

    #[cfg(debug_assertions)]
    fn verify_invariants(&self) -> Result<(), EngineError> {
        use crate::invariants::{EngineInvariants, InvariantSet};

        EngineInvariants::check_all(self).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Post-commit invariant failed");
            EngineError::InvariantViolation(descriptions)
        })
    }

    /// Clears the board and hands the first turn back to [`Player::A`].
    ///
    /// Called automatically once a finished game has been shown for the
    /// restart delay; callers may also restart at any point.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn restart(&mut self) {
        self.phase = Phase::RestartPending { since: self.clock };
        debug!(drops = self.history.len(), "Clearing board");
        self.board.reset();
        self.history.clear();
        self.active = Player::A;
        self.phase = Phase::AwaitingTurn { player: Player::A };
        info!("Game restarted");
    }

    /// Read-only view of the current phase.
    pub fn current_phase(&self) -> PhaseSnapshot {
        let restart_in = self.phase.ended_at().map(|since| {
            self.config
                .restart_delay()
                .saturating_sub(self.clock.saturating_sub(since))
        });
        PhaseSnapshot::new(self.phase.clone(), self.active, self.history.len(), restart_in)
    }

    /// Copy of the board for rendering.
    pub fn board_snapshot(&self) -> Board {
        self.board.clone()
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_starts_awaiting_player_a() {
        let engine = TurnEngine::default();
        assert_eq!(engine.phase(), &Phase::AwaitingTurn { player: Player::A });
        assert_eq!(engine.board().occupied(), 0);
    }

    #[test]
    fn test_accepted_drop_enters_dropping() {
        let mut engine = TurnEngine::default();
        let response = engine.request_drop(3).unwrap();
        assert_eq!(
            response,
            DropResponse::Accepted {
                player: Player::A,
                column: 3,
                row: 5
            }
        );
        assert_eq!(
            engine.phase(),
            &Phase::Dropping {
                player: Player::A,
                column: 3,
                row: 5
            }
        );
        // Nothing is written until the piece lands.
        assert_eq!(engine.board().occupied(), 0);
    }

    #[test]
    fn test_dropping_holds_until_gate_opens() {
        let mut engine = TurnEngine::default();
        engine.request_drop(0).unwrap();
        for _ in 0..10 {
            let snapshot = engine.tick(FRAME, false).unwrap();
            assert!(matches!(snapshot.phase(), Phase::Dropping { .. }));
        }
        let snapshot = engine.tick(FRAME, true).unwrap();
        assert_eq!(snapshot.phase(), &Phase::AwaitingTurn { player: Player::B });
        assert_eq!(engine.board().get(5, 0), Ok(Player::A.mark()));
        assert_eq!(*snapshot.drops(), 1);
    }

    #[test]
    fn test_input_ignored_while_dropping() {
        let mut engine = TurnEngine::default();
        engine.request_drop(0).unwrap();
        assert_eq!(
            engine.request_drop(1),
            Ok(DropResponse::Rejected(RejectReason::NotAcceptingInput))
        );
        assert!(matches!(engine.phase(), Phase::Dropping { column: 0, .. }));
    }

    #[test]
    fn test_invalid_column_checked_in_every_phase() {
        let mut engine = TurnEngine::default();
        engine.request_drop(0).unwrap();
        assert_eq!(
            engine.request_drop(9),
            Err(DropError::InvalidColumn { column: 9, width: 7 })
        );
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut engine = TurnEngine::default();
        let response = engine.submit(DropRequest::new(Player::B, 2)).unwrap();
        assert_eq!(
            response,
            DropResponse::Rejected(RejectReason::WrongPlayer(Player::B))
        );
        assert!(engine.phase().accepts_input());
    }

    #[test]
    fn test_gate_ignored_outside_dropping() {
        let mut engine = TurnEngine::default();
        let snapshot = engine.tick(FRAME, true).unwrap();
        assert_eq!(snapshot.phase(), &Phase::AwaitingTurn { player: Player::A });
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_win_then_timed_restart() {
        let config = EngineConfig::new(4, 4, 2, 1.0).unwrap();
        let mut engine = TurnEngine::new(config);
        for column in [0, 3, 1] {
            engine.request_drop(column).unwrap();
            engine.tick(FRAME, true).unwrap();
        }
        assert_eq!(
            engine.phase(),
            &Phase::Won {
                player: Player::A,
                line: vec![Cell::new(3, 0), Cell::new(3, 1)],
                since: FRAME * 3,
            }
        );
        assert_eq!(
            engine.request_drop(2),
            Ok(DropResponse::Rejected(RejectReason::NotAcceptingInput))
        );

        let snapshot = engine.tick(Duration::from_millis(500), false).unwrap();
        assert!(snapshot.phase().is_terminal());
        assert_eq!(*snapshot.restart_in(), Some(Duration::from_millis(500)));

        let snapshot = engine.tick(Duration::from_millis(500), false).unwrap();
        assert_eq!(snapshot.phase(), &Phase::AwaitingTurn { player: Player::A });
        assert_eq!(engine.board().occupied(), 0);
        assert!(engine.history().is_empty());
    }

    #[test]
    fn test_explicit_restart_mid_drop() {
        let mut engine = TurnEngine::default();
        engine.request_drop(2).unwrap();
        engine.tick(FRAME, true).unwrap();
        engine.request_drop(2).unwrap();
        engine.restart();
        assert_eq!(engine.phase(), &Phase::AwaitingTurn { player: Player::A });
        assert_eq!(engine.board(), &Board::default());
        assert_eq!(engine.active_player(), Player::A);
    }

    #[test]
    fn test_tick_with_gate() {
        let mut engine = TurnEngine::default();
        engine.request_drop(6).unwrap();
        let snapshot = engine.tick_with(FRAME, &false).unwrap();
        assert!(matches!(snapshot.phase(), Phase::Dropping { .. }));
        let snapshot = engine.tick_with(FRAME, &true).unwrap();
        assert_eq!(snapshot.phase(), &Phase::AwaitingTurn { player: Player::B });
    }

    #[test]
    fn test_refused_commit_returns_turn_to_player() {
        let mut engine = TurnEngine::default();
        engine.request_drop(0).unwrap();
        // Occupy the landing cell behind the engine's back.
        engine.board.set(5, 0, Player::B.mark()).unwrap();

        assert_eq!(
            engine.tick(FRAME, true),
            Err(EngineError::Board(crate::BoardError::CellOccupied {
                row: 5,
                column: 0
            }))
        );
        assert_eq!(engine.phase(), &Phase::AwaitingTurn { player: Player::A });
        assert!(engine.history().is_empty());
        assert!(engine.request_drop(3).unwrap().is_accepted());
    }

    #[test]
    fn test_board_snapshot_is_detached() {
        let mut engine = TurnEngine::default();
        let before = engine.board_snapshot();
        engine.request_drop(1).unwrap();
        engine.tick(FRAME, true).unwrap();
        assert_eq!(before.occupied(), 0);
        assert_eq!(engine.board_snapshot().occupied(), 1);
    }
}
