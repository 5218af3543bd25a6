//! Session module - one game of a level from first shuffle to win or loss
//!
//! The session owns a [`Level`] and applies the game rules around it:
//! moves are spent per swap or manual shuffle, the score accumulates, and the
//! game ends once the target is reached or the moves run out. Between turns
//! the combo multiplier is reset and a board with no legal swap is reshuffled
//! for free.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::core::{
    Level, LevelDefinition, LevelError, Piece, RandomSource, Resolution, SimpleRng, Swap,
};

/// Where the game stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionStatus {
    InProgress,
    Won,
    Lost,
    /// The engine hit a fill ceiling mid-turn; the board may be incomplete
    Aborted,
}

impl SessionStatus {
    pub fn is_finished(self) -> bool {
        !matches!(self, SessionStatus::InProgress)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Won => "won",
            SessionStatus::Lost => "lost",
            SessionStatus::Aborted => "aborted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The swap is not among the current legal swaps
    IllegalSwap,
    /// The game already ended
    Finished(SessionStatus),
    Level(LevelError),
}

impl SessionError {
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::IllegalSwap => "illegal_swap",
            SessionError::Finished(_) => "finished",
            SessionError::Level(_) => "engine",
        }
    }
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::IllegalSwap => write!(f, "swap does not form a chain"),
            SessionError::Finished(status) => write!(f, "game already {}", status.as_str()),
            SessionError::Level(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Level(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LevelError> for SessionError {
    fn from(value: LevelError) -> Self {
        SessionError::Level(value)
    }
}

/// Outcome of one player action
#[derive(Debug, Clone)]
pub struct TurnReport {
    /// The swap played, `None` for a manual shuffle
    pub swap: Option<Swap>,
    pub resolution: Resolution,
    /// New board when the level was reshuffled during this turn
    pub reshuffled: Option<Vec<Piece>>,
    pub score: u32,
    pub moves_left: u32,
    pub status: SessionStatus,
}

/// A game in progress
#[derive(Debug, Clone)]
pub struct Session<R = SimpleRng> {
    level: Level<R>,
    score: u32,
    moves_left: u32,
    turns: u32,
    status: SessionStatus,
}

impl<R: RandomSource> Session<R> {
    /// Start a game: full move budget, zero score, shuffled board
    pub fn new(definition: &LevelDefinition, rng: R) -> Result<Self, SessionError> {
        let mut level = Level::new(definition, rng);
        level.shuffle()?;
        Self::from_level(level)
    }

    /// Take over a prepared level (for example one restored from a layout)
    ///
    /// A board without a legal swap is reshuffled before the first turn.
    pub fn from_level(mut level: Level<R>) -> Result<Self, SessionError> {
        level.reset_combo_multiplier();
        if level.detect_possible_swaps() == 0 {
            level.shuffle()?;
        }
        Ok(Self {
            moves_left: level.maximum_moves(),
            level,
            score: 0,
            turns: 0,
            status: SessionStatus::InProgress,
        })
    }

    pub fn level(&self) -> &Level<R> {
        &self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn target_score(&self) -> u32 {
        self.level.target_score()
    }

    pub fn moves_left(&self) -> u32 {
        self.moves_left
    }

    /// Completed player actions
    pub fn turns(&self) -> u32 {
        self.turns
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// A legal swap to suggest to the player
    pub fn hint(&self) -> Option<Swap> {
        self.level.first_possible_swap()
    }

    /// Play a swap and resolve every cascade it triggers
    ///
    /// An illegal swap is rejected without touching the board or the move count.
    /// An engine error after the swap was applied ends the game as
    /// [`SessionStatus::Aborted`].
    pub fn play_swap(&mut self, swap: &Swap) -> Result<TurnReport, SessionError> {
        self.ensure_playing()?;
        if !self.level.is_possible_swap(swap) {
            return Err(SessionError::IllegalSwap);
        }

        self.level.perform_swap(swap);
        let result = self.finish_swap(swap);
        self.abort_on_error(result)
    }

    /// Rebuild the board on request; costs one move
    pub fn shuffle(&mut self) -> Result<TurnReport, SessionError> {
        self.ensure_playing()?;
        let result = self.finish_shuffle();
        self.abort_on_error(result)
    }

    fn finish_swap(&mut self, swap: &Swap) -> Result<TurnReport, SessionError> {
        let resolution = self.level.resolve_matches()?;
        self.score = self.score.saturating_add(resolution.score);

        let reshuffled = self.end_turn()?;
        Ok(self.report(Some(*swap), resolution, reshuffled))
    }

    fn finish_shuffle(&mut self) -> Result<TurnReport, SessionError> {
        let pieces = self.level.shuffle()?;
        let reshuffled = self.end_turn()?.or(Some(pieces));
        Ok(self.report(None, Resolution::default(), reshuffled))
    }

    fn abort_on_error(
        &mut self,
        result: Result<TurnReport, SessionError>,
    ) -> Result<TurnReport, SessionError> {
        if result.is_err() {
            self.status = SessionStatus::Aborted;
        }
        result
    }

    fn ensure_playing(&self) -> Result<(), SessionError> {
        if self.status.is_finished() {
            return Err(SessionError::Finished(self.status));
        }
        Ok(())
    }

    /// Spend the move, settle the outcome, and prepare the next turn
    fn end_turn(&mut self) -> Result<Option<Vec<Piece>>, SessionError> {
        self.moves_left = self.moves_left.saturating_sub(1);
        self.turns += 1;

        if self.score >= self.level.target_score() {
            self.status = SessionStatus::Won;
        } else if self.moves_left == 0 {
            self.status = SessionStatus::Lost;
        }
        if self.status.is_finished() {
            return Ok(None);
        }

        self.level.reset_combo_multiplier();
        if self.level.detect_possible_swaps() == 0 {
            return Ok(Some(self.level.shuffle()?));
        }
        Ok(None)
    }

    fn report(
        &self,
        swap: Option<Swap>,
        resolution: Resolution,
        reshuffled: Option<Vec<Piece>>,
    ) -> TurnReport {
        TurnReport {
            swap,
            resolution,
            reshuffled,
            score: self.score,
            moves_left: self.moves_left,
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SymbolKind::{self, *};

    type Layout<'a> = &'a [&'a [Option<SymbolKind>]];

    fn session_from(rows: Layout<'_>, target: u32, moves: u32) -> Session {
        let def = LevelDefinition::full(rows[0].len(), rows.len(), target, moves).unwrap();
        let level = Level::from_layout(&def, SimpleRng::new(5), rows).unwrap();
        Session::from_level(level).unwrap()
    }

    /// Always draws the first symbol
    #[derive(Debug, Clone)]
    struct Constant;

    impl RandomSource for Constant {
        fn next_below(&mut self, _bound: u32) -> u32 {
            0
        }
    }

    #[test]
    fn test_new_session_is_playable() {
        let def = LevelDefinition::full(9, 9, 1000, 15).unwrap();
        let session = Session::new(&def, SimpleRng::new(1)).unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.moves_left(), 15);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert!(session.hint().is_some());
    }

    #[test]
    fn test_illegal_swap_costs_nothing() {
        let mut session = session_from(&[&[Some(One), Some(Two), Some(One), Some(One)]], 60, 3);
        let a = session.level().piece_at(2, 0).unwrap();
        let b = session.level().piece_at(3, 0).unwrap();

        let err = session.play_swap(&Swap::new(a, b)).unwrap_err();
        assert_eq!(err, SessionError::IllegalSwap);
        assert_eq!(err.code(), "illegal_swap");
        assert_eq!(session.moves_left(), 3);
        assert_eq!(session.level().piece_at(0, 0).map(|p| p.kind), Some(One));
    }

    #[test]
    fn test_reaching_target_wins() {
        let mut session = session_from(&[&[Some(One), Some(Two), Some(One), Some(One)]], 60, 3);
        let swap = session.hint().unwrap();

        let report = session.play_swap(&swap).unwrap();
        assert_eq!(report.resolution.score, 60);
        assert_eq!(report.score, 60);
        assert_eq!(report.moves_left, 2);
        assert_eq!(report.status, SessionStatus::Won);

        let err = session.play_swap(&swap).unwrap_err();
        assert_eq!(err, SessionError::Finished(SessionStatus::Won));
    }

    #[test]
    fn test_running_out_of_moves_loses() {
        let mut session = session_from(&[&[Some(One), Some(Two), Some(One), Some(One)]], 10_000, 1);
        let swap = session.hint().unwrap();

        let report = session.play_swap(&swap).unwrap();
        assert_eq!(report.status, SessionStatus::Lost);
        assert_eq!(session.moves_left(), 0);
        assert_eq!(session.turns(), 1);
    }

    #[test]
    fn test_manual_shuffle_costs_a_move() {
        let def = LevelDefinition::full(9, 9, 100_000, 5).unwrap();
        let mut session = Session::new(&def, SimpleRng::new(3)).unwrap();

        let report = session.shuffle().unwrap();
        assert!(report.swap.is_none());
        assert_eq!(report.reshuffled.as_ref().map(Vec::len), Some(81));
        assert_eq!(report.moves_left, 4);
        assert_eq!(session.level().combo_multiplier(), 1);
    }

    #[test]
    fn test_combo_resets_between_turns() {
        let def = LevelDefinition::full(9, 9, 100_000, 30).unwrap();
        let mut session = Session::new(&def, SimpleRng::new(17)).unwrap();

        for _ in 0..5 {
            let swap = session.hint().unwrap();
            let report = session.play_swap(&swap).unwrap();
            let first = report.resolution.chains().next().unwrap();
            // The first chain of every turn is scored at multiplier 1.
            assert_eq!(first.score(), crate::core::chain_score(first.len(), 1));
            assert_eq!(session.level().combo_multiplier(), 1);
        }
    }

    #[test]
    fn test_from_level_reshuffles_dead_board() {
        // A Latin square has no swap that lines up three.
        let def = LevelDefinition::full(3, 3, 1000, 5).unwrap();
        let level = Level::from_layout(
            &def,
            SimpleRng::new(5),
            &[
                [Some(One), Some(Two), Some(Three)],
                [Some(Two), Some(Three), Some(One)],
                [Some(Three), Some(One), Some(Two)],
            ],
        )
        .unwrap();
        assert!(level.possible_swaps().is_empty());

        let session = Session::from_level(level).unwrap();

        assert!(session.hint().is_some());
        assert_eq!(session.moves_left(), 5);
        assert_eq!(session.status(), SessionStatus::InProgress);
    }

    #[test]
    fn test_from_level_reports_unplayable_board() {
        let def = LevelDefinition::full(3, 1, 1000, 5).unwrap();
        let level =
            Level::from_layout(&def, SimpleRng::new(5), &[[Some(One), Some(Two), Some(Three)]])
                .unwrap();

        let err = Session::from_level(level).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Level(LevelError::ShuffleExhausted { .. })
        ));
    }

    #[test]
    fn test_fill_failure_aborts_session() {
        let def = LevelDefinition::full(3, 2, 1000, 5).unwrap();
        let level = Level::from_layout(
            &def,
            Constant,
            &[
                [Some(Two), Some(Three), Some(One)],
                [Some(One), Some(One), Some(Two)],
            ],
        )
        .unwrap();
        let mut session = Session::from_level(level).unwrap();
        let swap = session.hint().unwrap();

        let err = session.play_swap(&swap).unwrap_err();

        assert_eq!(
            err,
            SessionError::Level(LevelError::RerollExhausted { column: 1, row: 1 })
        );
        assert_eq!(session.status(), SessionStatus::Aborted);
        assert!(session.status().is_finished());
        assert_eq!(
            session.play_swap(&swap).unwrap_err(),
            SessionError::Finished(SessionStatus::Aborted)
        );
        assert_eq!(
            session.shuffle().unwrap_err(),
            SessionError::Finished(SessionStatus::Aborted)
        );
    }
}
