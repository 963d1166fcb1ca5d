use super::Team;

/// Which side currently owns the turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnOwner {
    Player,
    Ai,
}

/// Sub-phase of the player's turn. `None` while the AI acts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum PlayerPhase {
    None,
    Movement,
    Attack,
}

/// States of the turn phase machine.
///
/// ```text
/// PlayerMovement --finish_phase--> PlayerAttack --finish_phase--> AiTurn
///       ^                                                           |
///       +-------------------- complete_ai_turn ---------------------+
///
/// any --(a roster empties)--> GameOver { winner }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum TurnPhase {
    PlayerMovement,
    PlayerAttack,
    AiTurn,
    GameOver { winner: Team },
}

impl TurnPhase {
    /// Owner of the turn, `None` once the game is over.
    pub const fn owner(self) -> Option<TurnOwner> {
        match self {
            TurnPhase::PlayerMovement | TurnPhase::PlayerAttack => Some(TurnOwner::Player),
            TurnPhase::AiTurn => Some(TurnOwner::Ai),
            TurnPhase::GameOver { .. } => None,
        }
    }

    pub const fn player_phase(self) -> PlayerPhase {
        match self {
            TurnPhase::PlayerMovement => PlayerPhase::Movement,
            TurnPhase::PlayerAttack => PlayerPhase::Attack,
            TurnPhase::AiTurn | TurnPhase::GameOver { .. } => PlayerPhase::None,
        }
    }

    /// Rebuilds a phase from the saved owner/phase pair.
    ///
    /// A player turn saved with `PlayerPhase::None` resumes in movement.
    pub const fn from_parts(owner: TurnOwner, phase: PlayerPhase) -> Self {
        match (owner, phase) {
            (TurnOwner::Ai, _) => TurnPhase::AiTurn,
            (TurnOwner::Player, PlayerPhase::Attack) => TurnPhase::PlayerAttack,
            (TurnOwner::Player, PlayerPhase::None | PlayerPhase::Movement) => {
                TurnPhase::PlayerMovement
            }
        }
    }

    pub const fn is_over(self) -> bool {
        matches!(self, TurnPhase::GameOver { .. })
    }

    pub const fn winner(self) -> Option<Team> {
        match self {
            TurnPhase::GameOver { winner } => Some(winner),
            _ => None,
        }
    }
}

/// Turn bookkeeping for a level session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnState {
    pub phase: TurnPhase,

    /// Completed AI→Player wraps. Never decreases.
    pub turn_count: u32,
}

impl TurnState {
    pub fn new() -> Self {
        Self {
            phase: TurnPhase::PlayerMovement,
            turn_count: 0,
        }
    }

    pub fn restored(phase: TurnPhase, turn_count: u32) -> Self {
        Self { phase, turn_count }
    }
}

impl Default for TurnState {
    fn default() -> Self {
        Self::new()
    }
}
