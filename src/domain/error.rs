use thiserror::Error;

use super::habit::{MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

/// Input rejected before it could touch the game state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Habit name cannot be empty")]
    EmptyName,

    #[error("Habit name must be at most {max} characters (got {0})", max = MAX_NAME_LEN)]
    NameTooLong(usize),

    #[error("Habit description must be at most {max} characters (got {0})", max = MAX_DESCRIPTION_LEN)]
    DescriptionTooLong(usize),

    #[error("Reward name cannot be empty")]
    EmptyRewardName,
}
