//! Gamified challenges: goal definitions, the built-in catalog, and the
//! validator that scores a finished circuit against its truth table.

pub mod catalog;
pub mod goal;
pub mod validator;

pub use catalog::{Challenge, Level, catalog, challenge_by_id, challenges_by_level};
pub use goal::{ExpectedRow, GoalCondition, GoalKind};
pub use validator::{ValidationResult, Validator, validate};
