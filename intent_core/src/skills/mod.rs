//! Built-in skills

pub mod spelling;

pub use spelling::{SpellingAnswer, SpellingSkill};
