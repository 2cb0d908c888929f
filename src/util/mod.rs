//! Small shared utilities.

pub mod levenshtein;
