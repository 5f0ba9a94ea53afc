//! Whole-pipeline tests: scenes in, pixels out
