//! Common utilities for integration tests

#![allow(dead_code, unused_imports)]

pub mod test_helpers;

// Re-export commonly used items
pub use test_helpers::{
    assert_fields_close,
    hot_neighbours_of_cold_cells,
    max_abs_difference,
    reference_scenario,
    sine_mode_scenario,
};
