//! Command modules for the label propagator CLI.
//!
//! - `propagate_cmd`: copies the labels of the linked issue onto the pull request

pub mod propagate_cmd;
