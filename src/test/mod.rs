//! End-to-end synthesis scenarios.

mod utils;
