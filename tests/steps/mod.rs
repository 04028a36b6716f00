//! Step definitions for behavioural tests.

mod reassembly_steps;
