//! Test worlds for behavioural tests.

mod reassembly;

pub use reassembly::ReassemblyWorld;
