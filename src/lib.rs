pub use watchsat_core as core;
