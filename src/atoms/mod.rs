// ── Solaunch Atoms Layer ───────────────────────────────────────────────────
// Pure constants, record types, and the error enum — zero side effects.
// Dependency rule: atoms may only depend on std and external pure crates.
// Nothing here may import from engine/ or lib.rs.

pub mod constants;
pub mod error;
pub mod types;
