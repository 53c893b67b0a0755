// zilkara-common/src/lib.rs
// Pure domain layer: quotes, scoring, records, snapshots. No I/O besides the clock.

pub mod data;
pub mod scoring;
