//! Hierarchical wall-clock timers for benchmark stage accounting.

mod timers;
pub use timers::*;
