// Skill gap engine: subject strengths -> derived skills -> career gap.
// Tables live in `catalog`; everything in `gap` is pure over them.

pub mod catalog;
pub mod gap;
pub mod handlers;
