use crate::scene::entity::{EntitySnapshot, Idea};

/// Snapshot every tracked idea, index-aligned with `ideas`.
///
/// The result owns its data; later mutation of the live list does not reach it.
pub fn capture(ideas: &[Idea]) -> Vec<EntitySnapshot> {
    ideas.iter().map(EntitySnapshot::from).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/capture.rs"]
mod tests;
