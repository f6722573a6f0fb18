//! Dodge counting
//!
//! A trigger zone sits just behind the player. Every obstacle whose collider
//! enters it has been survived; each obstacle is counted at most once no matter
//! how many of its colliders cross.

use super::events::ObstacleId;
use super::session::RunSession;
use super::spawner::ObstacleSpawner;

/// Counts obstacles that made it past the player
#[derive(Debug, Default)]
pub struct DodgeCounter {
    /// Crossings that did not resolve to a countable obstacle
    ignored: u32,
}

impl DodgeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one trigger crossing. Returns true if it counted a dodge.
    pub fn on_trigger_entered(
        &mut self,
        obstacle: Option<ObstacleId>,
        spawner: &mut ObstacleSpawner,
        session: &mut RunSession,
    ) -> bool {
        let found = match obstacle {
            Some(id) => spawner.get_mut(id),
            None => None,
        };
        let Some(record) = found else {
            self.ignored += 1;
            return false;
        };
        if !record.is_obstacle || record.counted {
            self.ignored += 1;
            return false;
        }

        record.counted = true;
        session.register_obstacle_dodged();
        true
    }

    pub fn ignored(&self) -> u32 {
        self.ignored
    }
}
