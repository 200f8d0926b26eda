use bevy::prelude::*;

use super::resources::ConfigUpdateOutcome;

/// One per submission, written in the order submissions arrived.
#[derive(Event, Debug, Clone)]
pub struct BatteryConfigOutcomeEvent(pub ConfigUpdateOutcome);
