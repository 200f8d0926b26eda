use bevy::prelude::*;

pub mod config;
pub mod events;
pub mod migration;
pub mod resources;
pub mod store;
pub mod systems;
pub mod validation;

pub use config::{BatteryConfig, BatteryConfigV1, BatteryConfigV2, ESchemaRevision};
pub use events::*;
pub use resources::*;
pub use store::BatteryConfigStore;
pub use systems::*;

/// Owns the active battery record and the path by which producers replace it.
///
/// Expects [`IncomingConfigChannel`] and [`OutgoingConfigStatusChannel`] to be
/// inserted by the caller; see `app_setup`.
pub struct BatteryConfigPlugin;

impl Plugin for BatteryConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveBatteryConfig>()
            .add_event::<BatteryConfigOutcomeEvent>()
            .add_systems(Update, (
                ingest_config_submissions_system,
                export_config_outcomes_to_channel_system
                    .after(ingest_config_submissions_system),
            ));
        info!("BatteryConfigPlugin loaded.");
    }
}
