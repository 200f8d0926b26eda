use bevy::prelude::*;

use crate::battery_config_plugin::ingest_config_submissions_system;
use crate::common::types::EBatteryProvider;

pub mod components;
pub mod limits;
pub mod systems;

pub use components::*;
pub use limits::{effective_discharge_current_limit, REPORTED_LIMIT_MAX_AGE_SECS};
pub use systems::*;

/// Reads the active battery record and keeps exactly one provider entity in
/// sync with it.
pub struct BatteryProviderPlugin;

impl Plugin for BatteryProviderPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<EBatteryProvider>()
            .register_type::<BatteryProviderInstance>()
            .register_type::<JkBmsSettings>()
            .register_type::<MqttTelemetryBindings>()
            .register_type::<ZendureSettings>()
            .register_type::<DischargeCurrentLimitSettings>()
            .register_type::<EffectiveDischargeCurrentLimit>()
            .add_systems(Update, (
                apply_provider_selection_system
                    .after(ingest_config_submissions_system),
                update_effective_discharge_limit_system
                    .after(apply_provider_selection_system),
                log_discharge_limit_changes_system
                    .after(update_effective_discharge_limit_system),
            ));
        info!("BatteryProviderPlugin loaded.");
    }
}
