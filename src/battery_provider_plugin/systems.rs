use bevy::prelude::*;
use chrono::Utc;

use super::components::*;
use super::limits::effective_discharge_current_limit;
use crate::battery_config_plugin::{ActiveBatteryConfig, BatteryConfigV2};
use crate::common::types::EBatteryProvider;
use crate::error::ConfigError;

/// Tears down the current provider entity and builds a new one whenever the
/// active record changes. Also runs on the first frame.
pub fn apply_provider_selection_system(
    mut commands: Commands,
    config: Res<ActiveBatteryConfig>,
    existing: Query<(Entity, &EBatteryProvider), With<BatteryProviderInstance>>,
) {
    if !config.is_changed() {
        return;
    }

    for (entity, provider) in existing.iter() {
        info!("BatteryProvider: Removing {:?} provider", provider);
        commands.entity(entity).despawn();
    }

    let config = &config.0;
    if !config.enabled {
        info!("BatteryProvider: Battery disabled, no provider selected");
        return;
    }

    match spawn_provider(&mut commands, config) {
        Ok((entity, provider)) => {
            info!("BatteryProvider: Selected {:?} provider ({:?})", provider, entity);
        }
        Err(e) => {
            warn!("BatteryProvider: No provider started: {}", e);
        }
    }
}

fn spawn_provider(
    commands: &mut Commands,
    config: &BatteryConfigV2,
) -> Result<(Entity, EBatteryProvider), ConfigError> {
    let provider = config.provider()?;

    // Resolve backend settings before spawning so a bad code leaves nothing behind.
    let mut entity = match provider {
        EBatteryProvider::JkBms => {
            let settings = JkBmsSettings {
                interface: config.jkbms_interface()?,
                polling_interval_secs: config.jkbms_polling_interval,
            };
            let mut entity = commands.spawn_empty();
            entity.insert(settings);
            entity
        }
        EBatteryProvider::Mqtt => {
            let bindings = MqttTelemetryBindings {
                soc: MqttValueBinding::from_parts(
                    &config.mqtt_soc_topic,
                    &config.mqtt_soc_json_path,
                ),
                voltage: MqttValueBinding::from_parts(
                    &config.mqtt_voltage_topic,
                    &config.mqtt_voltage_json_path,
                ),
                voltage_unit: config.voltage_unit()?,
                discharge_current_limit: MqttValueBinding::from_parts(
                    &config.mqtt_discharge_current_topic,
                    &config.mqtt_discharge_current_json_path,
                ),
                amperage_unit: config.amperage_unit()?,
            };
            let mut entity = commands.spawn_empty();
            entity.insert(bindings);
            entity
        }
        EBatteryProvider::Zendure => {
            let settings = ZendureSettings {
                device_type: config.zendure_device_type()?,
                device_id: config.zendure_device_id.clone(),
                polling_interval_secs: config.zendure_polling_interval,
                soc_min: config.zendure_soc_min,
                soc_max: config.zendure_soc_max,
                bypass_mode: config.zendure_bypass_mode()?,
                max_output_watts: config.zendure_max_output,
                auto_shutdown: config.zendure_auto_shutdown,
                force_limit: config.zendure_force_limit,
            };
            let mut entity = commands.spawn_empty();
            entity.insert(settings);
            entity
        }
        EBatteryProvider::PylontechCan
        | EBatteryProvider::VictronSmartShunt
        | EBatteryProvider::PytesCan
        | EBatteryProvider::SbsCan => commands.spawn_empty(),
    };

    entity.insert((
        BatteryProviderInstance { verbose_logging: config.verbose_logging },
        provider,
        DischargeCurrentLimitSettings {
            enabled: config.enable_discharge_current_limit,
            manual_limit_amps: config.discharge_current_limit,
            use_battery_reported: config.use_battery_reported_discharge_current_limit,
        },
        EffectiveDischargeCurrentLimit::default(),
    ));

    Ok((entity.id(), provider))
}

pub fn update_effective_discharge_limit_system(
    mut query: Query<(
        &DischargeCurrentLimitSettings,
        Option<&ReportedDischargeCurrentLimit>,
        &mut EffectiveDischargeCurrentLimit,
    )>,
) {
    let now = Utc::now();
    for (settings, reported, mut effective) in query.iter_mut() {
        let limit = effective_discharge_current_limit(settings, reported, now);
        if effective.0 != limit {
            effective.0 = limit;
        }
    }
}

pub fn log_discharge_limit_changes_system(
    query: Query<
        (&EBatteryProvider, &BatteryProviderInstance, &EffectiveDischargeCurrentLimit),
        Changed<EffectiveDischargeCurrentLimit>,
    >,
) {
    for (provider, instance, limit) in query.iter() {
        if !instance.verbose_logging {
            continue;
        }
        match limit.0 {
            Some(amps) => {
                info!("BatteryProvider: {:?} discharge current limit {:.1} A", provider, amps)
            }
            None => info!("BatteryProvider: {:?} discharge current unlimited", provider),
        }
    }
}
