use super::config::{BatteryConfigV1, BatteryConfigV2};

/// Lifts a base-revision record into the extended revision. Fields the base
/// revision never had take their defaults.
pub fn upgrade(v1: BatteryConfigV1) -> BatteryConfigV2 {
    BatteryConfigV2 {
        enabled: v1.enabled,
        verbose_logging: v1.verbose_logging,
        provider: v1.provider,
        jkbms_interface: v1.jkbms_interface,
        jkbms_polling_interval: v1.jkbms_polling_interval,
        mqtt_soc_topic: v1.mqtt_soc_topic,
        mqtt_soc_json_path: v1.mqtt_soc_json_path,
        mqtt_voltage_topic: v1.mqtt_voltage_topic,
        mqtt_voltage_json_path: v1.mqtt_voltage_json_path,
        mqtt_voltage_unit: v1.mqtt_voltage_unit,
        zendure_device_type: v1.zendure_device_type,
        zendure_device_id: v1.zendure_device_serial,
        zendure_soc_min: v1.zendure_soc_min,
        zendure_soc_max: v1.zendure_soc_max,
        zendure_bypass_mode: v1.zendure_bypass_mode,
        zendure_max_output: v1.zendure_max_output,
        ..BatteryConfigV2::default()
    }
}

/// Projects an extended record onto the base revision. Lossy: see
/// [`dropped_on_downgrade`].
pub fn downgrade(v2: &BatteryConfigV2) -> BatteryConfigV1 {
    BatteryConfigV1 {
        enabled: v2.enabled,
        verbose_logging: v2.verbose_logging,
        provider: v2.provider,
        jkbms_interface: v2.jkbms_interface,
        jkbms_polling_interval: v2.jkbms_polling_interval,
        mqtt_soc_topic: v2.mqtt_soc_topic.clone(),
        mqtt_soc_json_path: v2.mqtt_soc_json_path.clone(),
        mqtt_voltage_topic: v2.mqtt_voltage_topic.clone(),
        mqtt_voltage_json_path: v2.mqtt_voltage_json_path.clone(),
        mqtt_voltage_unit: v2.mqtt_voltage_unit,
        zendure_device_type: v2.zendure_device_type,
        zendure_device_serial: v2.zendure_device_id.clone(),
        zendure_soc_min: v2.zendure_soc_min,
        zendure_soc_max: v2.zendure_soc_max,
        zendure_bypass_mode: v2.zendure_bypass_mode,
        zendure_max_output: v2.zendure_max_output,
    }
}

/// Extended-only fields holding a non-default value, i.e. what a downgrade
/// would throw away.
pub fn dropped_on_downgrade(v2: &BatteryConfigV2) -> Vec<&'static str> {
    let defaults = BatteryConfigV2::default();
    let mut dropped = Vec::new();

    if v2.enable_discharge_current_limit != defaults.enable_discharge_current_limit {
        dropped.push("enable_discharge_current_limit");
    }
    if v2.discharge_current_limit != defaults.discharge_current_limit {
        dropped.push("discharge_current_limit");
    }
    if v2.use_battery_reported_discharge_current_limit
        != defaults.use_battery_reported_discharge_current_limit
    {
        dropped.push("use_battery_reported_discharge_current_limit");
    }
    if v2.mqtt_discharge_current_topic != defaults.mqtt_discharge_current_topic {
        dropped.push("mqtt_discharge_current_topic");
    }
    if v2.mqtt_discharge_current_json_path != defaults.mqtt_discharge_current_json_path {
        dropped.push("mqtt_discharge_current_json_path");
    }
    if v2.mqtt_amperage_unit != defaults.mqtt_amperage_unit {
        dropped.push("mqtt_amperage_unit");
    }
    if v2.zendure_polling_interval != defaults.zendure_polling_interval {
        dropped.push("zendure_polling_interval");
    }
    if v2.zendure_auto_shutdown != defaults.zendure_auto_shutdown {
        dropped.push("zendure_auto_shutdown");
    }
    if v2.zendure_force_limit != defaults.zendure_force_limit {
        dropped.push("zendure_force_limit");
    }
    dropped
}
