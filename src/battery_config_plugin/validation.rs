use crate::common::types::EBatteryProvider;
use crate::error::ConfigError;

use super::config::{
    BatteryConfig, BatteryConfigV2, JSON_PATH_MAX_LEN, MQTT_MAX_TOPIC_LEN, ZENDURE_DEVICE_ID_LEN,
};

/// Checks a record before it is accepted. Backend-specific codes are only
/// checked for the backend that is actually selected.
pub fn validate(config: &BatteryConfigV2) -> Result<(), ConfigError> {
    if config.zendure_soc_min > config.zendure_soc_max {
        return Err(ConfigError::InvertedSocBounds {
            min: config.zendure_soc_min,
            max: config.zendure_soc_max,
        });
    }
    if config.zendure_soc_max > 100 {
        return Err(ConfigError::SocAboveHundred(config.zendure_soc_max));
    }

    check_len("mqtt_soc_topic", &config.mqtt_soc_topic, MQTT_MAX_TOPIC_LEN)?;
    check_len("mqtt_voltage_topic", &config.mqtt_voltage_topic, MQTT_MAX_TOPIC_LEN)?;
    check_len(
        "mqtt_discharge_current_topic",
        &config.mqtt_discharge_current_topic,
        MQTT_MAX_TOPIC_LEN,
    )?;
    check_len("mqtt_soc_json_path", &config.mqtt_soc_json_path, JSON_PATH_MAX_LEN)?;
    check_len("mqtt_voltage_json_path", &config.mqtt_voltage_json_path, JSON_PATH_MAX_LEN)?;
    check_len(
        "mqtt_discharge_current_json_path",
        &config.mqtt_discharge_current_json_path,
        JSON_PATH_MAX_LEN,
    )?;

    if !config.discharge_current_limit.is_finite() || config.discharge_current_limit < 0.0 {
        return Err(ConfigError::InvalidDischargeCurrentLimit(config.discharge_current_limit));
    }

    // A disabled battery never reaches a backend.
    if !config.enabled {
        return Ok(());
    }

    match config.provider()? {
        EBatteryProvider::JkBms => {
            config.jkbms_interface()?;
            if config.jkbms_polling_interval == 0 {
                return Err(ConfigError::ZeroPollingInterval("jkbms_polling_interval"));
            }
        }
        EBatteryProvider::Mqtt => {
            config.voltage_unit()?;
            config.amperage_unit()?;
        }
        EBatteryProvider::Zendure => {
            config.zendure_device_type()?;
            config.zendure_bypass_mode()?;
            let id = &config.zendure_device_id;
            if id.len() != ZENDURE_DEVICE_ID_LEN || !id.bytes().all(|b| b.is_ascii_alphanumeric()) {
                return Err(ConfigError::InvalidDeviceId {
                    id: config.zendure_device_id.clone(),
                    expected: ZENDURE_DEVICE_ID_LEN,
                });
            }
            if config.zendure_polling_interval == 0 {
                return Err(ConfigError::ZeroPollingInterval("zendure_polling_interval"));
            }
        }
        EBatteryProvider::PylontechCan
        | EBatteryProvider::VictronSmartShunt
        | EBatteryProvider::PytesCan
        | EBatteryProvider::SbsCan => {}
    }

    Ok(())
}

/// Validates a record of any revision against the current rules.
pub fn validate_any(config: &BatteryConfig) -> Result<(), ConfigError> {
    match config {
        BatteryConfig::V1(v1) => validate(&super::migration::upgrade(v1.clone())),
        BatteryConfig::V2(v2) => validate(v2),
    }
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), ConfigError> {
    if value.len() > max {
        return Err(ConfigError::TooLong { field, len: value.len(), max });
    }
    Ok(())
}
