use bevy::prelude::*;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::common::types::{
    EAmperageUnit, EJkBmsInterface, EVoltageUnit, EZendureBypassMode, EZendureDeviceType,
};

/// Marks the single entity standing for the selected battery backend.
#[derive(Component, Debug, Clone, Reflect, Default)]
#[reflect(Component, Default)]
pub struct BatteryProviderInstance {
    pub verbose_logging: bool,
}

#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component, Serialize, Deserialize)]
pub struct JkBmsSettings {
    pub interface: EJkBmsInterface,
    pub polling_interval_secs: u8,
}

impl JkBmsSettings {
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.polling_interval_secs))
    }
}

/// Where one value lives in MQTT: a topic and, optionally, a JSON path into
/// its payload. An empty path means the payload is the bare number.
#[derive(Debug, Clone, PartialEq, Eq, Reflect, Serialize, Deserialize)]
#[reflect(Serialize, Deserialize)]
pub struct MqttValueBinding {
    pub topic: String,
    pub json_path: String,
}

impl MqttValueBinding {
    /// `None` when no topic is configured.
    pub fn from_parts(topic: &str, json_path: &str) -> Option<Self> {
        if topic.is_empty() {
            return None;
        }
        Some(Self { topic: topic.to_string(), json_path: json_path.to_string() })
    }
}

#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component, Serialize, Deserialize)]
pub struct MqttTelemetryBindings {
    pub soc: Option<MqttValueBinding>,
    pub voltage: Option<MqttValueBinding>,
    pub voltage_unit: EVoltageUnit,
    pub discharge_current_limit: Option<MqttValueBinding>,
    pub amperage_unit: EAmperageUnit,
}

#[derive(Component, Debug, Clone, Reflect, Serialize, Deserialize)]
#[reflect(Component, Serialize, Deserialize)]
pub struct ZendureSettings {
    pub device_type: EZendureDeviceType,
    pub device_id: String,
    pub polling_interval_secs: u8,
    pub soc_min: u8,
    pub soc_max: u8,
    pub bypass_mode: EZendureBypassMode,
    pub max_output_watts: u16,
    pub auto_shutdown: bool,
    pub force_limit: bool,
}

impl ZendureSettings {
    pub fn polling_interval(&self) -> Duration {
        Duration::from_secs(u64::from(self.polling_interval_secs))
    }
}

#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize, Default)]
#[reflect(Component, Serialize, Deserialize, Default)]
pub struct DischargeCurrentLimitSettings {
    pub enabled: bool,
    pub manual_limit_amps: f32,
    pub use_battery_reported: bool,
}

/// Limit last reported by the battery itself.
#[derive(Component, Debug, Clone, Copy)]
pub struct ReportedDischargeCurrentLimit {
    pub amps: f32,
    pub updated_at: DateTime<Utc>,
}

/// Limit in amps the rest of the site must respect; `None` is unlimited.
#[derive(Component, Debug, Clone, Copy, Reflect, Serialize, Deserialize, Default, PartialEq)]
#[reflect(Component, Serialize, Deserialize, Default)]
pub struct EffectiveDischargeCurrentLimit(pub Option<f32>);
