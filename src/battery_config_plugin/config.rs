// the battery configuration record, in both schema revisions seen in the field

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::common::types::{
    EAmperageUnit, EBatteryProvider, EJkBmsInterface, EVoltageUnit, EZendureBypassMode,
    EZendureDeviceType,
};
use crate::error::{AppError, ConfigError};

pub const MQTT_MAX_TOPIC_LEN: usize = 256;
pub const JSON_PATH_MAX_LEN: usize = 128;
pub const ZENDURE_DEVICE_ID_LEN: usize = 8;

pub const DEFAULT_JKBMS_POLLING_INTERVAL_SECS: u8 = 5;
pub const DEFAULT_ZENDURE_POLLING_INTERVAL_SECS: u8 = 15;
pub const DEFAULT_ZENDURE_SOC_MIN: u8 = 0;
pub const DEFAULT_ZENDURE_SOC_MAX: u8 = 100;
pub const DEFAULT_ZENDURE_MAX_OUTPUT_WATTS: u16 = 800;

/// Keys that only exist in the extended revision. Any of them in a document
/// marks it as [`BatteryConfigV2`].
pub const V2_ONLY_KEYS: [&str; 10] = [
    "enable_discharge_current_limit",
    "discharge_current_limit",
    "use_battery_reported_discharge_current_limit",
    "mqtt_discharge_current_topic",
    "mqtt_discharge_current_json_path",
    "mqtt_amperage_unit",
    "zendure_device_id",
    "zendure_polling_interval",
    "zendure_auto_shutdown",
    "zendure_force_limit",
];

/// Base revision. Identifies the Zendure device by `zendure_device_serial`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatteryConfigV1 {
    pub enabled: bool,
    pub verbose_logging: bool,
    pub provider: u8,
    pub jkbms_interface: u8,
    pub jkbms_polling_interval: u8,
    #[serde(alias = "mqtt_topic")]
    pub mqtt_soc_topic: String,
    #[serde(alias = "mqtt_json_path")]
    pub mqtt_soc_json_path: String,
    pub mqtt_voltage_topic: String,
    pub mqtt_voltage_json_path: String,
    pub mqtt_voltage_unit: u8,
    pub zendure_device_type: u8,
    pub zendure_device_serial: String,
    pub zendure_soc_min: u8,
    pub zendure_soc_max: u8,
    pub zendure_bypass_mode: u8,
    pub zendure_max_output: u16,
}

impl Default for BatteryConfigV1 {
    fn default() -> Self {
        Self {
            enabled: false,
            verbose_logging: false,
            provider: EBatteryProvider::PylontechCan.code(),
            jkbms_interface: EJkBmsInterface::Uart.code(),
            jkbms_polling_interval: DEFAULT_JKBMS_POLLING_INTERVAL_SECS,
            mqtt_soc_topic: String::new(),
            mqtt_soc_json_path: String::new(),
            mqtt_voltage_topic: String::new(),
            mqtt_voltage_json_path: String::new(),
            mqtt_voltage_unit: EVoltageUnit::Volts.code(),
            zendure_device_type: EZendureDeviceType::Hub1200.code(),
            zendure_device_serial: String::new(),
            zendure_soc_min: DEFAULT_ZENDURE_SOC_MIN,
            zendure_soc_max: DEFAULT_ZENDURE_SOC_MAX,
            zendure_bypass_mode: EZendureBypassMode::Automatic.code(),
            zendure_max_output: DEFAULT_ZENDURE_MAX_OUTPUT_WATTS,
        }
    }
}

/// Extended revision: discharge-current limits, MQTT current telemetry and
/// the Zendure operational flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct BatteryConfigV2 {
    pub enabled: bool,
    pub verbose_logging: bool,
    pub provider: u8,
    pub jkbms_interface: u8,
    pub jkbms_polling_interval: u8,
    #[serde(alias = "mqtt_topic")]
    pub mqtt_soc_topic: String,
    #[serde(alias = "mqtt_json_path")]
    pub mqtt_soc_json_path: String,
    pub mqtt_voltage_topic: String,
    pub mqtt_voltage_json_path: String,
    pub mqtt_voltage_unit: u8,
    pub enable_discharge_current_limit: bool,
    pub discharge_current_limit: f32,
    /// Prefer the limit the battery reports over the manual one.
    pub use_battery_reported_discharge_current_limit: bool,
    pub mqtt_discharge_current_topic: String,
    pub mqtt_discharge_current_json_path: String,
    pub mqtt_amperage_unit: u8,
    pub zendure_device_type: u8,
    pub zendure_device_id: String,
    pub zendure_polling_interval: u8,
    pub zendure_soc_min: u8,
    pub zendure_soc_max: u8,
    pub zendure_bypass_mode: u8,
    pub zendure_max_output: u16,
    pub zendure_auto_shutdown: bool,
    pub zendure_force_limit: bool,
}

impl Default for BatteryConfigV2 {
    fn default() -> Self {
        Self {
            enabled: false,
            verbose_logging: false,
            provider: EBatteryProvider::PylontechCan.code(),
            jkbms_interface: EJkBmsInterface::Uart.code(),
            jkbms_polling_interval: DEFAULT_JKBMS_POLLING_INTERVAL_SECS,
            mqtt_soc_topic: String::new(),
            mqtt_soc_json_path: String::new(),
            mqtt_voltage_topic: String::new(),
            mqtt_voltage_json_path: String::new(),
            mqtt_voltage_unit: EVoltageUnit::Volts.code(),
            enable_discharge_current_limit: false,
            discharge_current_limit: 0.0,
            use_battery_reported_discharge_current_limit: false,
            mqtt_discharge_current_topic: String::new(),
            mqtt_discharge_current_json_path: String::new(),
            mqtt_amperage_unit: EAmperageUnit::Amps.code(),
            zendure_device_type: EZendureDeviceType::Hub1200.code(),
            zendure_device_id: String::new(),
            zendure_polling_interval: DEFAULT_ZENDURE_POLLING_INTERVAL_SECS,
            zendure_soc_min: DEFAULT_ZENDURE_SOC_MIN,
            zendure_soc_max: DEFAULT_ZENDURE_SOC_MAX,
            zendure_bypass_mode: EZendureBypassMode::Automatic.code(),
            zendure_max_output: DEFAULT_ZENDURE_MAX_OUTPUT_WATTS,
            zendure_auto_shutdown: false,
            zendure_force_limit: false,
        }
    }
}

impl BatteryConfigV2 {
    pub fn provider(&self) -> Result<EBatteryProvider, ConfigError> {
        EBatteryProvider::try_from(self.provider)
    }

    pub fn jkbms_interface(&self) -> Result<EJkBmsInterface, ConfigError> {
        EJkBmsInterface::try_from(self.jkbms_interface)
    }

    pub fn voltage_unit(&self) -> Result<EVoltageUnit, ConfigError> {
        EVoltageUnit::try_from(self.mqtt_voltage_unit)
    }

    pub fn amperage_unit(&self) -> Result<EAmperageUnit, ConfigError> {
        EAmperageUnit::try_from(self.mqtt_amperage_unit)
    }

    pub fn zendure_device_type(&self) -> Result<EZendureDeviceType, ConfigError> {
        EZendureDeviceType::try_from(self.zendure_device_type)
    }

    pub fn zendure_bypass_mode(&self) -> Result<EZendureBypassMode, ConfigError> {
        EZendureBypassMode::try_from(self.zendure_bypass_mode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ESchemaRevision {
    V1,
    V2,
}

/// A battery configuration in one of its schema revisions.
///
/// The on-disk form carries no tag: it is the flat field list of the
/// revision. Decoding picks the revision from the keys present.
#[derive(Debug, Clone, PartialEq)]
pub enum BatteryConfig {
    V1(BatteryConfigV1),
    V2(BatteryConfigV2),
}

impl Default for BatteryConfig {
    fn default() -> Self {
        BatteryConfig::V2(BatteryConfigV2::default())
    }
}

impl From<BatteryConfigV1> for BatteryConfig {
    fn from(config: BatteryConfigV1) -> Self {
        BatteryConfig::V1(config)
    }
}

impl From<BatteryConfigV2> for BatteryConfig {
    fn from(config: BatteryConfigV2) -> Self {
        BatteryConfig::V2(config)
    }
}

impl BatteryConfig {
    pub fn revision(&self) -> ESchemaRevision {
        match self {
            BatteryConfig::V1(_) => ESchemaRevision::V1,
            BatteryConfig::V2(_) => ESchemaRevision::V2,
        }
    }

    /// Detects the revision of a flat object: extended-only keys win, then
    /// `zendure_device_serial`, and anything else is read as the current
    /// revision.
    pub fn detect_revision(object: &Map<String, Value>) -> ESchemaRevision {
        if V2_ONLY_KEYS.iter().any(|key| object.contains_key(*key)) {
            ESchemaRevision::V2
        } else if object.contains_key("zendure_device_serial") {
            ESchemaRevision::V1
        } else {
            ESchemaRevision::V2
        }
    }

    pub fn from_value(mut value: Value) -> Result<Self, AppError> {
        let revision = match &mut value {
            Value::Object(object) => {
                let revision = Self::detect_revision(object);
                // Partly migrated documents may still name the device by serial.
                if revision == ESchemaRevision::V2 && !object.contains_key("zendure_device_id") {
                    if let Some(serial) = object.remove("zendure_device_serial") {
                        object.insert("zendure_device_id".to_string(), serial);
                    }
                }
                revision
            }
            // let serde report the type mismatch
            _ => ESchemaRevision::V2,
        };
        let config = match revision {
            ESchemaRevision::V1 => BatteryConfig::V1(serde_json::from_value(value)?),
            ESchemaRevision::V2 => BatteryConfig::V2(serde_json::from_value(value)?),
        };
        Ok(config)
    }

    pub fn from_json(json: &str) -> Result<Self, AppError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    pub fn to_value(&self) -> Result<Value, AppError> {
        let value = match self {
            BatteryConfig::V1(config) => serde_json::to_value(config)?,
            BatteryConfig::V2(config) => serde_json::to_value(config)?,
        };
        Ok(value)
    }

    pub fn to_json_pretty(&self) -> Result<String, AppError> {
        let json = match self {
            BatteryConfig::V1(config) => serde_json::to_string_pretty(config)?,
            BatteryConfig::V2(config) => serde_json::to_string_pretty(config)?,
        };
        Ok(json)
    }

    /// Upgrades to the current revision.
    pub fn into_current(self) -> BatteryConfigV2 {
        match self {
            BatteryConfig::V1(config) => super::migration::upgrade(config),
            BatteryConfig::V2(config) => config,
        }
    }

    pub fn enabled(&self) -> bool {
        match self {
            BatteryConfig::V1(config) => config.enabled,
            BatteryConfig::V2(config) => config.enabled,
        }
    }

    pub fn provider_code(&self) -> u8 {
        match self {
            BatteryConfig::V1(config) => config.provider,
            BatteryConfig::V2(config) => config.provider,
        }
    }
}
