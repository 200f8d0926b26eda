use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ConfigError;

/// Battery backend selected by the `provider` code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Component, Reflect)]
#[reflect(Component, Serialize, Deserialize)]
pub enum EBatteryProvider {
    PylontechCan,
    JkBms,
    Mqtt,
    VictronSmartShunt,
    PytesCan,
    SbsCan,
    Zendure,
}

impl EBatteryProvider {
    pub fn code(self) -> u8 {
        match self {
            EBatteryProvider::PylontechCan => 0,
            EBatteryProvider::JkBms => 1,
            EBatteryProvider::Mqtt => 2,
            EBatteryProvider::VictronSmartShunt => 3,
            EBatteryProvider::PytesCan => 4,
            EBatteryProvider::SbsCan => 5,
            // 6 is not assigned
            EBatteryProvider::Zendure => 7,
        }
    }
}

impl TryFrom<u8> for EBatteryProvider {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EBatteryProvider::PylontechCan),
            1 => Ok(EBatteryProvider::JkBms),
            2 => Ok(EBatteryProvider::Mqtt),
            3 => Ok(EBatteryProvider::VictronSmartShunt),
            4 => Ok(EBatteryProvider::PytesCan),
            5 => Ok(EBatteryProvider::SbsCan),
            7 => Ok(EBatteryProvider::Zendure),
            _ => Err(ConfigError::UnknownCode { field: "provider", code }),
        }
    }
}

impl FromStr for EBatteryProvider {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PylontechCan" => Ok(EBatteryProvider::PylontechCan),
            "JkBms" => Ok(EBatteryProvider::JkBms),
            "Mqtt" => Ok(EBatteryProvider::Mqtt),
            "VictronSmartShunt" => Ok(EBatteryProvider::VictronSmartShunt),
            "PytesCan" => Ok(EBatteryProvider::PytesCan),
            "SbsCan" => Ok(EBatteryProvider::SbsCan),
            "Zendure" => Ok(EBatteryProvider::Zendure),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum EJkBmsInterface {
    Uart,
    Transceiver,
}

impl EJkBmsInterface {
    pub fn code(self) -> u8 {
        match self {
            EJkBmsInterface::Uart => 0,
            EJkBmsInterface::Transceiver => 1,
        }
    }
}

impl TryFrom<u8> for EJkBmsInterface {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EJkBmsInterface::Uart),
            1 => Ok(EJkBmsInterface::Transceiver),
            _ => Err(ConfigError::UnknownCode { field: "jkbms_interface", code }),
        }
    }
}

impl FromStr for EJkBmsInterface {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Uart" => Ok(EJkBmsInterface::Uart),
            "Transceiver" => Ok(EJkBmsInterface::Transceiver),
            _ => Err(()),
        }
    }
}

/// Scale of the voltage value published on the MQTT voltage topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum EVoltageUnit {
    Volts,
    DeciVolts,
    CentiVolts,
    MilliVolts,
}

impl EVoltageUnit {
    pub fn code(self) -> u8 {
        match self {
            EVoltageUnit::Volts => 0,
            EVoltageUnit::DeciVolts => 1,
            EVoltageUnit::CentiVolts => 2,
            EVoltageUnit::MilliVolts => 3,
        }
    }

    pub fn to_volts(self, raw: f32) -> f32 {
        match self {
            EVoltageUnit::Volts => raw,
            EVoltageUnit::DeciVolts => raw / 10.0,
            EVoltageUnit::CentiVolts => raw / 100.0,
            EVoltageUnit::MilliVolts => raw / 1000.0,
        }
    }
}

impl TryFrom<u8> for EVoltageUnit {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EVoltageUnit::Volts),
            1 => Ok(EVoltageUnit::DeciVolts),
            2 => Ok(EVoltageUnit::CentiVolts),
            3 => Ok(EVoltageUnit::MilliVolts),
            _ => Err(ConfigError::UnknownCode { field: "mqtt_voltage_unit", code }),
        }
    }
}

impl FromStr for EVoltageUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "V" | "Volts" => Ok(EVoltageUnit::Volts),
            "dV" | "DeciVolts" => Ok(EVoltageUnit::DeciVolts),
            "cV" | "CentiVolts" => Ok(EVoltageUnit::CentiVolts),
            "mV" | "MilliVolts" => Ok(EVoltageUnit::MilliVolts),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum EAmperageUnit {
    Amps,
    MilliAmps,
}

impl EAmperageUnit {
    pub fn code(self) -> u8 {
        match self {
            EAmperageUnit::Amps => 0,
            EAmperageUnit::MilliAmps => 1,
        }
    }

    pub fn to_amps(self, raw: f32) -> f32 {
        match self {
            EAmperageUnit::Amps => raw,
            EAmperageUnit::MilliAmps => raw / 1000.0,
        }
    }
}

impl TryFrom<u8> for EAmperageUnit {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EAmperageUnit::Amps),
            1 => Ok(EAmperageUnit::MilliAmps),
            _ => Err(ConfigError::UnknownCode { field: "mqtt_amperage_unit", code }),
        }
    }
}

impl FromStr for EAmperageUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "A" | "Amps" => Ok(EAmperageUnit::Amps),
            "mA" | "MilliAmps" => Ok(EAmperageUnit::MilliAmps),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum EZendureDeviceType {
    Hub1200,
    Hub2000,
    Aio2400,
    Ace1500,
    Hyper2000,
}

impl EZendureDeviceType {
    pub fn code(self) -> u8 {
        match self {
            EZendureDeviceType::Hub1200 => 0,
            EZendureDeviceType::Hub2000 => 1,
            EZendureDeviceType::Aio2400 => 2,
            EZendureDeviceType::Ace1500 => 3,
            EZendureDeviceType::Hyper2000 => 4,
        }
    }

    /// Product key the vendor cloud uses to address this device family.
    pub fn product_key(self) -> &'static str {
        match self {
            EZendureDeviceType::Hub1200 => "73bkTV",
            EZendureDeviceType::Hub2000 => "A8yh63",
            EZendureDeviceType::Aio2400 => "yWF7hV",
            EZendureDeviceType::Ace1500 => "8bM93H",
            EZendureDeviceType::Hyper2000 => "ja72U0ha",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EZendureDeviceType::Hub1200 => "HUB 1200",
            EZendureDeviceType::Hub2000 => "HUB 2000",
            EZendureDeviceType::Aio2400 => "AIO 2400",
            EZendureDeviceType::Ace1500 => "Ace 1500",
            EZendureDeviceType::Hyper2000 => "Hyper 2000",
        }
    }
}

impl TryFrom<u8> for EZendureDeviceType {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EZendureDeviceType::Hub1200),
            1 => Ok(EZendureDeviceType::Hub2000),
            2 => Ok(EZendureDeviceType::Aio2400),
            3 => Ok(EZendureDeviceType::Ace1500),
            4 => Ok(EZendureDeviceType::Hyper2000),
            _ => Err(ConfigError::UnknownCode { field: "zendure_device_type", code }),
        }
    }
}

impl FromStr for EZendureDeviceType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hub1200" => Ok(EZendureDeviceType::Hub1200),
            "Hub2000" => Ok(EZendureDeviceType::Hub2000),
            "Aio2400" => Ok(EZendureDeviceType::Aio2400),
            "Ace1500" => Ok(EZendureDeviceType::Ace1500),
            "Hyper2000" => Ok(EZendureDeviceType::Hyper2000),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
#[reflect(Serialize, Deserialize)]
pub enum EZendureBypassMode {
    Automatic,
    AlwaysOff,
    AlwaysOn,
}

impl EZendureBypassMode {
    pub fn code(self) -> u8 {
        match self {
            EZendureBypassMode::Automatic => 0,
            EZendureBypassMode::AlwaysOff => 1,
            EZendureBypassMode::AlwaysOn => 2,
        }
    }
}

impl TryFrom<u8> for EZendureBypassMode {
    type Error = ConfigError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(EZendureBypassMode::Automatic),
            1 => Ok(EZendureBypassMode::AlwaysOff),
            2 => Ok(EZendureBypassMode::AlwaysOn),
            _ => Err(ConfigError::UnknownCode { field: "zendure_bypass_mode", code }),
        }
    }
}

impl FromStr for EZendureBypassMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Automatic" | "automatic" => Ok(EZendureBypassMode::Automatic),
            "AlwaysOff" | "alwaysoff" => Ok(EZendureBypassMode::AlwaysOff),
            "AlwaysOn" | "alwayson" => Ok(EZendureBypassMode::AlwaysOn),
            _ => Err(()),
        }
    }
}
