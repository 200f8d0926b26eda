use bevy::prelude::Resource;
use crossbeam_channel::{Receiver, Sender};

use super::config::{BatteryConfig, BatteryConfigV2};

/// The record every consumer reads. Always held in the current revision and
/// only ever replaced as a whole.
#[derive(Debug, Clone, Default, Resource)]
pub struct ActiveBatteryConfig(pub BatteryConfigV2);

/// A full record handed in by a settings producer (form handler, file
/// watcher, test harness).
#[derive(Debug, Clone)]
pub struct BatteryConfigSubmission {
    pub source: String,
    pub config: BatteryConfig,
}

impl BatteryConfigSubmission {
    pub fn new(source: impl Into<String>, config: impl Into<BatteryConfig>) -> Self {
        Self { source: source.into(), config: config.into() }
    }
}

/// Reply to a submission, sent back to producers.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigUpdateOutcome {
    Applied { source: String },
    Rejected { source: String, reason: String },
}

#[derive(Resource)]
pub struct IncomingConfigChannel(pub Receiver<BatteryConfigSubmission>);

#[derive(Resource)]
pub struct OutgoingConfigStatusChannel(pub Sender<ConfigUpdateOutcome>);
