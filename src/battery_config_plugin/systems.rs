use bevy::prelude::*;

use super::events::BatteryConfigOutcomeEvent;
use super::resources::{
    ActiveBatteryConfig, ConfigUpdateOutcome, IncomingConfigChannel, OutgoingConfigStatusChannel,
};
use super::store::BatteryConfigStore;
use super::validation::validate;
use super::config::BatteryConfig;

/// Drains submitted records, validates them and swaps the active record.
/// When a store is configured the record is persisted before it goes live.
pub fn ingest_config_submissions_system(
    channel: Res<IncomingConfigChannel>,
    store: Option<Res<BatteryConfigStore>>,
    mut active: ResMut<ActiveBatteryConfig>,
    mut outcome_writer: EventWriter<BatteryConfigOutcomeEvent>,
) {
    while let Ok(submission) = channel.0.try_recv() {
        let source = submission.source;
        let revision = submission.config.revision();
        let config = submission.config.into_current();

        if let Err(e) = validate(&config) {
            warn!("BatteryConfig: Rejected {:?} record from '{}': {}", revision, source, e);
            outcome_writer.write(BatteryConfigOutcomeEvent(ConfigUpdateOutcome::Rejected {
                source,
                reason: e.to_string(),
            }));
            continue;
        }

        if let Some(store) = store.as_deref() {
            if let Err(e) = store.save(&BatteryConfig::V2(config.clone())) {
                error!("BatteryConfig: Failed to persist record from '{}': {}", source, e);
                outcome_writer.write(BatteryConfigOutcomeEvent(ConfigUpdateOutcome::Rejected {
                    source,
                    reason: e.to_string(),
                }));
                continue;
            }
        }

        info!(
            "BatteryConfig: Applied {:?} record from '{}' (enabled: {}, provider: {})",
            revision, source, config.enabled, config.provider
        );
        active.0 = config;
        outcome_writer.write(BatteryConfigOutcomeEvent(ConfigUpdateOutcome::Applied { source }));
    }
}

pub fn export_config_outcomes_to_channel_system(
    mut outcomes: EventReader<BatteryConfigOutcomeEvent>,
    channel: Res<OutgoingConfigStatusChannel>,
) {
    for event in outcomes.read() {
        if let Err(e) = channel.0.send(event.0.clone()) {
            // nobody is listening any more
            debug!("BatteryConfig: Dropped config outcome: {}", e);
        }
    }
}
