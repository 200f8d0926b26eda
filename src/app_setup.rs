use bevy::prelude::*;
use crate::battery_config_plugin::{
    ActiveBatteryConfig, BatteryConfigPlugin, BatteryConfigStore, BatteryConfigSubmission,
    BatteryConfigV2, ConfigUpdateOutcome, IncomingConfigChannel, OutgoingConfigStatusChannel,
};
use crate::battery_provider_plugin::BatteryProviderPlugin;
use crossbeam_channel::{unbounded, Sender, Receiver};

/// External channel ends for production integration or tests.
pub struct AppExternalChannelEnds {
    // settings producer → Bevy
    pub config_submission_sender: Sender<BatteryConfigSubmission>,
    // Bevy → settings producer
    pub config_outcome_receiver: Receiver<ConfigUpdateOutcome>,
}

/// Builds a headless app around `initial`. With a store, accepted records are
/// written back to it.
pub fn setup_bevy_app(
    initial: BatteryConfigV2,
    store: Option<BatteryConfigStore>,
) -> (App, AppExternalChannelEnds) {
    let mut app = App::new();

    let (config_submission_sender, config_submission_receiver) =
        unbounded::<BatteryConfigSubmission>();
    let (config_outcome_sender, config_outcome_receiver) =
        unbounded::<ConfigUpdateOutcome>();

    app.add_plugins(MinimalPlugins)
       .insert_resource(ActiveBatteryConfig(initial))
       .add_plugins(BatteryConfigPlugin)
       .add_plugins(BatteryProviderPlugin)

       // insert only the halves needed by ECS/plugin logic:
       .insert_resource(IncomingConfigChannel(config_submission_receiver))
       .insert_resource(OutgoingConfigStatusChannel(config_outcome_sender));

    if let Some(store) = store {
        app.insert_resource(store);
    }

    let channels = AppExternalChannelEnds {
        config_submission_sender,
        config_outcome_receiver,
    };
    (app, channels)
}
