use bevy::prelude::*;
use battery_config_bevy::app_setup::setup_bevy_app;
use battery_config_bevy::battery_config_plugin::{
    ActiveBatteryConfig, BatteryConfig, BatteryConfigStore, BatteryConfigSubmission,
    BatteryConfigV1, BatteryConfigV2, ConfigUpdateOutcome,
};
use battery_config_bevy::battery_provider_plugin::{
    BatteryProviderInstance, EffectiveDischargeCurrentLimit, MqttTelemetryBindings,
    ReportedDischargeCurrentLimit, ZendureSettings,
};
use battery_config_bevy::common::types::{
    EBatteryProvider, EVoltageUnit, EZendureBypassMode, EZendureDeviceType,
};
use chrono::Utc;
use crossbeam_channel::Receiver;
use std::thread;
use std::time::Duration;

fn try_recv<T>(rx: &Receiver<T>, timeout: Duration) -> Option<T> {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if let Ok(v) = rx.try_recv() {
            return Some(v);
        }
        thread::sleep(Duration::from_millis(10));
    }
    None
}

fn mqtt_config() -> BatteryConfigV2 {
    BatteryConfigV2 {
        enabled: true,
        provider: EBatteryProvider::Mqtt.code(),
        mqtt_soc_topic: "battery/state".into(),
        mqtt_soc_json_path: "$.soc".into(),
        mqtt_voltage_topic: "battery/state".into(),
        mqtt_voltage_json_path: "$.voltage_mv".into(),
        mqtt_voltage_unit: EVoltageUnit::MilliVolts.code(),
        enable_discharge_current_limit: true,
        discharge_current_limit: 50.0,
        use_battery_reported_discharge_current_limit: true,
        ..Default::default()
    }
}

fn zendure_config() -> BatteryConfigV2 {
    BatteryConfigV2 {
        enabled: true,
        provider: EBatteryProvider::Zendure.code(),
        zendure_device_type: EZendureDeviceType::Hyper2000.code(),
        zendure_device_id: "sU59jtkw".into(),
        zendure_soc_min: 10,
        zendure_soc_max: 90,
        zendure_bypass_mode: EZendureBypassMode::AlwaysOff.code(),
        zendure_max_output: 1200,
        zendure_auto_shutdown: true,
        ..Default::default()
    }
}

fn provider_entities(app: &mut App) -> Vec<(Entity, EBatteryProvider)> {
    let mut query = app
        .world_mut()
        .query_filtered::<(Entity, &EBatteryProvider), With<BatteryProviderInstance>>();
    query.iter(app.world()).map(|(e, p)| (e, *p)).collect()
}

#[test]
fn test_initial_config_selects_mqtt_provider() {
    let (mut app, _channels) = setup_bevy_app(mqtt_config(), None);
    app.update();
    app.update();

    let providers = provider_entities(&mut app);
    assert_eq!(providers.len(), 1);
    let (entity, provider) = providers[0];
    assert_eq!(provider, EBatteryProvider::Mqtt);

    let bindings = app.world().get::<MqttTelemetryBindings>(entity).unwrap();
    assert_eq!(bindings.soc.as_ref().unwrap().topic, "battery/state");
    assert_eq!(bindings.voltage.as_ref().unwrap().json_path, "$.voltage_mv");
    assert_eq!(bindings.voltage_unit, EVoltageUnit::MilliVolts);
    assert!(bindings.discharge_current_limit.is_none());

    let limit = app.world().get::<EffectiveDischargeCurrentLimit>(entity).unwrap();
    assert_eq!(limit.0, Some(50.0));
}

#[test]
fn test_submission_replaces_provider_wholesale() {
    let (mut app, channels) = setup_bevy_app(mqtt_config(), None);
    app.update();

    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", zendure_config()))
        .unwrap();
    app.update();
    app.update();

    let outcome = try_recv(&channels.config_outcome_receiver, Duration::from_secs(1)).unwrap();
    assert_eq!(outcome, ConfigUpdateOutcome::Applied { source: "web".into() });

    let providers = provider_entities(&mut app);
    assert_eq!(providers.len(), 1);
    let (entity, provider) = providers[0];
    assert_eq!(provider, EBatteryProvider::Zendure);
    assert!(app.world().get::<MqttTelemetryBindings>(entity).is_none());

    let zendure = app.world().get::<ZendureSettings>(entity).unwrap();
    assert_eq!(zendure.device_type, EZendureDeviceType::Hyper2000);
    assert_eq!(zendure.device_id, "sU59jtkw");
    assert_eq!(zendure.bypass_mode, EZendureBypassMode::AlwaysOff);
    assert_eq!(zendure.max_output_watts, 1200);
    assert!(zendure.auto_shutdown);
    assert_eq!(zendure.polling_interval(), Duration::from_secs(15));

    assert_eq!(app.world().resource::<ActiveBatteryConfig>().0, zendure_config());
}

#[test]
fn test_inverted_soc_bounds_are_rejected() {
    let (mut app, channels) = setup_bevy_app(mqtt_config(), None);
    app.update();

    let invalid = BatteryConfigV2 { zendure_soc_min: 80, zendure_soc_max: 20, ..zendure_config() };
    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", invalid))
        .unwrap();
    app.update();

    match try_recv(&channels.config_outcome_receiver, Duration::from_secs(1)).unwrap() {
        ConfigUpdateOutcome::Rejected { source, reason } => {
            assert_eq!(source, "web");
            assert!(reason.contains("80"), "unexpected reason: {reason}");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }

    assert_eq!(app.world().resource::<ActiveBatteryConfig>().0, mqtt_config());
    let providers = provider_entities(&mut app);
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0].1, EBatteryProvider::Mqtt);
}

#[test]
fn test_outcomes_follow_submission_order() {
    let (mut app, channels) = setup_bevy_app(mqtt_config(), None);
    app.update();

    let invalid = BatteryConfigV2 { zendure_soc_min: 80, zendure_soc_max: 20, ..zendure_config() };
    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", invalid))
        .unwrap();
    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", zendure_config()))
        .unwrap();
    // both records are drained in the same frame
    app.update();

    let first = try_recv(&channels.config_outcome_receiver, Duration::from_secs(1)).unwrap();
    assert!(
        matches!(first, ConfigUpdateOutcome::Rejected { ref source, .. } if source == "web"),
        "Expected rejection first, got {:?}",
        first
    );
    let second = try_recv(&channels.config_outcome_receiver, Duration::from_secs(1)).unwrap();
    assert_eq!(second, ConfigUpdateOutcome::Applied { source: "web".into() });
    assert!(channels.config_outcome_receiver.try_recv().is_err());

    assert_eq!(app.world().resource::<ActiveBatteryConfig>().0, zendure_config());
}

#[test]
fn test_base_revision_submission_is_upgraded() {
    let (mut app, channels) = setup_bevy_app(BatteryConfigV2::default(), None);
    app.update();
    assert!(provider_entities(&mut app).is_empty());

    let v1 = BatteryConfigV1 {
        enabled: true,
        provider: EBatteryProvider::Zendure.code(),
        zendure_device_type: EZendureDeviceType::Hub1200.code(),
        zendure_device_serial: "ABCD1234".into(),
        ..Default::default()
    };
    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("legacy", v1))
        .unwrap();
    app.update();
    app.update();

    let active = &app.world().resource::<ActiveBatteryConfig>().0;
    assert_eq!(active.zendure_device_id, "ABCD1234");
    assert!(!active.zendure_force_limit);

    let providers = provider_entities(&mut app);
    assert_eq!(providers.len(), 1);
    let zendure = app.world().get::<ZendureSettings>(providers[0].0).unwrap();
    assert_eq!(zendure.device_id, "ABCD1234");
}

#[test]
fn test_disabling_battery_removes_provider() {
    let (mut app, channels) = setup_bevy_app(mqtt_config(), None);
    app.update();
    assert_eq!(provider_entities(&mut app).len(), 1);

    let disabled = BatteryConfigV2 { enabled: false, ..mqtt_config() };
    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", disabled))
        .unwrap();
    app.update();
    app.update();

    assert!(provider_entities(&mut app).is_empty());
}

#[test]
fn test_unknown_provider_code_spawns_nothing() {
    // The validator is bypassed here on purpose: the consumer must cope alone.
    let unknown = BatteryConfigV2 { enabled: true, provider: 6, ..Default::default() };
    let (mut app, _channels) = setup_bevy_app(unknown, None);
    app.update();
    app.update();

    assert!(provider_entities(&mut app).is_empty());
}

#[test]
fn test_reported_limit_caps_effective_limit() {
    let (mut app, _channels) = setup_bevy_app(mqtt_config(), None);
    app.update();

    let (entity, _) = provider_entities(&mut app)[0];
    app.world_mut()
        .entity_mut(entity)
        .insert(ReportedDischargeCurrentLimit { amps: 32.0, updated_at: Utc::now() });
    app.update();

    let limit = app.world().get::<EffectiveDischargeCurrentLimit>(entity).unwrap();
    assert_eq!(limit.0, Some(32.0));
}

#[test]
fn test_accepted_config_is_persisted() {
    let dir = tempfile::tempdir().unwrap();
    let store = BatteryConfigStore::new(dir.path().join("battery_config.json"));

    let (mut app, channels) = setup_bevy_app(BatteryConfigV2::default(), Some(store.clone()));
    app.update();

    channels
        .config_submission_sender
        .send(BatteryConfigSubmission::new("web", zendure_config()))
        .unwrap();
    app.update();

    let outcome = try_recv(&channels.config_outcome_receiver, Duration::from_secs(1)).unwrap();
    assert_eq!(outcome, ConfigUpdateOutcome::Applied { source: "web".into() });

    let reloaded = store.load().unwrap();
    assert_eq!(reloaded, BatteryConfig::V2(zendure_config()));
}
