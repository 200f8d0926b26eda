use chrono::{DateTime, Utc};

use super::components::{DischargeCurrentLimitSettings, ReportedDischargeCurrentLimit};

/// Reported limits older than this are ignored.
pub const REPORTED_LIMIT_MAX_AGE_SECS: i64 = 60;

/// Resolves the discharge current limit in amps.
///
/// With limiting disabled the result is `None` (unlimited). Otherwise the
/// manual limit counts when it is above zero, the reported one when it is
/// enabled, non-negative and fresh. If both count the lower one wins.
pub fn effective_discharge_current_limit(
    settings: &DischargeCurrentLimitSettings,
    reported: Option<&ReportedDischargeCurrentLimit>,
    now: DateTime<Utc>,
) -> Option<f32> {
    if !settings.enabled {
        return None;
    }

    let manual = (settings.manual_limit_amps > 0.0).then_some(settings.manual_limit_amps);

    let reported = reported
        .filter(|_| settings.use_battery_reported)
        .filter(|r| r.amps >= 0.0)
        .filter(|r| (now - r.updated_at).num_seconds() <= REPORTED_LIMIT_MAX_AGE_SECS)
        .map(|r| r.amps);

    match (manual, reported) {
        (Some(m), Some(r)) => Some(m.min(r)),
        (Some(m), None) => Some(m),
        (None, Some(r)) => Some(r),
        (None, None) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn settings(enabled: bool, manual: f32, use_reported: bool) -> DischargeCurrentLimitSettings {
        DischargeCurrentLimitSettings {
            enabled,
            manual_limit_amps: manual,
            use_battery_reported: use_reported,
        }
    }

    fn effective(
        settings: DischargeCurrentLimitSettings,
        reported: Option<&ReportedDischargeCurrentLimit>,
        now: DateTime<Utc>,
    ) -> Option<f32> {
        effective_discharge_current_limit(&settings, reported, now)
    }

    #[test]
    fn disabled_limit_is_unlimited() {
        let now = Utc::now();
        let reported = ReportedDischargeCurrentLimit { amps: 10.0, updated_at: now };
        assert_eq!(effective(settings(false, 50.0, true), Some(&reported), now), None);
    }

    #[test]
    fn lower_of_manual_and_reported_wins() {
        let now = Utc::now();
        let reported = ReportedDischargeCurrentLimit { amps: 30.0, updated_at: now };
        assert_eq!(effective(settings(true, 50.0, true), Some(&reported), now), Some(30.0));
        assert_eq!(effective(settings(true, 20.0, true), Some(&reported), now), Some(20.0));
    }

    #[test]
    fn stale_or_unused_report_falls_back_to_manual() {
        let now = Utc::now();
        let stale = ReportedDischargeCurrentLimit {
            amps: 5.0,
            updated_at: now - Duration::seconds(61),
        };
        assert_eq!(effective(settings(true, 40.0, true), Some(&stale), now), Some(40.0));

        let fresh = ReportedDischargeCurrentLimit { amps: 5.0, updated_at: now };
        assert_eq!(effective(settings(true, 40.0, false), Some(&fresh), now), Some(40.0));
    }

    #[test]
    fn zero_manual_limit_means_reported_only() {
        let now = Utc::now();
        let reported = ReportedDischargeCurrentLimit { amps: 12.5, updated_at: now };
        assert_eq!(effective(settings(true, 0.0, true), Some(&reported), now), Some(12.5));
        assert_eq!(effective(settings(true, 0.0, true), None, now), None);
    }
}
