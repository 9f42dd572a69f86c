//! Activation window and module entitlement checks.
//!
//! These run on a record that has already passed [`crate::Verifier::verify`].
//! They are caller policy, not part of the signature check:
//! - Activation window (inclusive on both ends)
//! - Required modules (all must be present)

use crate::clock::Clock;
use crate::protocol::models::LicenseRecord;
use crate::LicsealError;
use chrono::NaiveDate;

fn date_range_error(record: &LicenseRecord, today: NaiveDate) -> LicsealError {
    LicsealError::DateRange {
        start: record.start_date_str().to_string(),
        end: record.end_date_str().to_string(),
        today: today.to_string(),
    }
}

/// Check that `today` falls within `[startDate, endDate]`.
///
/// # Returns
/// * `Ok(())` - License is active today
/// * `Err(DateRange)` - Not yet active, expired, or dates unparseable
pub fn check_window(record: &LicenseRecord, today: NaiveDate) -> Result<(), LicsealError> {
    let (Some(start), Some(end)) = (record.start_date(), record.end_date()) else {
        return Err(date_range_error(record, today));
    };

    if today < start || today > end {
        return Err(date_range_error(record, today));
    }

    Ok(())
}

/// Check that every required module is licensed.
///
/// # Returns
/// * `Ok(())` - All modules present
/// * `Err(EntitlementMissing)` - First required module not found
pub fn check_entitlements(record: &LicenseRecord, required: &[&str]) -> Result<(), LicsealError> {
    for module in required {
        if !record.has_module(module) {
            return Err(LicsealError::EntitlementMissing {
                module: (*module).to_string(),
            });
        }
    }
    Ok(())
}

/// Combined window and entitlement check using a clock for today's date.
pub fn check_access(
    record: &LicenseRecord,
    required: &[&str],
    clock: &dyn Clock,
) -> Result<(), LicsealError> {
    check_window(record, clock.today())?;
    check_entitlements(record, required)
}

/// Days from `today` until the end date (0 on the last day, negative once
/// expired). `None` if the end date does not parse.
pub fn days_remaining(record: &LicenseRecord, today: NaiveDate) -> Option<i64> {
    record.end_date().map(|end| (end - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;

    fn make_record(modules: &[&str]) -> LicenseRecord {
        LicenseRecord::new(
            "ACME",
            "2025-01-01",
            "2025-12-31",
            modules.iter().map(|m| (*m).to_string()).collect(),
        )
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_window_inside() {
        assert!(check_window(&make_record(&[]), date("2025-06-15")).is_ok());
    }

    #[test]
    fn test_window_boundaries_inclusive() {
        let record = make_record(&[]);
        assert!(check_window(&record, date("2025-01-01")).is_ok());
        assert!(check_window(&record, date("2025-12-31")).is_ok());
    }

    #[test]
    fn test_window_before_start() {
        let result = check_window(&make_record(&[]), date("2024-12-31"));
        assert!(matches!(result, Err(LicsealError::DateRange { today, .. }) if today == "2024-12-31"));
    }

    #[test]
    fn test_window_after_end() {
        let result = check_window(&make_record(&[]), date("2026-01-01"));
        assert!(matches!(result, Err(LicsealError::DateRange { .. })));
    }

    #[test]
    fn test_window_unparseable_dates() {
        let record = LicenseRecord::new("ACME", "someday", "2025-12-31", vec![]);
        let result = check_window(&record, date("2025-06-01"));
        assert!(matches!(result, Err(LicsealError::DateRange { start, .. }) if start == "someday"));
    }

    #[test]
    fn test_entitlements_present() {
        let record = make_record(&["gps", "ticket"]);
        assert!(check_entitlements(&record, &["ticket", "gps"]).is_ok());
    }

    #[test]
    fn test_entitlements_none_required() {
        assert!(check_entitlements(&make_record(&[]), &[]).is_ok());
    }

    #[test]
    fn test_entitlements_missing_one_of_multiple() {
        let record = make_record(&["gps"]);
        let result = check_entitlements(&record, &["gps", "email"]);
        assert!(matches!(result, Err(LicsealError::EntitlementMissing { module }) if module == "email"));
    }

    #[test]
    fn test_check_access_with_clock() {
        let record = make_record(&["admin"]);
        let clock = MockClock::on_date("2025-03-01");
        assert!(check_access(&record, &["admin"], &clock).is_ok());

        let late = MockClock::on_date("2026-03-01");
        assert!(matches!(
            check_access(&record, &["admin"], &late),
            Err(LicsealError::DateRange { .. })
        ));
    }

    #[test]
    fn test_check_access_window_checked_first() {
        let record = make_record(&[]);
        let late = MockClock::on_date("2026-03-01");
        assert!(matches!(
            check_access(&record, &["admin"], &late),
            Err(LicsealError::DateRange { .. })
        ));
    }

    #[test]
    fn test_days_remaining() {
        let record = make_record(&[]);
        assert_eq!(days_remaining(&record, date("2025-12-31")), Some(0));
        assert_eq!(days_remaining(&record, date("2025-12-01")), Some(30));
        assert_eq!(days_remaining(&record, date("2026-01-02")), Some(-2));
    }
}
