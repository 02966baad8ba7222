use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use scheduler_core::rules::{check_schedule, overlaps, Overrides, TimeRange};
use scheduler_core::SchedulerError;

// Ranges of up to a day starting somewhere in 2024
fn arb_range() -> impl Strategy<Value = TimeRange> {
    (0i64..366 * 24 * 60, 1i64..24 * 60).prop_map(|(offset, len)| {
        let base: DateTime<Utc> = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let start = base + Duration::minutes(offset);
        TimeRange::new(start, start + Duration::minutes(len))
    })
}

proptest! {
    /// Property: overlap does not depend on argument order
    #[test]
    fn prop_overlap_is_symmetric(a in arb_range(), b in arb_range()) {
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    /// Property: two non-empty ranges overlap exactly when they share an instant
    #[test]
    fn prop_overlap_means_shared_instant(a in arb_range(), b in arb_range()) {
        let latest_start = a.start.max(b.start);
        let earliest_end = a.end.min(b.end);
        prop_assert_eq!(a.overlaps(&b), latest_start < earliest_end);
    }

    /// Property: a range always overlaps itself and never the range that starts at its end
    #[test]
    fn prop_self_and_touching(a in arb_range(), len in 1i64..600) {
        prop_assert!(overlaps(a.start, a.end, a.start, a.end));

        let next = TimeRange::new(a.end, a.end + Duration::minutes(len));
        prop_assert!(!a.overlaps(&next));
    }

    /// Property: with both overrides set, only end-before-start can fail
    #[test]
    fn prop_overrides_leave_only_ordering(a in arb_range(), others in prop::collection::vec(arb_range(), 0..8)) {
        let overrides = Overrides { business_hours: true, overlap: true };
        let existing = others.into_iter().enumerate().map(|(i, r)| (i as i32 + 1, r));
        prop_assert!(check_schedule(a, existing, None, overrides).is_ok());

        let reversed = TimeRange::new(a.end, a.start);
        let result = check_schedule(reversed, std::iter::empty(), None, overrides);
        prop_assert!(matches!(result, Err(SchedulerError::EndBeforeStart)));
    }
}
