//! Appointment validity checks
//!
//! Both predicates are advisory: they gate writes in the front end and are
//! never enforced by storage. The user may proceed past a business-hours or
//! overlap warning; an end before start is always rejected.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{Result, SchedulerError};

/// Zone the business-hours window is defined in
pub const BUSINESS_ZONE: Tz = chrono_tz::America::New_York;
/// First business hour (inclusive)
pub const OPENING_HOUR: u32 = 8;
/// Closing boundary; exactly 22:00:00 still counts as open
pub const CLOSING_HOUR: u32 = 22;

/// Half-open span of time `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn overlaps(&self, other: &TimeRange) -> bool {
        overlaps(self.start, self.end, other.start, other.end)
    }

    pub fn ends_before_start(&self) -> bool {
        self.end < self.start
    }
}

/// `start1 < end2 && start2 < end1`
pub fn overlaps<A, B, C, D>(
    start1: DateTime<A>,
    end1: DateTime<B>,
    start2: DateTime<C>,
    end2: DateTime<D>,
) -> bool
where
    A: TimeZone,
    B: TimeZone,
    C: TimeZone,
    D: TimeZone,
{
    start1 < end2 && start2 < end1
}

/// Weekday between 08:00 and 22:00:00 US Eastern, boundaries included
pub fn within_business_hours<Z: TimeZone>(at: &DateTime<Z>) -> bool {
    let eastern = at.with_timezone(&BUSINESS_ZONE);

    if matches!(eastern.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let hour = eastern.hour();
    if hour < OPENING_HOUR || hour > CLOSING_HOUR {
        return false;
    }
    if hour == CLOSING_HOUR {
        return eastern.minute() == 0 && eastern.second() == 0 && eastern.nanosecond() == 0;
    }
    true
}

/// Which warnings the user has chosen to proceed past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Overrides {
    pub business_hours: bool,
    pub overlap: bool,
}

/// Run every check a new or edited appointment must pass before it is written.
///
/// `existing` is the customer's current appointments; `editing` is the id of
/// the appointment being replaced, which never conflicts with itself.
pub fn check_schedule<I>(
    candidate: TimeRange,
    existing: I,
    editing: Option<i32>,
    overrides: Overrides,
) -> Result<()>
where
    I: IntoIterator<Item = (i32, TimeRange)>,
{
    if candidate.ends_before_start() {
        return Err(SchedulerError::EndBeforeStart);
    }

    if !overrides.business_hours
        && !(within_business_hours(&candidate.start) && within_business_hours(&candidate.end))
    {
        return Err(SchedulerError::OutsideBusinessHours);
    }

    if !overrides.overlap {
        if let Some((appointment_id, _)) = existing
            .into_iter()
            .filter(|(id, _)| Some(*id) != editing)
            .find(|(_, range)| candidate.overlaps(range))
        {
            return Err(SchedulerError::Overlap { appointment_id });
        }
    }

    Ok(())
}
