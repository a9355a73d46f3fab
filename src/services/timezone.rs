//! Timezone conversion for schedule intervals.
//!
//! Intervals are anchored to a calendar date in their owner's zone. When
//! viewed from another zone they may shift across local midnight, so a
//! conversion yields one date-tagged fragment per target-zone day the
//! range touches (a full-day slot over a fall-back transition lasts 25
//! absolute hours and can touch three).

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone};
use chrono_tz::Tz;

use crate::models::{TimeInterval, TimeOfDay};

/// An interval fragment attached to a specific calendar date in the
/// target zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatedInterval {
    pub date: NaiveDate,
    pub interval: TimeInterval,
}

/// Resolve a local wall-clock time to an instant.
///
/// DST policy: the offset in effect *after* a transition applies at the
/// transition instant. Ambiguous local times (fall-back) take the later
/// of the two instants; skipped local times (spring-forward gap) are
/// interpreted with the post-gap offset. Returns `None` only if the gap
/// width cannot be determined, which does not occur for IANA zones.
fn resolve_local(tz: Tz, local: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&local) {
        LocalResult::None => {
            // Inside a forward gap; probe past it for the new offset.
            let mut probe = local;
            for _ in 0..8 {
                probe += Duration::minutes(30);
                if let Some(dt) = tz.from_local_datetime(&probe).latest() {
                    let offset = dt.offset().fix().local_minus_utc();
                    let naive_utc = local - Duration::seconds(i64::from(offset));
                    return Some(tz.from_utc_datetime(&naive_utc));
                }
            }
            None
        }
        resolved => resolved.latest(),
    }
}

/// The instant at which `time` occurs on `date` in `tz`.
///
/// `TimeOfDay::END_OF_DAY` maps to midnight of the following date.
fn instant_of(tz: Tz, date: NaiveDate, time: TimeOfDay) -> Option<DateTime<Tz>> {
    let local = match time.to_naive_time() {
        Some(t) => date.and_time(t),
        None => date.succ_opt()?.and_hms_opt(0, 0, 0)?,
    };
    resolve_local(tz, local)
}

/// Convert an interval anchored to `date` in `src` into fragments in `dst`.
///
/// Fragments are split at every local midnight in the target zone: the
/// portion before the first midnight keeps the start's target date, each
/// fully covered interior day gets a `00:00`-`24:00` fragment, and the
/// remainder attaches to the end's target date. Degenerate inputs (an
/// interval collapsed to nothing by a DST gap) yield no fragments.
pub fn convert_interval(
    date: NaiveDate,
    interval: TimeInterval,
    src: Tz,
    dst: Tz,
) -> Vec<DatedInterval> {
    let (start, end) = match (
        instant_of(src, date, interval.start),
        instant_of(src, date, interval.end),
    ) {
        (Some(s), Some(e)) if s < e => (s.with_timezone(&dst), e.with_timezone(&dst)),
        _ => return Vec::new(),
    };

    let start_date = start.date_naive();
    let start_tod = TimeOfDay::from_naive_time(start.time());
    let end_date = end.date_naive();
    let end_tod = TimeOfDay::from_naive_time(end.time());

    if end_date == start_date {
        return vec![DatedInterval {
            date: start_date,
            interval: TimeInterval {
                start: start_tod,
                end: end_tod,
            },
        }];
    }

    // The converted range crosses at least one local midnight in the
    // target zone. A span longer than 24 absolute hours (a full-day slot
    // over a fall-back transition) covers whole interior days as well.
    let mut fragments = vec![DatedInterval {
        date: start_date,
        interval: TimeInterval {
            start: start_tod,
            end: TimeOfDay::END_OF_DAY,
        },
    }];
    let mut day = start_date.succ_opt();
    while let Some(interior) = day.filter(|d| *d < end_date) {
        fragments.push(DatedInterval {
            date: interior,
            interval: TimeInterval {
                start: TimeOfDay::MIDNIGHT,
                end: TimeOfDay::END_OF_DAY,
            },
        });
        day = interior.succ_opt();
    }
    if end_tod > TimeOfDay::MIDNIGHT {
        fragments.push(DatedInterval {
            date: end_date,
            interval: TimeInterval {
                start: TimeOfDay::MIDNIGHT,
                end: end_tod,
            },
        });
    }
    fragments
}

/// Convert a set of free intervals anchored to `anchor` in `src` into
/// `dst` and keep only the portions that fall on `target` in the target
/// frame. Fragments landing on any other day are excluded; the result is
/// scoped to one calendar day in the viewer's zone.
pub fn convert_slots_for_date(
    anchor: NaiveDate,
    target: NaiveDate,
    slots: &[TimeInterval],
    src: Tz,
    dst: Tz,
) -> Vec<TimeInterval> {
    let mut converted: Vec<TimeInterval> = slots
        .iter()
        .flat_map(|slot| convert_interval(anchor, *slot, src, dst))
        .filter(|fragment| fragment.date == target)
        .map(|fragment| fragment.interval)
        .collect();
    converted.sort_by_key(|s| s.start);
    converted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::{Tz, UTC};

    fn iv(start: &str, end: &str) -> TimeInterval {
        TimeInterval::parse(start, end).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn tz(name: &str) -> Tz {
        name.parse().unwrap()
    }

    #[test]
    fn test_identity_conversion() {
        let fragments = convert_interval(date("2024-06-01"), iv("09:00", "12:00"), UTC, UTC);
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-06-01"),
                interval: iv("09:00", "12:00"),
            }]
        );
    }

    #[test]
    fn test_new_york_evening_lands_on_next_utc_day() {
        // EDT is UTC-4 in June: 22:00-23:30 on the 1st is 02:00-03:30 UTC
        // on the 2nd.
        let fragments = convert_interval(
            date("2024-06-01"),
            iv("22:00", "23:30"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-06-02"),
                interval: iv("02:00", "03:30"),
            }]
        );
    }

    #[test]
    fn test_negative_shift_lands_on_previous_day() {
        let fragments = convert_interval(
            date("2024-06-01"),
            iv("00:30", "01:00"),
            UTC,
            tz("America/New_York"),
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-05-31"),
                interval: iv("20:30", "21:00"),
            }]
        );
    }

    #[test]
    fn test_split_at_target_midnight() {
        // 19:00-21:00 EDT is 23:00-01:00 UTC: one fragment on each side
        // of midnight.
        let fragments = convert_interval(
            date("2024-06-01"),
            iv("19:00", "21:00"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![
                DatedInterval {
                    date: date("2024-06-01"),
                    interval: iv("23:00", "24:00"),
                },
                DatedInterval {
                    date: date("2024-06-02"),
                    interval: iv("00:00", "01:00"),
                },
            ]
        );
    }

    #[test]
    fn test_end_exactly_at_midnight_yields_single_fragment() {
        // 20:00-24:00 EDT ends exactly at 04:00 UTC, no boundary crossed
        // for the end; 00:00-04:00 attaches wholly to the next day.
        let fragments = convert_interval(
            date("2024-06-01"),
            iv("20:00", "24:00"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-06-02"),
                interval: iv("00:00", "04:00"),
            }]
        );
    }

    #[test]
    fn test_fall_back_ambiguous_times_use_post_transition_offset() {
        // 2024-11-03 in New York: clocks fall back at 02:00 EDT to 01:00
        // EST. Local 01:00-02:00 is ambiguous; the post-transition EST
        // (UTC-5) reading applies.
        let fragments = convert_interval(
            date("2024-11-03"),
            iv("01:00", "02:00"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-11-03"),
                interval: iv("06:00", "07:00"),
            }]
        );
    }

    #[test]
    fn test_spring_forward_gap_uses_post_gap_offset() {
        // 2024-03-10 in New York: 02:00-03:00 local does not exist. The
        // post-gap EDT (UTC-4) offset applies to the skipped times.
        let fragments = convert_interval(
            date("2024-03-10"),
            iv("02:00", "03:30"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-03-10"),
                interval: iv("06:00", "07:30"),
            }]
        );
    }

    #[test]
    fn test_full_day_slot_over_fall_back_covers_interior_day() {
        // 00:00-24:00 in New York on 2024-11-03 lasts 25 absolute hours
        // (EDT start, EST end). In Lima (UTC-5 year round) it runs from
        // 23:00 on the 2nd to exactly midnight of the 4th: a boundary
        // fragment, a whole interior day, and nothing on the 4th.
        let fragments = convert_interval(
            date("2024-11-03"),
            iv("00:00", "24:00"),
            tz("America/New_York"),
            tz("America/Lima"),
        );
        assert_eq!(
            fragments,
            vec![
                DatedInterval {
                    date: date("2024-11-02"),
                    interval: iv("23:00", "24:00"),
                },
                DatedInterval {
                    date: date("2024-11-03"),
                    interval: iv("00:00", "24:00"),
                },
            ]
        );
    }

    #[test]
    fn test_full_day_slot_over_fall_back_to_utc() {
        // The same 25-hour day seen from UTC: 04:00 on the 3rd through
        // 05:00 on the 4th, split at one midnight.
        let fragments = convert_interval(
            date("2024-11-03"),
            iv("00:00", "24:00"),
            tz("America/New_York"),
            UTC,
        );
        assert_eq!(
            fragments,
            vec![
                DatedInterval {
                    date: date("2024-11-03"),
                    interval: iv("04:00", "24:00"),
                },
                DatedInterval {
                    date: date("2024-11-04"),
                    interval: iv("00:00", "05:00"),
                },
            ]
        );
    }

    #[test]
    fn test_half_hour_offset_zone() {
        // Asia/Kolkata is UTC+5:30 year round.
        let fragments = convert_interval(
            date("2024-06-01"),
            iv("09:00", "10:00"),
            UTC,
            tz("Asia/Kolkata"),
        );
        assert_eq!(
            fragments,
            vec![DatedInterval {
                date: date("2024-06-01"),
                interval: iv("14:30", "15:30"),
            }]
        );
    }

    #[test]
    fn test_convert_slots_for_date_scopes_to_target_day() {
        // The 22:00-23:30 EDT slot stored on the 1st falls on 2024-06-02
        // in UTC: excluded when targeting the 1st, included on the 2nd.
        let slots = vec![iv("22:00", "23:30")];
        let ny = tz("America/New_York");
        let anchor = date("2024-06-01");

        let on_first = convert_slots_for_date(anchor, anchor, &slots, ny, UTC);
        assert!(on_first.is_empty());

        let on_second = convert_slots_for_date(anchor, date("2024-06-02"), &slots, ny, UTC);
        assert_eq!(on_second, vec![iv("02:00", "03:30")]);
    }

    #[test]
    fn test_convert_slots_sorted_by_start() {
        let day = date("2024-06-01");
        let slots = vec![iv("15:00", "16:00"), iv("09:00", "10:00")];
        let converted = convert_slots_for_date(day, day, &slots, UTC, UTC);
        assert_eq!(converted, vec![iv("09:00", "10:00"), iv("15:00", "16:00")]);
    }
}
