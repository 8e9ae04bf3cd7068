use crate::trigger::TimeUnit;

const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_HOUR: f64 = 3_600_000.0;

/// Decides whether `due` currently sits inside the firing window of a trigger.
///
/// `diff = due - now` is expressed in `unit`, and the window matches when
/// `|diff - target|` is within the tolerance. The tolerance is always given in
/// minutes, also for hour based triggers. Overdue assignments (negative `diff`)
/// are legal, so a poll that ran slightly late still catches a `target = 0` window.
pub fn matches(now: i64, due: i64, target: f64, tolerance_minutes: f64, unit: TimeUnit) -> bool {
    let diff_millis = due as f64 - now as f64;
    let (diff, tolerance) = match unit {
        TimeUnit::Hours => (diff_millis / MILLIS_PER_HOUR, tolerance_minutes / 60.0),
        TimeUnit::Minutes => (diff_millis / MILLIS_PER_MINUTE, tolerance_minutes),
    };
    (diff - target).abs() <= tolerance
}

#[cfg(test)]
mod test {
    use super::*;

    const MINUTE: i64 = 60 * 1000;
    const HOUR: i64 = 60 * MINUTE;
    const NOW: i64 = 1_714_564_800_000;

    #[test]
    fn it_matches_inside_tolerance_in_minutes() {
        assert!(matches(NOW, NOW + 61 * MINUTE, 60.0, 2.0, TimeUnit::Minutes));
        assert!(!matches(NOW, NOW + 61 * MINUTE, 60.0, 0.5, TimeUnit::Minutes));
        assert!(matches(NOW, NOW + 60 * MINUTE, 60.0, 0.0, TimeUnit::Minutes));
        // Edges are inclusive
        assert!(matches(NOW, NOW + 62 * MINUTE, 60.0, 2.0, TimeUnit::Minutes));
        assert!(!matches(NOW, NOW + 62 * MINUTE + 1, 60.0, 2.0, TimeUnit::Minutes));
    }

    #[test]
    fn it_matches_inside_tolerance_in_hours() {
        assert!(matches(NOW, NOW + 24 * HOUR, 24.0, 10.0, TimeUnit::Hours));
        assert!(matches(NOW, NOW + 24 * HOUR - 9 * MINUTE, 24.0, 10.0, TimeUnit::Hours));
        assert!(matches(NOW, NOW + 24 * HOUR + 9 * MINUTE, 24.0, 10.0, TimeUnit::Hours));
        assert!(!matches(NOW, NOW + 24 * HOUR + 11 * MINUTE, 24.0, 10.0, TimeUnit::Hours));
        assert!(!matches(NOW, NOW + 3 * HOUR, 2.0, 10.0, TimeUnit::Hours));
    }

    #[test]
    fn it_matches_recently_overdue_assignments() {
        assert!(matches(NOW, NOW - MINUTE, 0.0, 2.0, TimeUnit::Minutes));
        assert!(matches(NOW, NOW - 30 * 1000, 0.0, 0.5, TimeUnit::Minutes));
        assert!(!matches(NOW, NOW - 3 * MINUTE, 0.0, 2.0, TimeUnit::Minutes));
    }

    #[test]
    fn it_only_depends_on_the_distance_between_now_and_due() {
        let offsets = [-90, -7, -1, 0, 1, 3, 59, 60, 61, 119, 1440, 1500];
        let shifts = [-5 * HOUR, -1, 0, 1, 17 * MINUTE, 30 * 24 * HOUR];
        let windows = [(0.0, 0.5), (1.0, 1.0), (2.0, 0.5), (60.0, 2.0), (1440.0, 10.0)];
        for offset in offsets {
            for (target, tolerance) in windows {
                let expected = matches(NOW, NOW + offset * MINUTE, target, tolerance, TimeUnit::Minutes);
                for shift in shifts {
                    let now = NOW + shift;
                    let due = now + offset * MINUTE;
                    assert_eq!(
                        matches(now, due, target, tolerance, TimeUnit::Minutes),
                        expected,
                        "offset: {}, shift: {}, target: {}",
                        offset,
                        shift,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn it_is_symmetric_when_moving_due_and_target_together() {
        let deltas = [0_i64, 1, 5, 30, 120];
        let windows = [(0.0, 0.5), (2.0, 1.0), (60.0, 2.0)];
        for offset in -10..=130 {
            for (target, tolerance) in windows {
                let expected = matches(NOW, NOW + offset * MINUTE, target, tolerance, TimeUnit::Minutes);
                for delta in deltas {
                    let due = NOW + (offset + delta) * MINUTE;
                    let moved_target = target + delta as f64;
                    assert_eq!(
                        matches(NOW, due, moved_target, tolerance, TimeUnit::Minutes),
                        expected,
                        "offset: {}, delta: {}",
                        offset,
                        delta
                    );
                }
            }
        }
    }

    #[test]
    fn it_agrees_between_units_for_whole_hours() {
        // Exact window edges are left out, hour fractions are not exact in binary
        for offset in (-30_i64..=30).filter(|o| o.abs() != 10) {
            let due = NOW + 2 * HOUR + offset * MINUTE;
            assert_eq!(
                matches(NOW, due, 2.0, 10.0, TimeUnit::Hours),
                matches(NOW, due, 120.0, 10.0, TimeUnit::Minutes),
                "offset: {}",
                offset
            );
        }
    }
}
