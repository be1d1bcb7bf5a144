use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};

use crate::scale::linear::LinearScale;

const DAY_MS: i64 = 86_400_000;
const WEEK_MS: i64 = 7 * DAY_MS;
const MONTH_MS: i64 = 30 * DAY_MS;
const YEAR_MS: i64 = 365 * DAY_MS;

/// Calendar step between adjacent ticks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickInterval {
    /// Every `n` days (day-of-month aligned).
    Day(u32),
    /// Every Sunday.
    Week,
    /// Every `n` months (month-of-year aligned).
    Month(u32),
    /// Every `n` years (year aligned).
    Year(u32),
}

const INTERVALS: [(TickInterval, i64); 6] = [
    (TickInterval::Day(1), DAY_MS),
    (TickInterval::Day(2), 2 * DAY_MS),
    (TickInterval::Week, WEEK_MS),
    (TickInterval::Month(1), MONTH_MS),
    (TickInterval::Month(3), 3 * MONTH_MS),
    (TickInterval::Year(1), YEAR_MS),
];

/// Time scale over UTC instants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtcScale {
    domain: [DateTime<Utc>; 2],
    inner: LinearScale,
}

impl Default for UtcScale {
    fn default() -> Self {
        let d0 = DateTime::<Utc>::UNIX_EPOCH;
        let d1 = d0 + Duration::days(1);
        let mut s = Self {
            domain: [d0, d1],
            inner: LinearScale::default(),
        };
        s.set_domain([d0, d1]);
        s
    }
}

impl UtcScale {
    /// Replace the domain.
    pub fn set_domain(&mut self, domain: [DateTime<Utc>; 2]) -> &mut Self {
        self.domain = domain;
        self.inner.set_domain([
            domain[0].timestamp_millis() as f64,
            domain[1].timestamp_millis() as f64,
        ]);
        self
    }

    /// Replace the range.
    pub fn set_range(&mut self, range: [f64; 2]) -> &mut Self {
        self.inner.set_range(range);
        self
    }

    /// Current domain.
    pub fn domain(&self) -> [DateTime<Utc>; 2] {
        self.domain
    }

    /// Current range.
    pub fn range(&self) -> [f64; 2] {
        self.inner.range()
    }

    /// Map an instant into the range.
    pub fn map(&self, at: &DateTime<Utc>) -> f64 {
        self.inner.map(at.timestamp_millis() as f64)
    }

    /// Pick a calendar step yielding roughly `count` ticks over the domain.
    pub fn tick_interval(&self, count: usize) -> TickInterval {
        let [a, b] = self.domain;
        let (start, stop) = ordered_ms(a, b);
        let target = (stop - start) as f64 / count.max(1) as f64;

        let i = INTERVALS.partition_point(|(_, ms)| (*ms as f64) <= target);
        if i == INTERVALS.len() {
            let step = tick_step(
                start as f64 / YEAR_MS as f64,
                stop as f64 / YEAR_MS as f64,
                count,
            );
            return TickInterval::Year(step.max(1.0) as u32);
        }
        if i == 0 {
            return TickInterval::Day(1);
        }

        let (lo, lo_ms) = INTERVALS[i - 1];
        let (hi, hi_ms) = INTERVALS[i];
        if target / (lo_ms as f64) < (hi_ms as f64) / target {
            lo
        } else {
            hi
        }
    }

    /// Calendar-aligned tick instants inside the domain, ascending.
    pub fn ticks(&self, count: usize) -> Vec<DateTime<Utc>> {
        let [a, b] = self.domain;
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let interval = self.tick_interval(count);

        let mut out = Vec::new();
        let Some(mut day) = first_midnight_at_or_after(lo) else {
            return out;
        };
        let hi_day = hi.date_naive();

        match interval {
            TickInterval::Day(n) => {
                while day <= hi_day {
                    if (day.day() - 1) % n == 0 {
                        out.push(midnight(day));
                    }
                    day += Duration::days(1);
                }
            }
            TickInterval::Week => {
                while day.weekday() != Weekday::Sun {
                    day += Duration::days(1);
                }
                while day <= hi_day {
                    out.push(midnight(day));
                    day += Duration::days(7);
                }
            }
            TickInterval::Month(n) => {
                let mut month = first_of_month_at_or_after(day);
                while month <= hi_day {
                    if month.month0() % n == 0 {
                        out.push(midnight(month));
                    }
                    month = next_month(month);
                }
            }
            TickInterval::Year(n) => {
                let mut year = if day.ordinal() == 1 {
                    day.year()
                } else {
                    day.year() + 1
                };
                while let Some(jan1) = NaiveDate::from_ymd_opt(year, 1, 1) {
                    if jan1 > hi_day {
                        break;
                    }
                    if year.rem_euclid(n as i32) == 0 {
                        out.push(midnight(jan1));
                    }
                    year += 1;
                }
            }
        }
        out
    }

    /// Label for a tick, choosing the coarsest calendar unit the instant is aligned to.
    pub fn tick_format(at: &DateTime<Utc>) -> String {
        if at.num_seconds_from_midnight() != 0 {
            return at.format("%I %p").to_string();
        }
        if at.day() != 1 {
            if at.weekday() != Weekday::Sun {
                return at.format("%a %d").to_string();
            }
            return at.format("%b %d").to_string();
        }
        if at.month() != 1 {
            return at.format("%B").to_string();
        }
        at.format("%Y").to_string()
    }
}

fn ordered_ms(a: DateTime<Utc>, b: DateTime<Utc>) -> (i64, i64) {
    let (a, b) = (a.timestamp_millis(), b.timestamp_millis());
    if a <= b { (a, b) } else { (b, a) }
}

fn midnight(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(chrono::NaiveTime::MIN).and_utc()
}

fn first_midnight_at_or_after(at: DateTime<Utc>) -> Option<NaiveDate> {
    let day = at.date_naive();
    if at.num_seconds_from_midnight() == 0 && at.nanosecond() == 0 {
        Some(day)
    } else {
        day.succ_opt()
    }
}

fn first_of_month_at_or_after(day: NaiveDate) -> NaiveDate {
    if day.day() == 1 {
        day
    } else {
        next_month(day.with_day(1).unwrap_or(day))
    }
}

fn next_month(first: NaiveDate) -> NaiveDate {
    let (y, m) = if first.month() == 12 {
        (first.year() + 1, 1)
    } else {
        (first.year(), first.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or(NaiveDate::MAX)
}

/// Round step between `count` ticks over `[start, stop]`, a power of ten times 1, 2, or 5.
pub(crate) fn tick_step(start: f64, stop: f64, count: usize) -> f64 {
    let step0 = (stop - start).abs() / count.max(1) as f64;
    if step0 == 0.0 || !step0.is_finite() {
        return 0.0;
    }
    let mut step1 = 10f64.powf(step0.log10().floor());
    let error = step0 / step1;
    if error >= 50f64.sqrt() {
        step1 *= 10.0;
    } else if error >= 10f64.sqrt() {
        step1 *= 5.0;
    } else if error >= 2f64.sqrt() {
        step1 *= 2.0;
    }
    step1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        midnight(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn maps_domain_onto_range() {
        let mut s = UtcScale::default();
        s.set_domain([ymd(2020, 1, 1), ymd(2022, 1, 1)])
            .set_range([50.0, 890.0]);
        assert_eq!(s.map(&ymd(2020, 1, 1)), 50.0);
        assert_eq!(s.map(&ymd(2022, 1, 1)), 890.0);
        let mid = s.map(&ymd(2021, 1, 1));
        assert!(mid > 460.0 && mid < 480.0);
    }

    #[test]
    fn multi_year_domain_ticks_on_years() {
        let mut s = UtcScale::default();
        s.set_domain([ymd(2013, 1, 1), ymd(2020, 1, 1)]);
        assert_eq!(s.tick_interval(10), TickInterval::Year(1));
        let ticks = s.ticks(10);
        assert_eq!(ticks.first(), Some(&ymd(2013, 1, 1)));
        assert_eq!(ticks.last(), Some(&ymd(2020, 1, 1)));
        assert!(ticks.iter().all(|t| t.month() == 1 && t.day() == 1));
    }

    #[test]
    fn long_domains_skip_years() {
        let mut s = UtcScale::default();
        s.set_domain([ymd(1900, 1, 1), ymd(2000, 1, 1)]);
        assert_eq!(s.tick_interval(10), TickInterval::Year(10));
        let ticks = s.ticks(10);
        assert_eq!(ticks.len(), 11);
        assert!(ticks.iter().all(|t| t.year() % 10 == 0));
    }

    #[test]
    fn short_domains_tick_on_days() {
        let mut s = UtcScale::default();
        s.set_domain([ymd(2020, 3, 1), ymd(2020, 3, 11)]);
        assert_eq!(s.tick_interval(10), TickInterval::Day(1));
        assert_eq!(s.ticks(10).len(), 11);
    }

    #[test]
    fn tick_format_uses_coarsest_aligned_unit() {
        assert_eq!(UtcScale::tick_format(&ymd(2019, 1, 1)), "2019");
        assert_eq!(UtcScale::tick_format(&ymd(2019, 3, 1)), "March");
        // 2019-03-03 is a Sunday.
        assert_eq!(UtcScale::tick_format(&ymd(2019, 3, 3)), "Mar 03");
        assert_eq!(UtcScale::tick_format(&ymd(2019, 3, 4)), "Mon 04");
    }

    #[test]
    fn tick_step_picks_round_steps() {
        assert_eq!(tick_step(0.0, 100.0, 10), 10.0);
        assert_eq!(tick_step(0.0, 7.0, 10), 0.5);
        assert_eq!(tick_step(0.0, 35.0, 10), 5.0);
        assert_eq!(tick_step(0.0, 0.0, 10), 0.0);
    }
}
