//! Calendar-period bucketing for the income charts.
use std::collections::BTreeMap;

use anyhow::Context;
use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, Months, NaiveDate, NaiveTime, TimeZone, Utc,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Daily,
    #[default]
    Monthly,
    Yearly,
}

impl Period {
    /// Reads the `period` query value; anything but `daily` or `yearly` is monthly.
    pub fn from_query(value: &str) -> Self {
        match value {
            "daily" => Period::Daily,
            "yearly" => Period::Yearly,
            _ => Period::Monthly,
        }
    }

    /// Number of calendar units a report covers, the current one included.
    pub fn span(self) -> u32 {
        match self {
            Period::Daily => 7,
            Period::Monthly => 12,
            Period::Yearly => 5,
        }
    }

    /// First day of the calendar unit containing `date`.
    pub fn unit_start(self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Daily => Some(date),
            Period::Monthly => date.with_day(1),
            Period::Yearly => NaiveDate::from_ymd_opt(date.year(), 1, 1),
        }
    }

    fn shift(self, unit_start: NaiveDate, units: i64) -> Option<NaiveDate> {
        let magnitude = u32::try_from(units.unsigned_abs()).ok()?;
        match (self, units >= 0) {
            (Period::Daily, true) => unit_start.checked_add_days(Days::new(magnitude.into())),
            (Period::Daily, false) => unit_start.checked_sub_days(Days::new(magnitude.into())),
            (Period::Monthly, true) => unit_start.checked_add_months(Months::new(magnitude)),
            (Period::Monthly, false) => unit_start.checked_sub_months(Months::new(magnitude)),
            (Period::Yearly, true) => {
                unit_start.checked_add_months(Months::new(magnitude.checked_mul(12)?))
            }
            (Period::Yearly, false) => {
                unit_start.checked_sub_months(Months::new(magnitude.checked_mul(12)?))
            }
        }
    }

    /// Chart label of the unit starting at `unit_start`: `Mon 22`, `Jul 2024` or `2024`.
    pub fn label(self, unit_start: NaiveDate) -> String {
        match self {
            Period::Daily => unit_start.format("%a %-d").to_string(),
            Period::Monthly => unit_start.format("%b %Y").to_string(),
            Period::Yearly => unit_start.format("%Y").to_string(),
        }
    }
}

/// Half-open range of whole calendar units `[start, end)` in some local calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodWindow {
    pub period: Period,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl PeriodWindow {
    /// The `units` calendar units ending with the one that contains `today`.
    pub fn spanning(period: Period, today: NaiveDate, units: u32) -> anyhow::Result<Self> {
        let out_of_range = || format!("{period:?} window around {today} is out of range");
        let current = period.unit_start(today).with_context(out_of_range)?;
        let start = period
            .shift(current, -(i64::from(units.max(1)) - 1))
            .with_context(out_of_range)?;
        let end = period.shift(current, 1).with_context(out_of_range)?;
        Ok(Self { period, start, end })
    }

    /// Window of a report: 7 days, 12 months or 5 years ending with today's unit.
    pub fn ending_on(period: Period, today: NaiveDate) -> anyhow::Result<Self> {
        Self::spanning(period, today, period.span())
    }

    /// Only the unit containing `today`, e.g. the current month.
    pub fn current(period: Period, today: NaiveDate) -> anyhow::Result<Self> {
        Self::spanning(period, today, 1)
    }

    /// Start of every unit in the window, oldest first.
    pub fn units(&self) -> Vec<NaiveDate> {
        let mut units = Vec::with_capacity(self.period.span() as usize);
        let mut cursor = Some(self.start);
        while let Some(unit) = cursor.filter(|unit| *unit < self.end) {
            units.push(unit);
            cursor = self.period.shift(unit, 1);
        }
        units
    }

    /// The window as UTC instants, each bound taken at local midnight of `offset`.
    pub fn to_utc(&self, offset: &FixedOffset) -> (DateTime<Utc>, DateTime<Utc>) {
        let midnight = |date: NaiveDate| {
            let local = date.and_time(NaiveTime::MIN);
            Utc.from_utc_datetime(&(local - Duration::seconds(offset.local_minus_utc().into())))
        };
        (midnight(self.start), midnight(self.end))
    }

    /// Buckets `records` by the unit their local creation date falls in.
    ///
    /// Emits exactly one point per unit of the window, oldest first, zero-filled.
    /// Amounts are summed whatever the work order status; records outside the
    /// window are ignored.
    pub fn aggregate(&self, records: &[IncomeRecord], offset: &FixedOffset) -> Vec<ReportPoint> {
        let mut buckets: BTreeMap<NaiveDate, (usize, f64)> = BTreeMap::new();
        for record in records {
            let local_date = record.created_at.with_timezone(offset).date_naive();
            if local_date < self.start || local_date >= self.end {
                continue;
            }
            let Some(unit) = self.period.unit_start(local_date) else {
                continue;
            };
            let bucket = buckets.entry(unit).or_default();
            bucket.0 += 1;
            bucket.1 += record.amount.unwrap_or_default();
        }
        self.units()
            .into_iter()
            .map(|unit| {
                let (work_order_count, income_sum) =
                    buckets.get(&unit).copied().unwrap_or_default();
                ReportPoint {
                    label: self.period.label(unit),
                    work_order_count,
                    income_sum,
                }
            })
            .collect()
    }
}

/// Creation time and amount of one work order, the only columns a report reads.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomeRecord {
    pub created_at: DateTime<Utc>,
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPoint {
    pub label: String,
    pub work_order_count: usize,
    pub income_sum: f64,
}
