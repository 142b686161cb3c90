//! Shared utility functions for SurfsUp crates.

/// Date utility functions
pub mod dates {
    use chrono::{Duration, Local, NaiveDate};

    /// Format used by the store for observation dates.
    pub const DATE_FORMAT: &str = "%Y-%m-%d";

    /// Length of the trailing window used by "last year" queries.
    pub const WINDOW_DAYS: i64 = 365;

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, DATE_FORMAT)?)
    }

    /// Start of the trailing window ending at `reference`: 365 days earlier,
    /// regardless of leap years. `None` when that falls before the earliest
    /// representable date.
    pub fn one_year_before(reference: &NaiveDate) -> Option<NaiveDate> {
        reference.checked_sub_signed(Duration::days(WINDOW_DAYS))
    }

    /// Today's date on the local wall clock.
    pub fn today() -> NaiveDate {
        Local::now().date_naive()
    }

}

/// Descriptive statistics over plain `f64` samples
pub mod stats {
    use std::fmt;

    /// Count, mean, spread and quartiles of a sample.
    ///
    /// Quartiles interpolate linearly between closest ranks and the standard
    /// deviation uses the sample (n - 1) denominator; `std` is `None` for a
    /// single value.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Summary {
        pub count: usize,
        pub mean: f64,
        pub std: Option<f64>,
        pub min: f64,
        pub q25: f64,
        pub median: f64,
        pub q75: f64,
        pub max: f64,
    }

    /// Summarize `values`, or `None` when there is nothing to summarize.
    pub fn describe(values: &[f64]) -> Option<Summary> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let squares: f64 = sorted.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        });

        Some(Summary {
            count,
            mean,
            std,
            min: sorted[0],
            q25: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q75: quantile(&sorted, 0.75),
            max: sorted[count - 1],
        })
    }

    /// Linear-interpolated quantile of an already sorted, non-empty slice.
    fn quantile(sorted: &[f64], q: f64) -> f64 {
        let pos = q * (sorted.len() - 1) as f64;
        let lower = pos.floor() as usize;
        let upper = pos.ceil() as usize;
        let frac = pos - lower as f64;
        sorted[lower] + (sorted[upper] - sorted[lower]) * frac
    }

    impl fmt::Display for Summary {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let std = self.std.unwrap_or(f64::NAN);
            let rows = [
                ("count", self.count as f64),
                ("mean", self.mean),
                ("std", std),
                ("min", self.min),
                ("25%", self.q25),
                ("50%", self.median),
                ("75%", self.q75),
                ("max", self.max),
            ];
            for (label, value) in rows {
                writeln!(f, "{:<6}{:>16.6}", label, value)?;
            }
            Ok(())
        }
    }

    /// One bar of a histogram: values in `[lower, upper)`, or `[lower, upper]`
    /// for the last bin.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Bin {
        pub lower: f64,
        pub upper: f64,
        pub count: usize,
    }

    /// Split the range of `values` into `bins` equal-width bins and count
    /// the values falling in each.
    ///
    /// A sample whose values are all equal is centred in a range one unit
    /// wide. Empty input or zero bins yields no bins.
    pub fn histogram(values: &[f64], bins: usize) -> Vec<Bin> {
        if values.is_empty() || bins == 0 {
            return Vec::new();
        }
        let mut lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;

        let mut result: Vec<Bin> = (0..bins)
            .map(|i| Bin {
                lower: lo + width * i as f64,
                upper: if i + 1 == bins { hi } else { lo + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();
        for v in values {
            let idx = (((v - lo) / width).floor() as usize).min(bins - 1);
            result[idx].count += 1;
        }
        result
    }

}
