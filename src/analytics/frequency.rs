// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Pair-count cap used when estimating cadence on a podcast detail view
pub const DETAIL_LOOKBACK_PAIRS: usize = 10;

/// Pair-count cap used when estimating cadence over a full episode catalog
pub const CATALOG_LOOKBACK_PAIRS: usize = 20;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Which wording set to use for cadence labels.
///
/// The two call sites historically worded the semi-weekly bucket
/// differently; both wordings are kept selectable pending a product
/// decision on which one wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelScheme {
    /// Podcast detail wording ("multiple times per week")
    Detail,
    /// Episode catalog wording ("2-3 times per week")
    Catalog,
}

/// Coarse publishing-cadence classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishingFrequency {
    Daily,
    SemiWeekly,
    Weekly,
    Biweekly,
    Monthly,
    Irregular,
    Unknown,
}

impl PublishingFrequency {
    /// Classify an average inter-episode gap, in days, into a cadence bucket
    pub fn from_average_days(average_days: f64) -> Self {
        if average_days <= 1.5 {
            PublishingFrequency::Daily
        } else if average_days <= 4.0 {
            PublishingFrequency::SemiWeekly
        } else if average_days <= 9.0 {
            PublishingFrequency::Weekly
        } else if average_days <= 18.0 {
            PublishingFrequency::Biweekly
        } else if average_days <= 35.0 {
            PublishingFrequency::Monthly
        } else {
            PublishingFrequency::Irregular
        }
    }

    /// Human-readable label under the given wording scheme
    pub fn label(&self, scheme: LabelScheme) -> &'static str {
        match self {
            PublishingFrequency::Daily => "daily",
            PublishingFrequency::SemiWeekly => match scheme {
                LabelScheme::Detail => "multiple times per week",
                LabelScheme::Catalog => "2-3 times per week",
            },
            PublishingFrequency::Weekly => "weekly",
            PublishingFrequency::Biweekly => "biweekly",
            PublishingFrequency::Monthly => "monthly",
            PublishingFrequency::Irregular => "irregular",
            PublishingFrequency::Unknown => "unknown",
        }
    }
}

/// Estimated publishing cadence for a sequence of release timestamps
#[derive(Debug, Clone)]
pub struct CadenceEstimate {
    /// Average gap between consecutive releases, in fractional days
    pub average_days_between: Option<f64>,
    pub frequency: PublishingFrequency,
}

/// Parse a single release timestamp leniently.
///
/// The directory nominally emits RFC 3339, but records drift; a short list
/// of fallback formats is tried before giving up.
pub fn parse_release_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
    }

    None
}

/// Parse release timestamps, dropping unparseable entries, and sort
/// most-recent-first
pub fn parse_release_dates<'a, I>(raw: I) -> Vec<DateTime<Utc>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut dates: Vec<DateTime<Utc>> = raw.into_iter().filter_map(parse_release_date).collect();
    dates.sort_unstable_by(|a, b| b.cmp(a));
    dates
}

/// Estimate publishing cadence from release dates sorted most-recent-first.
///
/// Averages the gaps of at most `max_pairs` leading consecutive pairs, so a
/// long-lived show's cadence reflects its recent schedule rather than its
/// entire history. Fewer than two dates yields an unknown cadence.
pub fn estimate(sorted_desc: &[DateTime<Utc>], max_pairs: usize) -> CadenceEstimate {
    if sorted_desc.len() < 2 || max_pairs == 0 {
        return CadenceEstimate {
            average_days_between: None,
            frequency: PublishingFrequency::Unknown,
        };
    }

    let gaps: Vec<f64> = sorted_desc
        .windows(2)
        .take(max_pairs)
        .map(|pair| (pair[0] - pair[1]).num_seconds() as f64 / SECONDS_PER_DAY)
        .collect();

    let average = gaps.iter().sum::<f64>() / gaps.len() as f64;

    CadenceEstimate {
        average_days_between: Some(average),
        frequency: PublishingFrequency::from_average_days(average),
    }
}
