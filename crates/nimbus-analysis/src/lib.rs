#![doc = include_str!("../README.md")]

use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Whether a branch's result is significantly better, worse, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Significance {
    Positive,
    Negative,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VariantType {
    Control,
    Variant,
}

/// Metric keys as they appear in analysis results.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, Serialize,
)]
pub enum Metric {
    #[strum(serialize = "retained")]
    #[serde(rename = "retained")]
    Retention,
    #[strum(serialize = "search_count")]
    #[serde(rename = "search_count")]
    Search,
    #[strum(serialize = "identity")]
    #[serde(rename = "identity")]
    UserCount,
}

/// Statistics computed for each metric.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Statistic {
    #[strum(serialize = "percentage")]
    #[serde(rename = "percentage")]
    Percent,
    Binomial,
    Mean,
    Count,
}

/// How a branch is compared against control.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BranchComparison {
    Absolute,
    Difference,
    #[strum(serialize = "relative_uplift")]
    #[serde(rename = "relative_uplift")]
    Uplift,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter, EnumString, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TableLabel {
    Highlights,
    Results,
}

/// Key of the tooltip text shown next to a metric's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MetricTip {
    Retention,
    Search,
    UserCount,
}

/// A metric column or row: the result key, its display name, and its tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MetricDisplay {
    pub value: Metric,
    pub name: &'static str,
    pub tooltip: MetricTip,
}

// Metrics shown in the results table, left to right.
pub const RESULTS_METRICS_LIST: [MetricDisplay; 3] = [
    MetricDisplay {
        value: Metric::Retention,
        name: "2-Week Browser Retention",
        tooltip: MetricTip::Retention,
    },
    MetricDisplay {
        value: Metric::Search,
        name: "Daily Mean Searches Per User",
        tooltip: MetricTip::Search,
    },
    MetricDisplay {
        value: Metric::UserCount,
        name: "Total Users",
        tooltip: MetricTip::UserCount,
    },
];

// Metrics shown in the highlights table, top to bottom.
pub const HIGHLIGHTS_METRICS_LIST: [MetricDisplay; 2] = [
    MetricDisplay {
        value: Metric::Retention,
        name: "Retention",
        tooltip: MetricTip::Retention,
    },
    MetricDisplay {
        value: Metric::Search,
        name: "Search",
        tooltip: MetricTip::Search,
    },
];

/// The ordered metrics displayed in `table`.
pub fn metrics_for(table: TableLabel) -> &'static [MetricDisplay] {
    match table {
        TableLabel::Results => &RESULTS_METRICS_LIST,
        TableLabel::Highlights => &HIGHLIGHTS_METRICS_LIST,
    }
}
