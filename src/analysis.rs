use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::archive::ToolReport;

/// ECMAScript editions in release order
pub const ES_VERSION_ORDER: [&str; 9] = [
    "ES5", "ES2015", "ES2016", "ES2017", "ES2018", "ES2019", "ES2020", "ES2021", "ES2022",
];

/// JavaScript error kinds recorded for non-transparent sites
pub const TRANSPARENCY_ISSUE_KINDS: [(&str, &str); 4] = [
    ("ReferenceError", "ReferenceError"),
    ("SyntaxError", "SyntaxError"),
    ("TypeError", "TypeError"),
    ("OtherError", "Other"),
];

/// Reasons a site is not eventually compatible with a tool
pub const COMPATIBILITY_ISSUE_KINDS: [(&str, &str); 4] = [
    ("CrashError", "Crashes"),
    ("TranspileError", "Transpilation errors"),
    ("ParseError", "Parse errors"),
    ("AnalysisError", "Analysis errors"),
];

/// Sum that saturates at `u64::MAX` instead of overflowing
pub fn saturating_sum<I: IntoIterator<Item = u64>>(values: I) -> u64 {
    values.into_iter().fold(0, u64::saturating_add)
}

pub fn total(values: &[u64]) -> u64 {
    saturating_sum(values.iter().copied())
}

/// `value` as a percentage of `denominator`; 0 when the denominator is 0
pub fn percentage(value: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    value as f64 / denominator as f64 * 100.0
}

/// Each value as a percentage of the sum of all values
pub fn percentages(values: &[u64]) -> Vec<f64> {
    let sum: f64 = values.iter().map(|v| *v as f64).sum();
    if sum == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|v| *v as f64 / sum * 100.0).collect()
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A label with its count and share of the overall total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Share {
    pub label: String,
    pub count: u64,
    pub percentage: f64,
}

/// Shares of each version label against the sum of all counts
pub fn version_shares(counts: &[(String, u64)]) -> Vec<Share> {
    let values: Vec<u64> = counts.iter().map(|(_, c)| *c).collect();
    counts
        .iter()
        .zip(percentages(&values))
        .map(|((label, count), pct)| Share {
            label: label.clone(),
            count: *count,
            percentage: pct,
        })
        .collect()
}

/// Running sum of `counts` re-ordered by `order`.
///
/// Labels listed in `order` but absent from `counts` contribute 0; labels
/// missing from `order` are appended afterwards in their input order.
pub fn cumulative_counts(counts: &[(String, u64)], order: &[&str]) -> Vec<(String, u64)> {
    let lookup: BTreeMap<&str, u64> = counts.iter().map(|(l, c)| (l.as_str(), *c)).collect();

    let mut ordered: Vec<(String, u64)> = order
        .iter()
        .map(|label| (label.to_string(), lookup.get(label).copied().unwrap_or(0)))
        .collect();
    ordered.extend(
        counts
            .iter()
            .filter(|(label, _)| !order.contains(&label.as_str()))
            .cloned(),
    );

    let mut running: u64 = 0;
    ordered
        .into_iter()
        .map(|(label, count)| {
            running = running.saturating_add(count);
            (label, running)
        })
        .collect()
}

/// Union of the labels of two datasets, sorted lexicographically
pub fn union_sorted_keys(a: &[(String, u64)], b: &[(String, u64)]) -> Vec<String> {
    a.iter()
        .chain(b.iter())
        .map(|(label, _)| label.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Values of `data` in `keys` order, 0 where a key is missing
pub fn aligned_values(data: &[(String, u64)], keys: &[String]) -> Vec<u64> {
    keys.iter()
        .map(|key| {
            data.iter()
                .find(|(label, _)| label == key)
                .map(|(_, count)| *count)
                .unwrap_or(0)
        })
        .collect()
}

/// How a tool's accessible sites split by transparency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransparencyBreakdown {
    pub transparent: u64,
    pub non_transparent: u64,
    pub not_applicable: u64,
}

impl TransparencyBreakdown {
    pub fn new(accessible: u64, transparent: u64, non_transparent: u64) -> Result<Self, String> {
        let known = match transparent.checked_add(non_transparent) {
            Some(known) if known <= accessible => known,
            _ => {
                return Err(format!(
                    "transparent ({}) + non-transparent ({}) exceeds accessible ({})",
                    transparent, non_transparent, accessible
                ))
            }
        };
        Ok(Self {
            transparent,
            non_transparent,
            not_applicable: accessible - known,
        })
    }

    pub fn accessible(&self) -> u64 {
        self.transparent + self.non_transparent + self.not_applicable
    }

    /// Slices in legend order: transparent, non-transparent, N/A
    pub fn slices(&self) -> [u64; 3] {
        [self.transparent, self.non_transparent, self.not_applicable]
    }
}

/// Per-category issue count with its share of all the tool's issues
pub fn issue_shares(issues: &BTreeMap<String, u64>, categories: &[&str]) -> Vec<Share> {
    let all = saturating_sum(issues.values().copied());
    categories
        .iter()
        .map(|category| {
            let count = issues.get(*category).copied().unwrap_or(0);
            Share {
                label: category.to_string(),
                count,
                percentage: percentage(count, all),
            }
        })
        .collect()
}

fn required(report: &ToolReport, field: &str, value: Option<u64>) -> Result<u64, String> {
    value.ok_or_else(|| format!("tool `{}` has no `{}` count", report.tool_name, field))
}

/// Compatibility counts of one tool over the accessible sites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCompatibility {
    pub tool: String,
    pub accessible: u64,
    pub syntactically_compatible: u64,
    pub compatible: u64,
    pub eventually_compatible: u64,
    pub unknown_compatibility: u64,
}

impl ToolCompatibility {
    pub fn from_report(report: &ToolReport) -> Result<Self, String> {
        Ok(Self {
            tool: report.tool_name.clone(),
            accessible: required(report, "accessible", report.denominator())?,
            syntactically_compatible: required(
                report,
                "syntacticallyCompatible",
                report.syntactically_compatible,
            )?,
            compatible: required(report, "compatible", report.compatible)?,
            eventually_compatible: required(
                report,
                "eventuallyCompatible",
                report.eventually_compatible,
            )?,
            unknown_compatibility: report.unknown().unwrap_or(0),
        })
    }

    /// Upper bound of a count once unknown outcomes are assumed compatible
    pub fn with_unknown(&self, count: u64) -> u64 {
        count.saturating_add(self.unknown_compatibility)
    }
}

/// Transparency counts of one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolTransparency {
    pub tool: String,
    pub accessible: u64,
    pub transparent: u64,
    pub non_transparent: u64,
}

impl ToolTransparency {
    pub fn from_report(report: &ToolReport) -> Result<Self, String> {
        Ok(Self {
            tool: report.tool_name.clone(),
            accessible: required(report, "accessible", report.denominator())?,
            transparent: required(report, "transparent", report.transparent)?,
            non_transparent: required(report, "nonTransparent", report.non_transparent)?,
        })
    }

    pub fn breakdown(&self) -> Result<TransparencyBreakdown, String> {
        TransparencyBreakdown::new(self.accessible, self.transparent, self.non_transparent)
            .map_err(|e| format!("tool `{}`: {}", self.tool, e))
    }
}

/// Categorized issue counts of one tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolIssues {
    pub tool: String,
    pub counts: BTreeMap<String, u64>,
}

impl ToolIssues {
    pub fn compatibility(report: &ToolReport) -> Self {
        Self {
            tool: report.tool_name.clone(),
            counts: report.compatibility_issues.clone(),
        }
    }

    pub fn transparency(report: &ToolReport) -> Self {
        Self {
            tool: report.tool_name.clone(),
            counts: report.transparency_issues.clone(),
        }
    }

    pub fn total(&self) -> u64 {
        saturating_sum(self.counts.values().copied())
    }

    /// Counts in the order of `categories`, 0 where absent
    pub fn ordered(&self, categories: &[&str]) -> Vec<u64> {
        categories
            .iter()
            .map(|c| self.counts.get(*c).copied().unwrap_or(0))
            .collect()
    }
}
