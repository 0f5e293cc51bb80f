//! Measurement results embedded for figures rendered without an archive.

use std::collections::BTreeMap;

use crate::analysis::{ToolCompatibility, ToolIssues, ToolTransparency, COMPATIBILITY_ISSUE_KINDS};

/// Sites that loaded without a general failure in the reference run
pub const ACCESSIBLE_SITES: u64 = 3410;

/// Minimum ECMAScript version per accessible site
pub const SITE_VERSIONS: [(&str, u64); 9] = [
    ("ES2015", 745),
    ("ES2020", 740),
    ("ES2022", 550),
    ("ES5", 538),
    ("ES2017", 344),
    ("ES2018", 286),
    ("ES2019", 123),
    ("ES2021", 56),
    ("ES2016", 28),
];

/// Minimum ECMAScript version of sites' external scripts
pub const EXTERNAL_SCRIPT_VERSIONS: [(&str, u64); 9] = [
    ("ES2015", 410),
    ("ES2020", 346),
    ("ES5", 295),
    ("ES2022", 236),
    ("ES2018", 157),
    ("ES2017", 99),
    ("ES2019", 62),
    ("ES2021", 23),
    ("ES2016", 15),
];

/// Minimum ECMAScript version of sites' inline scripts
pub const INLINE_SCRIPT_VERSIONS: [(&str, u64); 9] = [
    ("ES5", 864),
    ("ES2015", 477),
    ("ES2020", 109),
    ("ES2022", 84),
    ("ES2017", 48),
    ("ES2018", 30),
    ("ES2019", 23),
    ("ES2021", 7),
    ("ES2016", 1),
];

// tool, syntactically compatible, compatible, eventually compatible, unknown
const COMPATIBILITY: [(&str, u64, u64, u64, u64); 6] = [
    ("JEST", 538, 140, 274, 0),
    ("IF-Transpiler", 538, 81, 197, 0),
    ("GIFC", 1941, 880, 1385, 25),
    ("Jalangi", 538, 503, 2261, 395),
    ("Linvail", 1941, 430, 560, 21),
    ("Project Foxhound", 3410, 2990, 2990, 12),
];

// tool, then counts in `COMPATIBILITY_ISSUE_KINDS` order
const COMPATIBILITY_ISSUES: [(&str, [u64; COMPATIBILITY_ISSUE_KINDS.len()]); 6] = [
    ("JEST", [159, 195, 2095, 687]),
    ("IF-Transpiler", [344, 197, 209, 2463]),
    ("GIFC", [152, 191, 53, 1604]),
    ("Jalangi", [370, 243, 141, 0]),
    ("Linvail", [1616, 108, 45, 1060]),
    ("Project Foxhound", [408, 0, 0, 0]),
];

// tool, transparent, non-transparent
const TRANSPARENCY: [(&str, u64, u64); 6] = [
    ("JEST", 45, 218),
    ("IF-Transpiler", 22, 165),
    ("GIFC", 52, 1113),
    ("Jalangi", 808, 762),
    ("Linvail", 215, 221),
    ("Project Foxhound", 2807, 65),
];

fn owned(pairs: &[(&str, u64)]) -> Vec<(String, u64)> {
    pairs.iter().map(|(l, c)| (l.to_string(), *c)).collect()
}

pub fn site_versions() -> Vec<(String, u64)> {
    owned(&SITE_VERSIONS)
}

pub fn external_script_versions() -> Vec<(String, u64)> {
    owned(&EXTERNAL_SCRIPT_VERSIONS)
}

pub fn inline_script_versions() -> Vec<(String, u64)> {
    owned(&INLINE_SCRIPT_VERSIONS)
}

pub fn tool_compatibility() -> Vec<ToolCompatibility> {
    COMPATIBILITY
        .iter()
        .map(
            |(tool, syntactic, compatible, eventual, unknown)| ToolCompatibility {
                tool: tool.to_string(),
                accessible: ACCESSIBLE_SITES,
                syntactically_compatible: *syntactic,
                compatible: *compatible,
                eventually_compatible: *eventual,
                unknown_compatibility: *unknown,
            },
        )
        .collect()
}

pub fn compatibility_issues() -> Vec<ToolIssues> {
    COMPATIBILITY_ISSUES
        .iter()
        .map(|(tool, counts)| ToolIssues {
            tool: tool.to_string(),
            counts: COMPATIBILITY_ISSUE_KINDS
                .iter()
                .zip(counts.iter())
                .map(|((kind, _), count)| (kind.to_string(), *count))
                .collect::<BTreeMap<_, _>>(),
        })
        .collect()
}

pub fn tool_transparency() -> Vec<ToolTransparency> {
    TRANSPARENCY
        .iter()
        .map(|(tool, transparent, non_transparent)| ToolTransparency {
            tool: tool.to_string(),
            accessible: ACCESSIBLE_SITES,
            transparent: *transparent,
            non_transparent: *non_transparent,
        })
        .collect()
}
