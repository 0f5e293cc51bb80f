use tracing::debug;

use crate::analysis::{
    percentages, saturating_sum, total, ToolCompatibility, ToolTransparency, TransparencyBreakdown,
};
use crate::archive::Archive;

#[derive(Debug, Clone)]
pub struct PercentageVerificationConfig {
    /// Allowed distance of the percentage sum from 100
    pub tolerance: f64,
}

impl Default for PercentageVerificationConfig {
    fn default() -> Self {
        Self { tolerance: 0.5 }
    }
}

#[derive(Debug, Clone)]
pub struct PercentageReport {
    pub total: u64,
    pub percentage_sum: f64,
}

#[derive(Debug, Clone)]
pub struct ToolCheck {
    pub tool: String,
    /// None when the report carries no transparency counts
    pub transparency: Option<TransparencyBreakdown>,
    pub compatibility_checked: bool,
    pub compatibility_issues: u64,
    pub transparency_issues: u64,
}

#[derive(Debug, Clone)]
pub struct ArchiveReport {
    pub archive: String,
    pub versions: usize,
    pub percentages: PercentageReport,
    pub tools: Vec<ToolCheck>,
}

/// Shares of `counts` must add up to 100 within the tolerance
pub fn verify_percentages(
    counts: &[(String, u64)],
    config: &PercentageVerificationConfig,
) -> Result<PercentageReport, String> {
    let values: Vec<u64> = counts.iter().map(|(_, c)| *c).collect();
    let sum_counts = total(&values);
    if sum_counts == 0 {
        return Err("Version counts are empty or all zero".to_string());
    }

    let percentage_sum: f64 = percentages(&values).iter().sum();
    if (percentage_sum - 100.0).abs() > config.tolerance {
        return Err(format!(
            "Version percentages sum to {:.2}, expected 100 ± {}",
            percentage_sum, config.tolerance
        ));
    }

    Ok(PercentageReport {
        total: sum_counts,
        percentage_sum,
    })
}

/// Transparent, non-transparent and N/A sites must partition the accessible sites
pub fn verify_transparency(tool: &ToolTransparency) -> Result<TransparencyBreakdown, String> {
    let breakdown = tool.breakdown()?;
    if breakdown.accessible() != tool.accessible {
        return Err(format!(
            "tool `{}`: transparency slices sum to {}, expected {}",
            tool.tool,
            breakdown.accessible(),
            tool.accessible
        ));
    }
    Ok(breakdown)
}

/// Compatibility counts cannot exceed the sites they were measured on
pub fn verify_compatibility(tool: &ToolCompatibility) -> Result<(), String> {
    let counts = [
        ("syntacticallyCompatible", tool.syntactically_compatible),
        ("compatible", tool.compatible),
        (
            "eventuallyCompatible + unknown",
            tool.with_unknown(tool.eventually_compatible),
        ),
    ];
    for (field, count) in counts {
        if count > tool.accessible {
            return Err(format!(
                "tool `{}`: {} ({}) exceeds accessible ({})",
                tool.tool, field, count, tool.accessible
            ));
        }
    }
    Ok(())
}

/// Load every section of an archive and check its invariants.
///
/// Stops at the first violation.
pub fn verify_archive(
    archive: &Archive,
    config: &PercentageVerificationConfig,
) -> Result<ArchiveReport, String> {
    let syntax = archive.syntax_report().map_err(|e| e.to_string())?;
    let counts = syntax.version_counts();
    let percentages = verify_percentages(counts, config)?;

    let mut tools = Vec::new();
    for report in archive.tool_reports().map_err(|e| e.to_string())? {
        let transparency = match ToolTransparency::from_report(&report) {
            Ok(tool) => Some(verify_transparency(&tool)?),
            Err(reason) => {
                debug!(tool = %report.tool_name, %reason, "skipping transparency check");
                None
            }
        };

        let compatibility_checked = match ToolCompatibility::from_report(&report) {
            Ok(tool) => {
                verify_compatibility(&tool)?;
                true
            }
            Err(reason) => {
                debug!(tool = %report.tool_name, %reason, "skipping compatibility check");
                false
            }
        };

        tools.push(ToolCheck {
            tool: report.tool_name.clone(),
            transparency,
            compatibility_checked,
            compatibility_issues: saturating_sum(report.compatibility_issues.values().copied()),
            transparency_issues: saturating_sum(report.transparency_issues.values().copied()),
        });
    }

    Ok(ArchiveReport {
        archive: archive.name(),
        versions: counts.len(),
        percentages,
        tools,
    })
}
