use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One plotted value of a figure with its derived share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    /// Category on the x axis, or pie panel title
    pub label: String,
    /// Series, slice or bar group the value belongs to
    pub series: String,
    pub value: f64,
    pub percentage: Option<f64>,
}

/// The aggregates a figure was drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureSummary {
    pub figure: String,
    /// Fixed percentage denominator, if the figure uses one
    pub denominator: Option<u64>,
    pub entries: Vec<SummaryEntry>,
}

impl FigureSummary {
    pub fn new(figure: &str, denominator: Option<u64>) -> Self {
        Self {
            figure: figure.to_string(),
            denominator,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, label: &str, series: &str, value: f64, percentage: Option<f64>) {
        self.entries.push(SummaryEntry {
            label: label.to_string(),
            series: series.to_string(),
            value,
            percentage,
        });
    }

    /// Entries of one series, in insertion order
    pub fn series<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SummaryEntry> + 'a {
        self.entries.iter().filter(move |e| e.series == name)
    }

    /// Save summary to JSON file
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize: {}", e))?;
        fs::write(path.as_ref(), json)
            .map_err(|e| format!("Failed to write file: {}", e))?;
        Ok(())
    }

    /// Load summary from JSON file
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let json = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read file: {}", e))?;
        let summary: FigureSummary = serde_json::from_str(&json)
            .map_err(|e| format!("Failed to deserialize: {}", e))?;
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_summary_save_load() {
        let mut summary = FigureSummary::new("transparency", Some(3410));
        summary.push("JEST", "Transparent", 45.0, Some(1.32));
        summary.push("JEST", "N/A", 3147.0, Some(92.29));

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path();

        summary.save_json(path).unwrap();
        let loaded = FigureSummary::load_json(path).unwrap();

        assert_eq!(loaded, summary);
        assert_eq!(loaded.series("N/A").count(), 1);
    }

    #[test]
    fn test_summary_json_format() {
        let mut summary = FigureSummary::new("ecmascript-versions", None);
        summary.push("ES5", "sites", 538.0, Some(21.7));

        let json = serde_json::to_string_pretty(&summary).unwrap();
        assert!(json.contains("\"figure\": \"ecmascript-versions\""));
        assert!(json.contains("\"denominator\": null"));
        assert!(json.contains("\"label\": \"ES5\""));
    }

    #[test]
    fn test_load_missing_summary_fails() {
        let err = FigureSummary::load_json("/nonexistent/summary.json").unwrap_err();
        assert!(err.starts_with("Failed to read file"));
    }
}
