use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{FigureError, Result};

/// File holding one measurement run inside an archive directory
pub const LOGFILE_NAME: &str = "logfile.json";
pub const SYNTAX_REPORT_KEY: &str = "syntaxReport";
pub const TOOL_REPORT_KEY: &str = "toolReport";

/// A measurement archive: a directory with a parsed `logfile.json`
#[derive(Debug, Clone)]
pub struct Archive {
    root: PathBuf,
    logfile: Value,
}

impl Archive {
    /// Read and parse `<dir>/logfile.json`
    pub fn open<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let root = dir.as_ref().to_path_buf();
        let path = root.join(LOGFILE_NAME);

        let json = fs::read_to_string(&path).map_err(|source| FigureError::Io {
            path: path.clone(),
            source,
        })?;
        let logfile: Value =
            serde_json::from_str(&json).map_err(|source| FigureError::Json { path, source })?;

        debug!(archive = %root.display(), bytes = json.len(), "parsed logfile");
        Ok(Self { root, logfile })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Archive name used for per-archive output folders
    pub fn name(&self) -> String {
        self.root
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("archive")
            .to_string()
    }

    pub fn logfile(&self) -> &Value {
        &self.logfile
    }

    /// Look up a top-level section of the logfile
    pub fn section(&self, key: &'static str) -> Result<&Value> {
        self.logfile
            .get(key)
            .ok_or(FigureError::MissingSection { key })
    }

    pub fn syntax_report(&self) -> Result<SyntaxReport> {
        let section = self.section(SYNTAX_REPORT_KEY)?;
        SyntaxReport::deserialize(section).map_err(|source| FigureError::Section {
            key: SYNTAX_REPORT_KEY,
            source,
        })
    }

    pub fn tool_reports(&self) -> Result<Vec<ToolReport>> {
        let section = self.section(TOOL_REPORT_KEY)?;
        let reports =
            Vec::<ToolReport>::deserialize(section).map_err(|source| FigureError::Section {
                key: TOOL_REPORT_KEY,
                source,
            })?;
        debug!(tools = reports.len(), "parsed tool report");
        Ok(reports)
    }
}

/// List archive directories directly under `dir`, sorted by name
pub fn list_archives<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let entries = fs::read_dir(dir).map_err(|source| FigureError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut archives = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| FigureError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() && path.join(LOGFILE_NAME).is_file() {
            archives.push(path);
        }
    }

    archives.sort();
    Ok(archives)
}

/// ECMAScript-version distribution of the analyzed sites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SyntaxReport {
    /// Plain `[label, count]` pairs
    Pairs(Vec<(String, u64)>),
    /// Named rankings as written by the measure command
    Rankings(SyntaxRankings),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyntaxRankings {
    #[serde(default)]
    pub all: Option<u64>,
    #[serde(default)]
    pub having_script: Option<u64>,
    pub version_ranking: Vec<(String, u64)>,
    #[serde(default)]
    pub feature_ranking: Vec<(String, u64)>,
}

impl SyntaxReport {
    /// Version label and site count, in the order the report lists them
    pub fn version_counts(&self) -> &[(String, u64)] {
        match self {
            SyntaxReport::Pairs(pairs) => pairs,
            SyntaxReport::Rankings(rankings) => &rankings.version_ranking,
        }
    }
}

/// One entry of the `toolReport` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolReport {
    pub tool_name: String,
    pub all: Option<u64>,
    pub accessible: Option<u64>,
    pub syntactically_compatible: Option<u64>,
    pub compatible: Option<u64>,
    pub eventually_compatible: Option<u64>,
    pub unknown_compatibility: Option<u64>,
    /// Older logfiles spell the unknown count this way
    pub unknown_compatible: Option<u64>,
    pub syntactically_compatible_score: Option<f64>,
    pub compatible_score: Option<f64>,
    pub eventually_compatible_score: Option<f64>,
    pub transparency_analyzable: Option<u64>,
    pub transparent: Option<u64>,
    pub non_transparent: Option<u64>,
    #[serde(default)]
    pub transparency_issues: BTreeMap<String, u64>,
    #[serde(default)]
    pub compatibility_issues: BTreeMap<String, u64>,
    /// Fields the figures do not use, kept verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl ToolReport {
    /// Percentage denominator: accessible sites, or every site if not reported
    pub fn denominator(&self) -> Option<u64> {
        self.accessible.or(self.all)
    }

    pub fn unknown(&self) -> Option<u64> {
        self.unknown_compatibility.or(self.unknown_compatible)
    }
}
