//! Plain-text report rendering and output.
//!
//! Each result becomes one block:
//!
//! ```text
//! --- Result 1 ---
//! Title: <title>
//! URL: <url>
//!
//! Content:
//! <content>
//!
//! ================================================================================
//!
//! ```

use std::io::Write as _;
use std::path::{Path, PathBuf};

use gleaner_search::ExtractedContent;

use crate::error::Result;

/// Width of the `=` rule closing each result block.
const RULE_WIDTH: usize = 80;

/// Render results in the report layout, numbered from 1.
pub fn render_report(results: &[ExtractedContent]) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    for (idx, result) in results.iter().enumerate() {
        out.push_str(&format!(
            "--- Result {n} ---\nTitle: {title}\nURL: {url}\n\nContent:\n{content}\n\n{rule}\n\n",
            n = idx + 1,
            title = result.title,
            url = result.url,
            content = result.content,
        ));
    }
    out
}

/// File name for a query's report: `<sanitised query>.txt`.
///
/// Alphanumerics, `-` and `_` are kept; everything else becomes `_`, so the
/// name can never escape the output directory.
pub fn report_file_name(query: &str) -> String {
    let stem: String = query
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "query.txt".to_owned()
    } else {
        format!("{stem}.txt")
    }
}

/// Render `results` and write them to `dir/<report_file_name(query)>`.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn write_report(dir: &Path, query: &str, results: &[ExtractedContent]) -> Result<PathBuf> {
    persist_report(dir, query, &render_report(results))
}

/// Write an already rendered report body for `query` into `dir`.
///
/// The body goes to a temporary file in `dir` that is then renamed over the
/// final name, so concurrent writers for the same query never interleave.
///
/// # Errors
///
/// Returns an I/O error if the directory or file cannot be written.
pub fn persist_report(dir: &Path, query: &str, body: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(report_file_name(query));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(body.as_bytes())?;
    tmp.flush()?;
    tmp.persist(&path).map_err(|e| e.error)?;

    tracing::debug!(path = %path.display(), bytes = body.len(), "report written");
    Ok(path)
}
