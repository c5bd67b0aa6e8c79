use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::aestrak::tools::error::{Result, ToolError};

/// File name pattern of the purchase-order export.
pub const PURCHASE_ORDER_PATTERN: &str = "DOWREAD-ICS.orders.*.xlsx";
/// File name pattern of the quantity-survey export.
pub const QUANTITY_SURVEY_PATTERN: &str = "DOWREAD-ICS.QS.*.xlsx";

/// Finds the file in `directory` whose name matches `pattern`, where `*`
/// matches any run of characters. With several matches the lexicographically
/// first name wins.
pub fn find_input(directory: &Path, pattern: &str) -> Result<PathBuf> {
    let mut matches: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        if name.to_str().is_some_and(|name| wildcard_match(pattern, name)) {
            matches.push(entry.path());
        }
    }
    matches.sort();

    let mut matches = matches.into_iter();
    let chosen = matches.next().ok_or_else(|| ToolError::MissingInput {
        directory: directory.to_path_buf(),
        pattern: pattern.to_string(),
    })?;
    let ignored = matches.count();
    if ignored > 0 {
        warn!(pattern, chosen = %chosen.display(), ignored, "several inputs match; using the first");
    }
    debug!(pattern, path = %chosen.display(), "located input");
    Ok(chosen)
}

fn wildcard_match(pattern: &str, name: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(prefix) = parts.next() else {
        return name.is_empty();
    };
    let Some(mut rest) = name.strip_prefix(prefix) else {
        return false;
    };

    let segments: Vec<&str> = parts.collect();
    let Some((suffix, middle)) = segments.split_last() else {
        return rest.is_empty();
    };
    for segment in middle {
        match rest.find(segment) {
            Some(index) => rest = &rest[index + segment.len()..],
            None => return false,
        }
    }
    rest.len() >= suffix.len() && rest.ends_with(suffix)
}
