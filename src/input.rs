use std::io::Read;
use std::path::Path;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Csv,
    Text,
}

impl InputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Csv),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Infer the format from a file extension. Stdin (`-`) and unknown
    /// extensions fall back to plain text.
    pub fn detect(path: &str) -> Self {
        match Path::new(path).extension().and_then(|e| e.to_str()) {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Text,
        }
    }
}

/// Read the raw input: a file path, or stdin when the path is `-`.
pub fn read_source(path: &str) -> Result<String> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

/// Parse comments out of the raw input. Errors when the input yields zero
/// usable comments, so nothing downstream runs on an empty list.
pub fn load_comments(content: &str, format: InputFormat) -> Result<Vec<String>> {
    let comments = match format {
        InputFormat::Json => parse_json(content)?,
        InputFormat::Csv => parse_csv(content)?,
        InputFormat::Text => parse_text(content),
    };

    if comments.is_empty() {
        return Err(Error::Input("input contains no usable comments".to_string()));
    }
    Ok(comments)
}

/// A flat JSON array of strings, order-preserving. Entries that are blank
/// after trimming are dropped.
fn parse_json(content: &str) -> Result<Vec<String>> {
    let comments: Vec<String> = serde_json::from_str(content)
        .map_err(|e| Error::Input(format!("expected a JSON array of strings: {e}")))?;
    Ok(comments
        .into_iter()
        .filter(|c| !c.trim().is_empty())
        .collect())
}

/// CSV with a column literally named `comment`. Other columns are ignored;
/// rows whose comment is empty or missing are dropped.
fn parse_csv(content: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_reader(content.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| Error::Input(format!("failed to read CSV header: {e}")))?;
    let column = headers
        .iter()
        .position(|h| h == "comment")
        .ok_or_else(|| Error::Input("CSV must contain a 'comment' column".to_string()))?;

    let mut comments = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::Input(format!("failed to read CSV row: {e}")))?;
        if let Some(field) = record.get(column)
            && !field.trim().is_empty()
        {
            comments.push(field.to_string());
        }
    }
    Ok(comments)
}

/// Newline-delimited text: each non-blank trimmed line is one comment.
fn parse_text(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
