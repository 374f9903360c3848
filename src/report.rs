use std::io::Write;

use crate::analysis::SentimentRecord;
use crate::error::Result;

const BAR_WIDTH: usize = 40;

/// Write results as UTF-8 CSV with a `comment,sentiment` header row.
/// Quoting is the csv crate's default (only where needed).
pub fn write_csv<W: Write>(records: &[SentimentRecord], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(["comment", "sentiment"])?;
    for record in records {
        csv_writer.write_record([record.comment.as_str(), record.label.as_str()])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Two-column text table of comments and their assessed sentiment.
pub fn render_table(records: &[SentimentRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.comment.chars().count())
        .chain(["comment".len()])
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{:<width$}  {}\n", "comment", "sentiment"));
    out.push_str(&format!("{}  {}\n", "-".repeat(width), "-".repeat(9)));
    for record in records {
        out.push_str(&format!("{:<width$}  {}\n", record.comment, record.label));
    }
    out
}

/// Horizontal text bar chart of the label distribution, scaled to the
/// largest count.
pub fn render_distribution(dist: &[(String, usize)]) -> String {
    let max_count = dist.iter().map(|(_, count)| *count).max().unwrap_or(0);
    let label_width = dist
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, count) in dist {
        let bar_len = if max_count == 0 {
            0
        } else {
            (count * BAR_WIDTH / max_count).max(1)
        };
        out.push_str(&format!(
            "{label:<label_width$}  {} {count}\n",
            "#".repeat(bar_len)
        ));
    }
    out
}

/// Numbered theme list.
pub fn render_themes(themes: &[String]) -> String {
    let mut out = String::new();
    for (index, theme) in themes.iter().enumerate() {
        out.push_str(&format!("{}. {theme}\n", index + 1));
    }
    out
}
