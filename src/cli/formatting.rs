//! Text rendering shared by the CLI commands.

use std::fmt::Write as _;

use crate::classifier::CategoryMatches;
use crate::comparison::{ComparisonResult, EntityComparison};
use crate::data::ReportSummary;
use crate::taxonomy::DataCategory;

/// Width of the category label column.
const LABEL_WIDTH: usize = 18;

/// Returns an icon for a verdict.
pub(crate) fn verdict_icon(verdict: ComparisonResult) -> &'static str {
    match verdict {
        ComparisonResult::Both => "\u{2705}",
        ComparisonResult::PolicyOnly | ComparisonResult::DisclosureOnly => "\u{26a0}\u{fe0f} ",
        ComparisonResult::Neither => "\u{2796}",
    }
}

/// Formats classifier matches grouped by category.
pub(crate) fn format_matches_text(matches: &CategoryMatches) -> String {
    if matches.is_empty() {
        return "No data categories detected.\n".to_string();
    }

    let mut out = String::new();
    for (category, found) in matches {
        let _ = writeln!(
            out,
            "{} ({}): {} match{}",
            category.display_name(),
            category,
            found.len(),
            if found.len() == 1 { "" } else { "es" }
        );
        for m in found {
            let _ = writeln!(
                out,
                "   {:.1} {:<22} {:?}",
                m.confidence,
                format!("[{}]", m.tier),
                m.matched_text
            );
        }
    }
    out
}

/// Formats a category set one per line.
pub(crate) fn format_categories_text<'a>(
    categories: impl IntoIterator<Item = &'a DataCategory>,
) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "{category}");
    }
    if out.is_empty() {
        out.push_str("No data categories detected.\n");
    }
    out
}

/// Formats one comparison record as a verdict table.
pub(crate) fn format_comparison_text(record: &EntityComparison) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", record.subject_name, record.subject_id);
    for (category, verdict) in record.comparisons.iter() {
        let _ = writeln!(
            out,
            "   {} {:<width$} {}",
            verdict_icon(verdict),
            category.display_name(),
            verdict,
            width = LABEL_WIDTH
        );
    }
    if let Some(notes) = &record.notes {
        let _ = writeln!(out, "   Note: {notes}");
    }
    out
}

/// Formats the report summary.
pub(crate) fn format_summary_text(summary: &ReportSummary) -> String {
    let mut out = format!(
        "\u{1f4ca} Summary: {} subjects, {} with discrepancies \
         (policy analyzed: {}, disclosure analyzed: {})\n",
        summary.total_subjects,
        summary.subjects_with_discrepancies,
        summary.policy_analyzed,
        summary.disclosure_analyzed
    );
    let _ = writeln!(
        out,
        "   {:<width$} {:>7} {:>7} {:>11} {:>15}",
        "Category",
        "both",
        "neither",
        "policy_only",
        "disclosure_only",
        width = LABEL_WIDTH
    );
    for (category, counts) in &summary.categories {
        let _ = writeln!(
            out,
            "   {:<width$} {:>7} {:>7} {:>11} {:>15}",
            category.display_name(),
            counts.both,
            counts.neither,
            counts.policy_only,
            counts.disclosure_only,
            width = LABEL_WIDTH
        );
    }
    out
}
