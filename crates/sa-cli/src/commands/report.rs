//! Report command for shift statistics.
//!
//! Reads the calendar, extracts keyword-matched shifts, and prints the rollup
//! either as plain text lines or as JSON (`--json`).

use std::fmt::Write as _;
use std::io::Write;
use std::path::Path;

use anyhow::Result;
use sa_core::{Analysis, CrunchRatio, Keywords, extract_shifts};
use serde::Serialize;

/// Computed report data.
#[derive(Debug)]
pub struct ReportData {
    pub calendar: String,
    pub keywords: Keywords,
    pub analysis: Analysis,
}

// ========== Report Generation ==========

/// Reads `path` and computes the report data.
pub fn generate_report_data(path: &Path, keywords: &Keywords) -> Result<ReportData> {
    let calendar = path.display().to_string();
    let events = sa_ics::read_events(path)?;
    let shifts = extract_shifts(&events, &calendar, keywords)?;
    let analysis = Analysis::from_shifts(shifts)?;

    Ok(ReportData {
        calendar,
        keywords: keywords.clone(),
        analysis,
    })
}

// ========== Formatting ==========

/// Formats hours with two decimals and an `h` suffix.
pub fn format_hours(hours: f64) -> String {
    format!("{hours:.2}h")
}

/// Formats the crunch ratio as `X / Y (Z%)`.
pub fn format_crunch(ratio: CrunchRatio) -> String {
    let CrunchRatio { count, total } = ratio;
    match ratio.percentage() {
        Some(pct) => format!("{count} / {total} ({pct:.2}%)"),
        None => format!("{count} / {total} (n/a)"),
    }
}

/// Formats the human-readable report output.
pub fn format_report(data: &ReportData) -> String {
    let analysis = &data.analysis;
    let mut output = String::new();

    writeln!(output, "total shifts: {}", analysis.shift_count).unwrap();
    writeln!(
        output,
        "mean shift duration: {}",
        format_hours(analysis.mean_shift_hours)
    )
    .unwrap();
    writeln!(
        output,
        "mean work day duration: {}",
        format_hours(analysis.mean_day_hours)
    )
    .unwrap();
    writeln!(
        output,
        "mean work week duration: {}",
        format_hours(analysis.mean_week_hours)
    )
    .unwrap();
    writeln!(output, "crunch days: {}", format_crunch(analysis.crunch_days)).unwrap();
    writeln!(output, "total weeks: {}", analysis.week_count).unwrap();

    output
}

// ========== JSON Output ==========

/// JSON report structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub calendar: &'a str,
    pub keywords: &'a Keywords,
    pub totals: JsonTotals,
    pub mean_hours: JsonMeans,
    pub crunch_days: JsonCrunch,
}

#[derive(Debug, Serialize)]
pub struct JsonTotals {
    pub shifts: usize,
    pub days: usize,
    pub weeks: usize,
}

#[derive(Debug, Serialize)]
pub struct JsonMeans {
    pub shift: f64,
    pub day: f64,
    pub week: f64,
}

#[derive(Debug, Serialize)]
pub struct JsonCrunch {
    pub count: usize,
    pub total: usize,
    pub percentage: Option<f64>,
}

/// Formats report data as JSON.
pub fn format_report_json(data: &ReportData) -> Result<String> {
    let analysis = &data.analysis;
    let report = JsonReport {
        calendar: &data.calendar,
        keywords: &data.keywords,
        totals: JsonTotals {
            shifts: analysis.shift_count,
            days: analysis.day_count,
            weeks: analysis.week_count,
        },
        mean_hours: JsonMeans {
            shift: analysis.mean_shift_hours,
            day: analysis.mean_day_hours,
            week: analysis.mean_week_hours,
        },
        crunch_days: JsonCrunch {
            count: analysis.crunch_days.count,
            total: analysis.crunch_days.total,
            percentage: analysis.crunch_days.percentage(),
        },
    };

    Ok(serde_json::to_string_pretty(&report)?)
}

// ========== Public Interface ==========

/// Runs the report command.
pub fn run<W: Write>(
    writer: &mut W,
    path: &Path,
    keywords: &Keywords,
    json: bool,
) -> Result<()> {
    let data = generate_report_data(path, keywords)?;

    if json {
        let output = format_report_json(&data)?;
        writeln!(writer, "{output}")?;
    } else {
        let output = format_report(&data);
        write!(writer, "{output}")?;
    }

    Ok(())
}
