//! Terminal and JSON output for the availability view.

use std::io::{self, Write};

use serde::Serialize;
use shelters_core::{
    AddressResolution, AvailabilityView, FilterDimension, FilterOptions, GeoPoint, ShelterRow,
    SortDirection,
};

const TITLE: &str = "Shelter Availability";
const NAME_WIDTH: usize = 34;
const SECTOR_WIDTH: usize = 18;
const TYPE_WIDTH: usize = 26;

/// Shorten `text` to at most `width` characters, marking the cut with `...`.
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        let kept: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// Format a distance for display; unknown distances render as a dash.
fn fmt_distance(distance_km: Option<f64>) -> String {
    distance_km.map_or_else(|| "\u{2014}".to_string(), |d| format!("{d:.1} km"))
}

fn fmt_count(available: u32, total: u32) -> String {
    format!("{available}/{total}")
}

/// The snapshot's update date, preferring the parsed day over the raw value.
fn update_label(view: &AvailabilityView) -> Option<String> {
    let snapshot = view.snapshot()?;
    snapshot
        .update_day()
        .map(|day| day.format("%Y-%m-%d").to_string())
        .or_else(|| snapshot.update_date.clone())
}

fn filter_summary(view: &AvailabilityView) -> String {
    let active: Vec<String> = FilterDimension::ALL
        .iter()
        .filter_map(|&dimension| {
            view.filters()
                .selection(dimension)
                .map(|value| format!("{dimension} = {value}"))
        })
        .collect();
    if active.is_empty() {
        "none".to_string()
    } else {
        active.join(", ")
    }
}

fn order_summary(view: &AvailabilityView) -> String {
    let sort = view.sort();
    match view.reference() {
        Some(reference) => {
            let order = match sort.direction {
                SortDirection::Ascending => "nearest first",
                SortDirection::Descending => "farthest first",
            };
            format!("distance from {} ({order})", reference.formatted_address)
        }
        None => {
            let order = match sort.direction {
                SortDirection::Ascending => "ascending",
                SortDirection::Descending => "descending",
            };
            format!("{} {order}", sort.column)
        }
    }
}

/// Non-blocking notice for a failed address lookup, if there is one.
fn resolution_warning(view: &AvailabilityView) -> Option<String> {
    match view.resolution() {
        AddressResolution::Failed { query, message } if query.is_empty() => {
            Some(format!("warning: {message}"))
        }
        AddressResolution::Failed { query, message } => Some(format!(
            "warning: could not locate \"{query}\": {message}"
        )),
        _ => None,
    }
}

/// Write the heading, summary lines, and the shelter table.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub(crate) fn write_table(
    out: &mut impl Write,
    view: &AvailabilityView,
    rows: &[ShelterRow<'_>],
) -> io::Result<()> {
    writeln!(out, "{TITLE}")?;
    if let Some(updated) = update_label(view) {
        writeln!(out, "Updated: {updated}")?;
    }
    writeln!(out, "Filters: {}", filter_summary(view))?;
    writeln!(out, "Order:   {}", order_summary(view))?;
    if let Some(warning) = resolution_warning(view) {
        writeln!(out, "{warning}")?;
    }
    writeln!(out)?;

    if rows.is_empty() {
        if view.records().is_empty() {
            writeln!(out, "no shelters reported availability in this snapshot")?;
        } else {
            writeln!(out, "no shelters match the current filters")?;
        }
        return Ok(());
    }

    let ranked = view.reference().is_some();
    let distance_header = if ranked {
        format!("{:<10}", "DISTANCE")
    } else {
        String::new()
    };
    writeln!(
        out,
        "{:<NAME_WIDTH$}{:<10}{:<10}{:<SECTOR_WIDTH$}{:<TYPE_WIDTH$}{:<TYPE_WIDTH$}{distance_header}ADDRESS",
        "NAME", "BEDS", "ROOMS", "SECTOR", "SERVICE TYPE", "CAPACITY TYPE"
    )?;

    for row in rows {
        let record = row.record;
        let distance = if ranked {
            format!("{:<10}", fmt_distance(row.distance_km))
        } else {
            String::new()
        };
        let address = match &row.map_link {
            Some(link) => format!("{} <{link}>", record.address),
            None => record.address.clone(),
        };
        writeln!(
            out,
            "{:<NAME_WIDTH$}{:<10}{:<10}{:<SECTOR_WIDTH$}{:<TYPE_WIDTH$}{:<TYPE_WIDTH$}{distance}{address}",
            truncate(&record.name, NAME_WIDTH - 2),
            fmt_count(record.available_beds, record.total_beds),
            fmt_count(record.available_rooms, record.total_rooms),
            truncate(&record.sector, SECTOR_WIDTH - 2),
            truncate(&record.service_type, TYPE_WIDTH - 2),
            truncate(&record.capacity_type, TYPE_WIDTH - 2),
        )?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} of {} shelters shown",
        rows.len(),
        view.records().len()
    )?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReferenceOutput<'a> {
    formatted_address: &'a str,
    location: GeoPoint,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    update_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reference: Option<ReferenceOutput<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warning: Option<String>,
    shelters: &'a [ShelterRow<'a>],
}

/// Write the rows, plus update date and reference location, as JSON.
///
/// # Errors
///
/// Returns an error if serialization or the underlying write fails.
pub(crate) fn write_rows_json(
    out: &mut impl Write,
    view: &AvailabilityView,
    rows: &[ShelterRow<'_>],
) -> anyhow::Result<()> {
    let output = ListOutput {
        update_date: update_label(view),
        reference: view.reference().map(|r| ReferenceOutput {
            formatted_address: &r.formatted_address,
            location: r.point,
        }),
        warning: resolution_warning(view),
        shelters: rows,
    };
    serde_json::to_writer_pretty(&mut *out, &output)?;
    writeln!(out)?;
    Ok(())
}

/// Write each filter dimension followed by its distinct values.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub(crate) fn write_options(out: &mut impl Write, options: &FilterOptions) -> io::Result<()> {
    for dimension in FilterDimension::ALL {
        writeln!(out, "{dimension}:")?;
        let values = options.for_dimension(dimension);
        if values.is_empty() {
            writeln!(out, "  (none)")?;
        }
        for value in values {
            writeln!(out, "  {value}")?;
        }
    }
    Ok(())
}
