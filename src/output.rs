//! Rendering of tag listings, route stops and predictions.
//!
//! Supports aligned text tables, pretty JSON and CSV.

use anyhow::Result;
use clap::ValueEnum;
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt;

use crate::predictions::Prediction;
use crate::stops::Stop;
use crate::tags::{RouteInfo, TagTable};

const PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Left-aligned text table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

/// A text table with named columns. Every column is left-aligned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row. Short rows are padded with empty cells and extra cells
    /// are dropped so every row has one cell per column.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.columns.len(), String::new());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                self.rows
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(name.chars().count(), usize::max)
            })
            .collect()
    }

    /// Header line, a dash rule per column, then one line per row.
    pub fn render(&self) -> String {
        let widths = self.widths();
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();

        let mut lines = Vec::with_capacity(self.rows.len() + 2);
        lines.push(render_line(&self.columns, &widths));
        lines.push(render_line(&rule, &widths));
        lines.extend(self.rows.iter().map(|row| render_line(row, &widths)));
        lines.join("\n")
    }

    pub fn to_csv(&self) -> Result<String> {
        let mut writer = WriterBuilder::new().from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes)?)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect();
    padded.join(" ").trim_end().to_string()
}

pub fn route_table(tags: &TagTable) -> Table {
    let mut table = Table::new(["Route Tag", "Route Name", "Agency Name"]);
    for (tag, entry) in &tags.routes {
        table.add_row([tag.as_str(), entry.name.as_str(), entry.agency_name.as_str()]);
    }
    table
}

pub fn agency_table(tags: &TagTable) -> Table {
    let mut table = Table::new(["Agency Name", "Agency Tag"]);
    for (name, tag) in &tags.agencies {
        table.add_row([name, tag]);
    }
    table
}

pub fn stop_table(stops: &[Stop]) -> Table {
    let mut table = Table::new(["Stop Number", "Name"]);
    for stop in stops {
        table.add_row([&stop.id, &stop.name]);
    }
    table
}

pub fn prediction_table(predictions: &[Prediction]) -> Table {
    let mut table = Table::new(["Minutes", "Route", "Agency"]);
    for p in predictions {
        table.add_row([p.minutes.to_string(), p.route_name.clone(), p.agency_name.clone()]);
    }
    table
}

#[derive(Serialize)]
struct RouteStops<'a> {
    route: &'a RouteInfo,
    stops: &'a [Stop],
}

#[derive(Serialize)]
struct StopPredictions<'a> {
    stop_id: &'a str,
    predictions: &'a [Prediction],
}

fn pretty_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(format!("{}\n", serde_json::to_string_pretty(value)?))
}

/// Route and agency listings, both sorted by key.
pub fn render_tag_tables(tags: &TagTable, format: OutputFormat) -> Result<String> {
    let routes = route_table(tags);
    let agencies = agency_table(tags);
    match format {
        OutputFormat::Table => Ok(format!("\n{routes}\n\n{agencies}\n\n")),
        OutputFormat::Json => pretty_json(tags),
        OutputFormat::Csv => Ok(format!("{}\n{}", routes.to_csv()?, agencies.to_csv()?)),
    }
}

pub fn render_route_stops(route: &RouteInfo, stops: &[Stop], format: OutputFormat) -> Result<String> {
    match format {
        // A route without stops prints nothing at all.
        OutputFormat::Table if stops.is_empty() => Ok(String::new()),
        OutputFormat::Table => Ok(format!(
            "\n--> Route: {} <--\n{}\n\n",
            route.name.to_uppercase(),
            stop_table(stops)
        )),
        OutputFormat::Json => pretty_json(&RouteStops { route, stops }),
        OutputFormat::Csv => stop_table(stops).to_csv(),
    }
}

/// Predictions for `stop_id`. An empty table shows one row of dashes instead
/// of nothing.
pub fn render_predictions(
    stop_id: &str,
    predictions: &[Prediction],
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Table => {
            let mut table = prediction_table(predictions);
            if table.is_empty() {
                table.add_row([PLACEHOLDER; 3]);
            }
            Ok(format!("\n--> Stop: {stop_id} <--\n{table}\n\n"))
        }
        OutputFormat::Json => pretty_json(&StopPredictions {
            stop_id,
            predictions,
        }),
        OutputFormat::Csv => prediction_table(predictions).to_csv(),
    }
}
