//! Builder status rendering.
//!
//! A builder's readiness is tri-state: the Ready condition is true, false,
//! or absent, and each state renders a fixed text layout.

use crate::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

pub const CONDITION_READY: &str = "Ready";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomBuilder {
    pub metadata: k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta,
    pub spec: CustomBuilderSpec,
    pub status: CustomBuilderStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomBuilderSpec {
    pub tag: String,
    pub stack: String,
    pub store: String,
    pub order: Vec<OrderEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderEntry {
    pub group: Vec<BuildpackRef>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackRef {
    pub id: String,
    pub optional: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CustomBuilderStatus {
    pub conditions: Vec<Condition>,
    pub latest_image: String,
    pub stack: BuilderStack,
    pub builder_metadata: Vec<BuildpackMetadata>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    #[serde(rename = "type")]
    pub type_: String,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderStack {
    pub id: String,
    pub run_image: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildpackMetadata {
    pub id: String,
    pub version: String,
}

impl CustomBuilder {
    /// The Ready condition, if present. Readiness is tri-state: the
    /// condition's status is `True`, something else, or the condition is
    /// absent entirely.
    pub fn ready_condition(&self) -> Option<&Condition> {
        self.status
            .conditions
            .iter()
            .find(|c| c.type_ == CONDITION_READY)
    }
}

/// Render the status of a builder into one of three fixed layouts.
pub fn display_builder_status(bldr: &CustomBuilder, writer: &mut impl Write) -> Result<()> {
    match bldr.ready_condition() {
        Some(cond) if cond.status == "True" => print_ready_status(bldr, writer),
        Some(cond) => print_not_ready_status(cond, writer),
        None => print_condition_unknown_status(writer),
    }
}

fn print_condition_unknown_status(writer: &mut impl Write) -> Result<()> {
    StatusWriter::new(writer).add_block("", &[("Status", "Unknown")])
}

fn print_not_ready_status(cond: &Condition, writer: &mut impl Write) -> Result<()> {
    StatusWriter::new(writer).add_block(
        "",
        &[("Status", "Not Ready"), ("Reason", &cond.message)],
    )
}

fn print_ready_status(bldr: &CustomBuilder, writer: &mut impl Write) -> Result<()> {
    StatusWriter::new(writer).add_block(
        "",
        &[
            ("Status", "Ready"),
            ("Image", &bldr.status.latest_image),
            ("Stack", &bldr.status.stack.id),
            ("Run Image", &bldr.status.stack.run_image),
        ],
    )?;

    writer.write_all(b"\n")?;

    let mut bp_table = TableWriter::new(&["buildpack id", "version"]);
    for bp in &bldr.status.builder_metadata {
        bp_table.add_row(&[&bp.id, &bp.version])?;
    }
    bp_table.write(writer)?;

    writer.write_all(b"\n")?;

    let mut order_table = TableWriter::new(&["Detection Order", ""]);
    for (i, entry) in bldr.spec.order.iter().enumerate() {
        order_table.add_row(&[&format!("Group #{}", i + 1), ""])?;
        for buildpack_ref in &entry.group {
            let marker = if buildpack_ref.optional { "(Optional)" } else { "" };
            order_table.add_row(&[&format!("  {}", buildpack_ref.id), marker])?;
        }
    }
    order_table.write(writer)
}

/// Writes aligned key/value status blocks.
pub struct StatusWriter<'a, W: Write> {
    writer: &'a mut W,
}

impl<'a, W: Write> StatusWriter<'a, W> {
    pub fn new(writer: &'a mut W) -> Self {
        Self { writer }
    }

    /// Write a block of key/value pairs, keys padded so values align.
    pub fn add_block(&mut self, header: &str, pairs: &[(&str, &str)]) -> Result<()> {
        if !header.is_empty() {
            writeln!(self.writer, "{}:", header)?;
        }

        let width = pairs.iter().map(|(k, _)| k.len() + 1).max().unwrap_or(0) + 4;
        for (key, value) in pairs {
            let line = format!("{:<width$}{}", format!("{}:", key), value);
            writeln!(self.writer, "{}", line.trim_end())?;
        }

        Ok(())
    }
}

/// Writes space-padded tables with uppercased headers.
pub struct TableWriter {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl TableWriter {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_uppercase()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: &[&str]) -> Result<()> {
        if cells.len() != self.headers.len() {
            return Err(crate::Error::InvalidRequest(format!(
                "Expected {} columns, got {}",
                self.headers.len(),
                cells.len()
            )));
        }
        self.rows.push(cells.iter().map(|c| c.to_string()).collect());
        Ok(())
    }

    pub fn write(&self, writer: &mut impl Write) -> Result<()> {
        let mut widths: Vec<usize> = self.headers.iter().map(String::len).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.len());
            }
        }

        self.write_row(writer, &self.headers, &widths)?;
        for row in &self.rows {
            self.write_row(writer, row, &widths)?;
        }

        Ok(())
    }

    fn write_row(&self, writer: &mut impl Write, cells: &[String], widths: &[usize]) -> Result<()> {
        let mut line = String::new();
        for (i, cell) in cells.iter().enumerate() {
            if i + 1 == cells.len() {
                line.push_str(cell);
            } else {
                line.push_str(&format!("{:<width$}", cell, width = widths[i] + 4));
            }
        }
        writeln!(writer, "{}", line.trim_end())?;
        Ok(())
    }
}
