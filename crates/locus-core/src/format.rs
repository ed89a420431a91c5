//! Rendering result rows as answer text.
//!
//! Each intent has a fixed line template. Only [`Intent::Locate`] inspects the
//! rows themselves: a windowed lookup carries an `event_type` column and is
//! rendered as a history, otherwise the single row is the current location.

use std::str::FromStr;

use crate::{
  Error, Result,
  intent::Intent,
  model::EventType,
  store::{Row, Value},
};

pub const NO_DATA: &str = "No data found.";

pub const FALLBACK: &str = "I don't understand. Try 'where is <name>?' or 'list zones'";

/// Render `rows` for `intent`; an empty result is always [`NO_DATA`].
pub fn render(intent: Intent, rows: &[Row]) -> Result<String> {
  let Some(first) = rows.first() else {
    return Ok(NO_DATA.to_owned());
  };

  let lines: Vec<String> = match intent {
    Intent::ListZones => each(rows, |r| {
      Ok(format!("• {} (Floor {})", cell(r, "zone_name")?, cell(r, "floor")?))
    })?,

    Intent::ListEntities => each(rows, |r| {
      Ok(format!("• {} ({})", cell(r, "entity_name")?, cell(r, "entity_type")?))
    })?,

    Intent::Locate if first.contains("event_type") => each(rows, |r| {
      let action = match event_type(r)? {
        EventType::Enter => "→ entered",
        EventType::Exit => "← exited",
      };
      Ok(format!("{}: {action} {}", cell(r, "timestamp")?, cell(r, "zone_name")?))
    })?,

    Intent::Locate => vec![format!(
      "{} is in {} (last seen: {})",
      cell(first, "entity_name")?,
      cell(first, "zone_name")?,
      cell(first, "timestamp")?,
    )],

    Intent::DwellTime => each(rows, |r| {
      Ok(format!("• {}: {:.1} minutes", cell(r, "entity_name")?, number(r, "minutes")?))
    })?,

    Intent::Occupancy => each(rows, |r| {
      Ok(format!("• {} (first seen: {})", cell(r, "entity_name")?, cell(r, "first_seen")?))
    })?,

    Intent::MovementTrace => each(rows, |r| {
      let arrow = match event_type(r)? {
        EventType::Enter => "→",
        EventType::Exit => "←",
      };
      Ok(format!(
        "{arrow} {}: {} (Floor {})",
        cell(r, "timestamp")?,
        cell(r, "zone_name")?,
        cell(r, "floor")?,
      ))
    })?,

    Intent::FloorJump => each(rows, |r| {
      Ok(format!(
        "• {}: Floor {}→{} in {:.0}s",
        cell(r, "entity_name")?,
        cell(r, "floor1")?,
        cell(r, "floor2")?,
        number(r, "seconds")?,
      ))
    })?,

    Intent::LowSignal => each(rows, |r| {
      Ok(format!(
        "• {} in {}: {} dBm",
        cell(r, "entity_name")?,
        cell(r, "zone_name")?,
        cell(r, "rssi")?,
      ))
    })?,

    Intent::Unrecognized => return Ok(FALLBACK.to_owned()),
  };

  Ok(lines.join("\n"))
}

fn each(rows: &[Row], line: impl Fn(&Row) -> Result<String>) -> Result<Vec<String>> {
  rows.iter().map(line).collect()
}

fn cell<'r>(row: &'r Row, column: &'static str) -> Result<&'r Value> {
  row.get(column).ok_or(Error::MissingColumn(column))
}

fn number(row: &Row, column: &'static str) -> Result<f64> {
  let value = cell(row, column)?;
  value.as_f64().ok_or(Error::ColumnType {
    column,
    expected: "number",
    found: value.type_name(),
  })
}

fn event_type(row: &Row) -> Result<EventType> {
  let value = cell(row, "event_type")?;
  let text = value.as_str().ok_or(Error::ColumnType {
    column:   "event_type",
    expected: "text",
    found:    value.type_name(),
  })?;
  EventType::from_str(text).map_err(|_| Error::UnknownEventType(text.to_owned()))
}
