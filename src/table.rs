use std::{fs::File, path::Path};

use polars::prelude::*;
use tracing::{debug, info};

use crate::{
  Error, Range, Result,
  dimension::{Dimensionality, dimension_columns},
};

pub const RESOLUTION_COLUMN: &str = "resolution";
pub const VALUE_COLUMN: &str = "value";

/// A grid exported as a table: some dimension columns, then a resolution and
/// a value per cell.
pub struct GridTable {
  frame:      DataFrame,
  dimensions: Vec<String>,
}

/// A single grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
  pub position:   Vec<f64>,
  pub resolution: f64,
  pub value:      f64,
}

impl GridTable {
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      return Err(Error::FileNotFound { path: path.to_path_buf() });
    }

    let file = File::open(path)?;
    let frame = CsvReader::new(file).finish()?;
    debug!(path = %path.display(), rows = frame.height(), "loaded grid table");

    Ok(GridTable::new(frame))
  }

  pub fn new(frame: DataFrame) -> Self {
    let dimensions = dimension_columns(frame.get_column_names());
    GridTable { frame, dimensions }
  }

  pub fn dimension_columns(&self) -> &[String] { &self.dimensions }
  pub fn len(&self) -> usize { self.frame.height() }
  pub fn is_empty(&self) -> bool { self.frame.height() == 0 }

  pub fn dimensionality(&self) -> Result<Dimensionality> {
    info!(
      "Detected {} dimensions from columns: {:?}",
      self.dimensions.len(),
      self.dimensions
    );
    Dimensionality::from_count(self.dimensions.len())
  }

  /// Global range of the value column.
  pub fn value_range(&self) -> Result<Range> {
    if self.is_empty() {
      return Err(Error::EmptyTable);
    }
    Ok(Range::from_column(&self.float_column(VALUE_COLUMN)?)?)
  }

  pub fn rows(&self) -> Result<Vec<GridRow>> {
    let dimensions = self
      .dimensions
      .iter()
      .map(|name| self.float_column(name))
      .collect::<Result<Vec<_>>>()?;
    let resolution = self.float_column(RESOLUTION_COLUMN)?;
    let value = self.float_column(VALUE_COLUMN)?;

    let get = |column: &Column, row: usize| -> Result<f64> {
      column.as_materialized_series().f64()?.get(row).ok_or_else(|| Error::MissingValue {
        column: column.name().to_string(),
        row,
      })
    };

    (0..self.len())
      .map(|row| {
        Ok(GridRow {
          position:   dimensions.iter().map(|c| get(c, row)).collect::<Result<_>>()?,
          resolution: get(&resolution, row)?,
          value:      get(&value, row)?,
        })
      })
      .collect()
  }

  fn float_column(&self, name: &str) -> Result<Column> {
    Ok(self.frame.column(name)?.cast(&DataType::Float64)?)
  }
}
