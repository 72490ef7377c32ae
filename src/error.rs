use std::{fmt::Display, path::PathBuf};

use polars::error::PolarsError;
use thiserror::Error;
use vello::wgpu;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{} not found. Make sure to run the grid generator first.", path.display())]
  FileNotFound { path: PathBuf },

  #[error(
    "Cannot visualize more than 3 dimensions (found {count}). Please reduce dimensions or project \
     the data."
  )]
  TooManyDimensions { count: usize },

  #[error("No dimension columns found. Expected columns named dim0, dim1, ...")]
  NoDimensions,

  #[error("missing value in column `{column}` at row {row}")]
  MissingValue { column: String, row: usize },

  #[error("grid table has no rows")]
  EmptyTable,

  #[error("no graphics adapter: {0}")]
  Adapter(#[from] wgpu::RequestAdapterError),

  #[error("failed to create device: {0}")]
  Device(#[from] wgpu::RequestDeviceError),

  #[error("failed to create surface: {0}")]
  Surface(#[from] wgpu::CreateSurfaceError),

  #[error("failed to create window: {0}")]
  Window(#[from] winit::error::OsError),

  #[error("failed to wait for the GPU: {0}")]
  Poll(#[from] wgpu::PollError),

  #[error("failed to read back the rendered image: {0}")]
  BufferMap(#[from] wgpu::BufferAsyncError),

  #[error(transparent)]
  Vello(#[from] vello::Error),

  #[error("render failed: {0}")]
  Render(String),

  #[error(transparent)]
  Polars(#[from] PolarsError),

  #[error(transparent)]
  Image(#[from] image::ImageError),

  #[error(transparent)]
  Io(#[from] std::io::Error),

  #[error(transparent)]
  EventLoop(#[from] winit::error::EventLoopError),
}

pub(crate) trait ResultExt<T> {
  /// Logs the error, and discards it.
  fn log_err(self) -> Option<T>;
}

impl<T, E: Display> ResultExt<T> for std::result::Result<T, E> {
  fn log_err(self) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{e}");
        None
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn file_not_found_names_the_path() {
    let err = Error::FileNotFound { path: PathBuf::from("grid_output_2d.csv") };
    let message = err.to_string();
    assert!(message.starts_with("grid_output_2d.csv not found"));
    assert!(message.contains("run the grid generator first"));
  }

  #[test]
  fn gpu_errors_keep_their_source() {
    let err = Error::from(wgpu::BufferAsyncError);
    assert!(matches!(err, Error::BufferMap(_)));
    assert!(std::error::Error::source(&err).is_some());
    assert!(err.to_string().starts_with("failed to read back the rendered image"));
  }

  #[test]
  fn log_err_discards_errors() {
    let ok: std::result::Result<u32, String> = Ok(3);
    let err: std::result::Result<u32, String> = Err("dropped frame".into());
    assert_eq!(ok.log_err(), Some(3));
    assert_eq!(err.log_err(), None);
  }
}
