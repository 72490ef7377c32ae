use crate::{Error, Result};

/// Columns whose name starts with this prefix are positional coordinates.
pub const DIMENSION_PREFIX: &str = "dim";

/// The number of positional axes in a grid, which selects the plot style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimensionality {
  One,
  Two,
  Three,
}

impl Dimensionality {
  pub fn from_count(count: usize) -> Result<Self> {
    match count {
      0 => Err(Error::NoDimensions),
      1 => Ok(Dimensionality::One),
      2 => Ok(Dimensionality::Two),
      3 => Ok(Dimensionality::Three),
      count => Err(Error::TooManyDimensions { count }),
    }
  }
}

/// Returns the dimension columns out of `names`, in their original order.
pub fn dimension_columns<'a, S: AsRef<str> + ?Sized + 'a>(
  names: impl IntoIterator<Item = &'a S>,
) -> Vec<String> {
  names
    .into_iter()
    .map(AsRef::as_ref)
    .filter(|name| name.starts_with(DIMENSION_PREFIX))
    .map(str::to_string)
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keeps_column_order() {
    let columns = dimension_columns(["dim1", "resolution", "dim0", "value", "dim2"]);
    assert_eq!(columns, ["dim1", "dim0", "dim2"]);
  }

  #[test]
  fn ignores_other_columns() {
    assert!(dimension_columns(["resolution", "value", "x_dim"]).is_empty());
  }

  #[test]
  fn counts_select_variant() {
    assert_eq!(Dimensionality::from_count(1).unwrap(), Dimensionality::One);
    assert_eq!(Dimensionality::from_count(2).unwrap(), Dimensionality::Two);
    assert_eq!(Dimensionality::from_count(3).unwrap(), Dimensionality::Three);
  }

  #[test]
  fn rejects_more_than_three() {
    match Dimensionality::from_count(4) {
      Err(Error::TooManyDimensions { count }) => assert_eq!(count, 4),
      other => panic!("expected TooManyDimensions, got {other:?}"),
    }
  }

  #[test]
  fn rejects_zero() {
    assert!(matches!(Dimensionality::from_count(0), Err(Error::NoDimensions)));
  }
}
