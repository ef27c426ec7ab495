use serde::{Deserialize, Serialize};

use crate::{BytePosition, file::FileId};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
  pub start: BytePosition,
  pub end: BytePosition,
  #[serde(default)]
  pub file: FileId,
}

impl Span {
  /// Create a new span with validation.
  ///
  /// # Panics
  /// Panics in debug mode if `start > end`.
  pub fn new(
    file: FileId,
    start: BytePosition,
    end: BytePosition,
  ) -> Self {
    debug_assert!(
      start <= end,
      "Span::new() called with invalid range: start {} > end {}",
      start,
      end
    );
    Self { file, start, end }
  }

  /// Returns the length of the span in bytes, 0 for an inverted span.
  pub fn len(&self) -> usize {
    if self.end.0 >= self.start.0 {
      (self.end.0 - self.start.0) as usize
    } else {
      0
    }
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

impl std::fmt::Display for Span {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "(span start: {} end: {} file: {})", self.start, self.end, self.file)
  }
}
