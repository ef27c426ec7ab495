use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::BytePosition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(pub u32);

impl std::fmt::Display for FileId {
  fn fmt(
    &self,
    f: &mut std::fmt::Formatter<'_>,
  ) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
  pub path: PathBuf,
  pub text: String,
  line_starts: Vec<u32>,
}

impl SourceFile {
  fn new(
    path: PathBuf,
    text: String,
  ) -> Self {
    let mut line_starts = vec![0];
    for (i, b) in text.bytes().enumerate() {
      if b == b'\n' {
        line_starts.push(i as u32 + 1);
      }
    }

    Self {
      path,
      text,
      line_starts,
    }
  }
}

/// Source texts known to a run. Snapshots that carry no text still get an
/// entry so every `FileId` can be displayed.
#[derive(Debug, Clone, Default)]
pub struct SourceMap {
  files: Vec<SourceFile>,
}

impl SourceMap {
  pub fn new() -> Self {
    Self { files: Vec::new() }
  }

  pub fn add_file(
    &mut self,
    path: impl Into<PathBuf>,
    text: String,
  ) -> FileId {
    let id = FileId(self.files.len() as u32);
    self.files.push(SourceFile::new(path.into(), text));
    id
  }

  pub fn get(
    &self,
    id: &FileId,
  ) -> Option<&SourceFile> {
    self.files.get(id.0 as usize)
  }

  /// 1-based line and column of a byte position.
  pub fn line_col(
    &self,
    id: &FileId,
    pos: BytePosition,
  ) -> (u32, u32) {
    let Some(file) = self.get(id) else {
      return (1, pos.0 + 1);
    };

    let line_idx = match file.line_starts.binary_search(&pos.0) {
      Ok(i) => i,
      Err(i) => i.saturating_sub(1),
    };

    let col = pos.0 - file.line_starts[line_idx];
    (line_idx as u32 + 1, col + 1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn line_col_counts_from_one() {
    let mut sm = SourceMap::new();
    let id = sm.add_file("test.rb", "class Foo\n  def bar; end\nend\n".to_string());

    assert_eq!(sm.line_col(&id, BytePosition(0)), (1, 1));
    assert_eq!(sm.line_col(&id, BytePosition(12)), (2, 3));
    assert_eq!(sm.line_col(&id, BytePosition(10)), (2, 1));
  }

  #[test]
  fn line_col_without_text_falls_back_to_first_line() {
    let sm = SourceMap::new();
    assert_eq!(sm.line_col(&FileId(3), BytePosition(7)), (1, 8));
  }
}
