use std::path::{Path, PathBuf};

use colored::*;
use yardcheck_config::{CheckerConfig, ProjectConfig, PROJECT_FILE};
use yardcheck_log::phase_ok;

use crate::cli::InitCommand;

pub fn run_init(
  cmd: &InitCommand,
  config: &CheckerConfig,
) -> Result<(), ()> {
  let path = write_project_file(Path::new(&cmd.dir), cmd.force)?;
  phase_ok!(config, "Created {}", path.display());
  Ok(())
}

fn write_project_file(
  dir: &Path,
  force: bool,
) -> Result<PathBuf, ()> {
  if !dir.is_dir() {
    eprintln!("{} Not a directory: '{}'", "Error:".red().bold(), dir.display());
    return Err(());
  }

  let path = dir.join(PROJECT_FILE);
  if path.exists() && !force {
    eprintln!(
      "{} Refusing to overwrite existing file '{}' (use --force)",
      "Error:".red().bold(),
      path.display()
    );
    return Err(());
  }

  let content = ProjectConfig::default().to_toml().map_err(|error| {
    eprintln!("{} Failed to serialize {}: {}", "Error:".red().bold(), PROJECT_FILE, error);
  })?;

  std::fs::write(&path, content).map_err(|error| {
    eprintln!("{} Failed to write '{}': {}", "Error:".red().bold(), path.display(), error);
  })?;

  Ok(path)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_a_loadable_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_project_file(dir.path(), false).unwrap();

    let text = std::fs::read_to_string(path).unwrap();
    assert_eq!(ProjectConfig::from_toml(&text).unwrap(), ProjectConfig::default());
  }

  #[test]
  fn existing_file_needs_force() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PROJECT_FILE), "# mine\n").unwrap();

    assert!(write_project_file(dir.path(), false).is_err());
    assert_eq!(std::fs::read_to_string(dir.path().join(PROJECT_FILE)).unwrap(), "# mine\n");

    assert!(write_project_file(dir.path(), true).is_ok());
    assert_ne!(std::fs::read_to_string(dir.path().join(PROJECT_FILE)).unwrap(), "# mine\n");
  }

  #[test]
  fn missing_directory_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert!(write_project_file(&dir.path().join("nope"), false).is_err());
  }
}
