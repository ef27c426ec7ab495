use std::path::Path;

use colored::*;
use yardcheck_checker::{check, dump, CheckResult, Hierarchy, Unit};
use yardcheck_config::{CheckerConfig, DebugTrace, DumpKind, ProjectConfig, PROJECT_FILE};
use yardcheck_log::{log_dbg, phase_log, phase_ok, phase_warn, trace_dbg};
use yardcheck_model::Snapshot;

use crate::cli::CheckCommand;

/// Reads `yardcheck.toml` from `dir`, if there is one.
pub fn load_project_config(dir: &Path) -> Result<Option<ProjectConfig>, ()> {
  let path = dir.join(PROJECT_FILE);
  if !path.exists() {
    return Ok(None);
  }

  let content = std::fs::read_to_string(&path).map_err(|error| {
    eprintln!("{} Failed to read '{}': {}", "Error:".red().bold(), path.display(), error);
  })?;

  ProjectConfig::from_toml(&content).map(Some).map_err(|error| {
    eprintln!("{} Invalid '{}': {}", "Error:".red().bold(), path.display(), error);
  })
}

/// Project file first, command line on top.
pub fn configure(
  config: &mut CheckerConfig,
  project: Option<ProjectConfig>,
  cmd: &CheckCommand,
) {
  if let Some(project) = project {
    config.apply_project(project);
  }

  if let Some(profile) = cmd.profile {
    config.profile = profile.into();
  }

  if let Some(arity) = cmd.arity {
    config.arity = arity.into();
  }

  for name in &cmd.builtins {
    if !config.builtins.contains(name) {
      config.builtins.push(name.clone());
    }
  }
}

pub fn load_snapshot(path: &str) -> Result<Snapshot, ()> {
  let text = std::fs::read_to_string(path).map_err(|error| {
    eprintln!("{} Failed to read snapshot '{}': {}", "Error:".red().bold(), path, error);
  })?;

  Snapshot::from_json(&text).map_err(|error| {
    eprintln!("{} Malformed snapshot '{}': {}", "Error:".red().bold(), path, error);
  })
}

/// Checks one snapshot and prints what it finds.
///
/// Returns the result so the caller can pick the exit status; a broken
/// snapshot yields `Err` after the error has been printed.
pub fn check_snapshot(
  snapshot: &Snapshot,
  config: &CheckerConfig,
) -> Result<CheckResult, ()> {
  let unit = Unit::from_snapshot(snapshot);

  let result = check(&unit, config).map_err(|error| {
    eprintln!("{} Inconsistent snapshot: {}", "Error:".red().bold(), error);
  })?;

  if config.dump.contains(&DumpKind::Lineage) || config.dump.contains(&DumpKind::Signatures) {
    let hierarchy = Hierarchy::build(unit.index, config);

    if config.dump.contains(&DumpKind::Lineage) {
      println!("\n{}", dump::dump_lineage(&hierarchy));
    }

    if config.dump.contains(&DumpKind::Signatures) {
      println!("\n{}", dump::dump_signatures(&unit, &hierarchy));
    }
  }

  yardcheck_diagnostics::render_batch(&result.problems, snapshot.source_map());

  if config.dump.contains(&DumpKind::Problems) {
    println!("\n{}", dump::dump_problems(&result.problems, snapshot.source_map()));
  }

  Ok(result)
}

pub fn run_check(
  cmd: &CheckCommand,
  mut config: CheckerConfig,
) -> Result<(), ()> {
  let cwd = std::env::current_dir().map_err(|error| {
    eprintln!("{} Cannot read the working directory: {}", "Error:".red().bold(), error);
  })?;

  let project = load_project_config(&cwd)?;
  if project.is_some() {
    log_dbg!(&config, "using {}", cwd.join(PROJECT_FILE).display());
  }
  configure(&mut config, project, cmd);

  trace_dbg!(
    &config,
    DebugTrace::Cli,
    "profile={} arity={:?} builtins={:?}",
    config.profile.name(),
    config.arity,
    config.builtins
  );

  phase_log!(&config, "Checking... {}", cmd.snapshot);
  let snapshot = load_snapshot(&cmd.snapshot)?;
  let result = check_snapshot(&snapshot, &config)?;

  if result.is_empty() {
    phase_ok!(&config, "No problems in {}", cmd.snapshot);
    return Ok(());
  }

  phase_warn!(&config, "{} problem(s) in {}", result.problems.len(), cmd.snapshot);

  if result.has_errors() {
    Err(())
  } else {
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::cli::{ArityCli, ProfileCli};
  use yardcheck_config::{ArityPolicy, Profile};

  fn command() -> CheckCommand {
    CheckCommand {
      snapshot: "unit.json".to_string(),
      profile: None,
      arity: None,
      builtins: Vec::new(),
    }
  }

  #[test]
  fn missing_project_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(load_project_config(dir.path()), Ok(None));
  }

  #[test]
  fn project_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PROJECT_FILE), "[check]\narity = \"report\"\n").unwrap();

    let project = load_project_config(dir.path()).unwrap().unwrap();
    assert_eq!(project.check.arity, ArityPolicy::Report);
  }

  #[test]
  fn broken_project_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(PROJECT_FILE), "[check]\nprofile = 3\n").unwrap();
    assert!(load_project_config(dir.path()).is_err());
  }

  #[test]
  fn command_line_overrides_the_project_file() {
    let mut project = ProjectConfig::default();
    project.check.profile = Profile::Strict;
    project.check.arity = ArityPolicy::Report;
    project.index.builtins.push("Gem::Doc".to_string());

    let mut cmd = command();
    cmd.arity = Some(ArityCli::Ignore);
    cmd.builtins = vec!["Gem::Doc".to_string(), "Gem::Node".to_string()];

    let mut config = CheckerConfig::quiet();
    configure(&mut config, Some(project), &cmd);

    assert_eq!(config.profile, Profile::Strict);
    assert_eq!(config.arity, ArityPolicy::Ignore);
    assert_eq!(config.builtins, vec!["Gem::Doc".to_string(), "Gem::Node".to_string()]);
  }

  #[test]
  fn profile_flag_applies_without_project() {
    let mut cmd = command();
    cmd.profile = Some(ProfileCli::Typed);

    let mut config = CheckerConfig::quiet();
    configure(&mut config, None, &cmd);

    assert_eq!(config.profile, Profile::Typed);
    assert_eq!(config.arity, ArityPolicy::Ignore);
  }

  #[test]
  fn snapshot_files_are_checked() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unit.json");
    std::fs::write(
      &path,
      r#"{
        "types": [{ "name": "Foo", "kind": "class" }],
        "methods": [{
          "owner": "Foo",
          "name": "bar",
          "return_tag": "Integer",
          "body": [{ "kind": "literal", "type_name": "String" }]
        }]
      }"#,
    )
    .unwrap();

    let snapshot = load_snapshot(path.to_str().unwrap()).unwrap();
    let result = check_snapshot(&snapshot, &CheckerConfig::quiet()).unwrap();

    assert_eq!(result.problems.len(), 1);
    assert!(result.has_errors());
  }

  #[test]
  fn unreadable_snapshot_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.json");
    assert!(load_snapshot(path.to_str().unwrap()).is_err());

    std::fs::write(dir.path().join("bad.json"), "{ not json").unwrap();
    assert!(load_snapshot(dir.path().join("bad.json").to_str().unwrap()).is_err());
  }
}
