use serde::{Deserialize, Serialize};

/// Name of the project file looked up in the working directory.
pub const PROJECT_FILE: &str = "yardcheck.toml";

/// Which checks a run applies.
///
/// Only `Normal` has a rule set of its own; the stricter levels are accepted
/// and currently run the same rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
  #[default]
  Normal,
  Typed,
  Strict,
  Strong,
}

impl Profile {
  pub fn rules(self) -> RuleSet {
    match self {
      Profile::Normal | Profile::Typed | Profile::Strict | Profile::Strong => RuleSet::all(),
    }
  }

  pub fn name(self) -> &'static str {
    match self {
      Profile::Normal => "normal",
      Profile::Typed => "typed",
      Profile::Strict => "strict",
      Profile::Strong => "strong",
    }
  }
}

/// Rule families a profile enables.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RuleSet {
  pub returns: bool,
  pub variables: bool,
  pub params: bool,
  pub calls: bool,
}

impl RuleSet {
  pub fn all() -> Self {
    Self {
      returns: true,
      variables: true,
      params: true,
      calls: true,
    }
  }

  pub fn without(
    mut self,
    family: RuleFamily,
  ) -> Self {
    match family {
      RuleFamily::Returns => self.returns = false,
      RuleFamily::Variables => self.variables = false,
      RuleFamily::Params => self.params = false,
      RuleFamily::Calls => self.calls = false,
    }
    self
  }
}

/// One rule family, as named in `[check] skip`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleFamily {
  Returns,
  Variables,
  Params,
  Calls,
}

/// What to do with call arguments no parameter accepts.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityPolicy {
  #[default]
  Ignore,
  Report,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DumpKind {
  Lineage,
  Signatures,
  Problems,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugTrace {
  Types,
  Hierarchy,
  Signature,
  Rules,
  Cli,
}

impl DebugTrace {
  /// Component name printed in `debug[...]` lines.
  pub fn name(self) -> &'static str {
    match self {
      DebugTrace::Types => "types",
      DebugTrace::Hierarchy => "hierarchy",
      DebugTrace::Signature => "signature",
      DebugTrace::Rules => "rules",
      DebugTrace::Cli => "cli",
    }
  }
}

/// Controls the verbosity level of CLI output.
///
/// - `Quiet`: No output except problems
/// - `Detailed`: Structured progress output (default)
/// - `Verbose`: Detailed output with internal phases
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum OutputLevel {
  Quiet,
  #[default]
  Detailed,
  Verbose,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectCheckConfig {
  #[serde(default)]
  pub profile: Profile,
  #[serde(default)]
  pub arity: ArityPolicy,
  /// Rule families to leave out whatever the profile enables.
  #[serde(default)]
  pub skip: Vec<RuleFamily>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectIndexConfig {
  /// Type names treated as always present, e.g. classes from unindexed gems.
  #[serde(default)]
  pub builtins: Vec<String>,
}

/// Contents of `yardcheck.toml`.
///
/// ```toml
/// [check]
/// profile = "normal"
/// arity = "ignore"
/// skip = ["variables"]
///
/// [index]
/// builtins = ["Nokogiri::HTML::Document"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ProjectConfig {
  #[serde(default)]
  pub check: ProjectCheckConfig,
  #[serde(default)]
  pub index: ProjectIndexConfig,
}

impl ProjectConfig {
  pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
    toml::from_str(text)
  }

  pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
    toml::to_string_pretty(self)
  }
}

#[derive(Debug, Clone, Default)]
pub struct CheckerConfig {
  pub project: Option<ProjectConfig>,
  pub profile: Profile,
  pub arity: ArityPolicy,
  pub skip: Vec<RuleFamily>,
  pub builtins: Vec<String>,
  pub debug: bool,
  pub debug_trace: Vec<DebugTrace>,
  pub quiet: bool,
  pub verbose: u8,
  pub output_level: OutputLevel,
  pub dump: Vec<DumpKind>,
}

impl CheckerConfig {
  pub fn new_basic(
    debug: bool,
    debug_trace: Vec<DebugTrace>,
    quiet: bool,
    verbose: u8,
  ) -> Self {
    let output_level = if quiet {
      OutputLevel::Quiet
    } else if verbose > 0 {
      OutputLevel::Verbose
    } else {
      OutputLevel::Detailed
    };

    Self {
      debug,
      debug_trace,
      quiet,
      verbose,
      output_level,
      ..Self::default()
    }
  }

  /// Silent configuration for library callers and tests.
  pub fn quiet() -> Self {
    Self::new_basic(false, Vec::new(), true, 0)
  }

  pub fn with_profile(
    mut self,
    profile: Profile,
  ) -> Self {
    self.profile = profile;
    self
  }

  pub fn with_arity(
    mut self,
    arity: ArityPolicy,
  ) -> Self {
    self.arity = arity;
    self
  }

  /// Adopts the project file's settings. Values given on the command line
  /// are applied afterwards by the caller.
  pub fn apply_project(
    &mut self,
    project: ProjectConfig,
  ) {
    self.profile = project.check.profile;
    self.arity = project.check.arity;
    self.skip = project.check.skip.clone();
    self.builtins = project.index.builtins.clone();
    self.project = Some(project);
  }

  pub fn rules(&self) -> RuleSet {
    self
      .skip
      .iter()
      .fold(self.profile.rules(), |rules, family| rules.without(*family))
  }
}
