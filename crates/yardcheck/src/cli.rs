use clap::{ColorChoice, Parser, Subcommand, ValueEnum};
use yardcheck_config::{ArityPolicy, DebugTrace, DumpKind, Profile};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DumpKindCli {
  /// Dump the resolved ancestor chain of every type
  Lineage,
  /// Dump parameter lists with their effective tags
  Signatures,
  /// Dump the problems as a table
  Problems,
}

impl From<DumpKindCli> for DumpKind {
  fn from(value: DumpKindCli) -> DumpKind {
    match value {
      DumpKindCli::Lineage => DumpKind::Lineage,
      DumpKindCli::Signatures => DumpKind::Signatures,
      DumpKindCli::Problems => DumpKind::Problems,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum DebugTraceCli {
  Types,
  Hierarchy,
  Signature,
  Rules,
  Cli,
}

impl From<DebugTraceCli> for DebugTrace {
  fn from(value: DebugTraceCli) -> DebugTrace {
    match value {
      DebugTraceCli::Types => DebugTrace::Types,
      DebugTraceCli::Hierarchy => DebugTrace::Hierarchy,
      DebugTraceCli::Signature => DebugTrace::Signature,
      DebugTraceCli::Rules => DebugTrace::Rules,
      DebugTraceCli::Cli => DebugTrace::Cli,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ProfileCli {
  /// Check documented tags against inferred types
  Normal,
  Typed,
  Strict,
  Strong,
}

impl From<ProfileCli> for Profile {
  fn from(value: ProfileCli) -> Profile {
    match value {
      ProfileCli::Normal => Profile::Normal,
      ProfileCli::Typed => Profile::Typed,
      ProfileCli::Strict => Profile::Strict,
      ProfileCli::Strong => Profile::Strong,
    }
  }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ArityCli {
  /// Leave surplus call arguments alone
  Ignore,
  /// Warn about arguments no parameter accepts
  Report,
}

impl From<ArityCli> for ArityPolicy {
  fn from(value: ArityCli) -> ArityPolicy {
    match value {
      ArityCli::Ignore => ArityPolicy::Ignore,
      ArityCli::Report => ArityPolicy::Report,
    }
  }
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct CheckCommand {
  /// Snapshot of the indexed source, as JSON
  pub snapshot: String,

  /// Checking profile (overrides yardcheck.toml)
  #[arg(long, value_enum)]
  pub profile: Option<ProfileCli>,

  /// How to treat surplus call arguments (overrides yardcheck.toml)
  #[arg(long, value_enum)]
  pub arity: Option<ArityCli>,

  /// Extra type names to treat as declared (can be repeated)
  #[arg(long = "builtin", action = clap::ArgAction::Append)]
  pub builtins: Vec<String>,
}

#[derive(Parser, Debug, Clone, PartialEq)]
pub struct InitCommand {
  /// Directory to write yardcheck.toml into
  #[arg(default_value = ".")]
  pub dir: String,

  /// Replace an existing yardcheck.toml
  #[arg(long)]
  pub force: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum SubCommand {
  /// Check the annotations of a snapshot
  Check(CheckCommand),
  /// Write a default yardcheck.toml
  Init(InitCommand),
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Checks YARD type annotations against inferred types", long_about = None)]
#[command(propagate_version = true)]
#[command(color = ColorChoice::Always)]
pub struct Cli {
  #[command(subcommand)]
  pub subcommand: SubCommand,

  /// Dump internal checker tables
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub dump: Vec<DumpKindCli>,

  /// Enable internal debug mode
  #[arg(long, default_value = "false", global = true)]
  pub debug: bool,

  /// Enable debug tracing for checker components
  #[arg(long, value_enum, action = clap::ArgAction::Append, global = true)]
  pub debug_trace: Vec<DebugTraceCli>,

  /// Don't print anything but problems
  #[arg(long, short = 'q', default_value = "false", global = true)]
  pub quiet: bool,

  /// Use verbose output
  #[arg(long, short, action = clap::ArgAction::Count, global = true)]
  pub verbose: u8,
}
