mod check;
mod cli;
mod init;

use clap::Parser as ClapParser;
use yardcheck_config::CheckerConfig;

use cli::{Cli, SubCommand};

fn parse_cli_to_config(cli: &Cli) -> CheckerConfig {
  let mut config = CheckerConfig::new_basic(
    cli.debug,
    cli.debug_trace.iter().copied().map(Into::into).collect(),
    cli.quiet,
    cli.verbose,
  );

  config.dump = cli.dump.iter().copied().map(Into::into).collect();
  config
}

fn main() {
  let cli = Cli::parse();
  let config = parse_cli_to_config(&cli);

  let outcome = match &cli.subcommand {
    SubCommand::Check(cmd) => check::run_check(cmd, config),
    SubCommand::Init(cmd) => init::run_init(cmd, &config),
  };

  if outcome.is_err() {
    std::process::exit(1);
  }
}
