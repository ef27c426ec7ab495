pub mod message;
pub mod problem;

use std::fmt::Write;

use colored::*;
use problem::{Problem, Severity};
use yardcheck_type::file::SourceMap;

pub fn render(
  problem: &Problem,
  sm: &SourceMap,
) {
  print!("{}", render_to_string(problem, sm));
}

pub fn render_batch(
  problems: &[Problem],
  sm: &SourceMap,
) {
  for problem in problems {
    render(problem, sm);
  }
}

pub fn render_to_string(
  problem: &Problem,
  sm: &SourceMap,
) -> String {
  let mut out = String::new();
  write_header(&mut out, problem);
  write_body(&mut out, problem, sm);

  for note in &problem.notes {
    let _ = writeln!(out, "  {} {}", "note:".cyan().bold(), note);
  }

  out.push('\n');
  out
}

fn write_header(
  out: &mut String,
  problem: &Problem,
) {
  let message = problem.message.bold();
  let code = problem.code.bold();

  let _ = match problem.severity {
    Severity::Info => writeln!(out, "{}[{}]: {}", "Info".blue().bold(), code.blue(), message),
    Severity::Warning => writeln!(out, "{}[{}]: {}", "Warning".yellow().bold(), code.yellow(), message),
    Severity::Error => writeln!(out, "{}[{}]: {}", "Error".red().bold(), code.red().bold(), message),
    Severity::Hint => writeln!(out, "{}[{}]: {}", "Hint".cyan().bold(), code.cyan(), message),
  };
}

fn write_body(
  out: &mut String,
  problem: &Problem,
  sm: &SourceMap,
) {
  let span = &problem.location.span;
  let (line, col) = sm.line_col(&span.file, span.start);
  let path = sm
    .get(&span.file)
    .map(|file| file.path.display().to_string())
    .unwrap_or_else(|| "<snapshot>".to_string());

  let _ = writeln!(
    out,
    "{:2}{} {}:{}:{}",
    "",
    "-->".blue().bold(),
    path.bold(),
    line.to_string().bold(),
    col.to_string().bold(),
  );

  let Some(text) = sm.get(&span.file).map(|file| file.text.as_str()) else {
    return;
  };
  let Some(source_line) = text.lines().nth((line as usize).saturating_sub(1)) else {
    return;
  };

  let pipe = "|".blue().bold();
  let _ = writeln!(out, "{:3}{:3}", "", pipe);
  let _ = writeln!(out, "{:3}{:3}{}", line.to_string().blue().bold(), pipe, source_line);

  let width = span.len().clamp(1, source_line.len().saturating_sub(col as usize - 1).max(1));
  let caret = "^".repeat(width).red().bold();
  let _ = writeln!(out, "{:3}{:3}{}{}", "", pipe, " ".repeat(col as usize - 1), caret);
}
