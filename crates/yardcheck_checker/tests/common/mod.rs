use yardcheck_checker::{check, CheckResult, Unit};
use yardcheck_config::{ArityPolicy, CheckerConfig};
use yardcheck_diagnostics::problem::{Problem, Severity};
use yardcheck_model::Snapshot;
use yardcheck_type::{span::Span, BytePosition};

/// Run every rule with a silent configuration.
pub fn analyze(snapshot: &Snapshot) -> CheckResult {
  analyze_with(snapshot, &CheckerConfig::quiet())
}

pub fn analyze_with(
  snapshot: &Snapshot,
  config: &CheckerConfig,
) -> CheckResult {
  check(&Unit::from_snapshot(snapshot), config).expect("snapshot violates its contract")
}

/// Same as `analyze` but with arity overflow reported.
#[allow(dead_code)]
pub fn analyze_strict_arity(snapshot: &Snapshot) -> CheckResult {
  analyze_with(snapshot, &CheckerConfig::quiet().with_arity(ArityPolicy::Report))
}

/// Assert the snapshot checks without any problem.
#[allow(dead_code)]
pub fn assert_ok(snapshot: &Snapshot) {
  let result = analyze(snapshot);
  assert!(
    result.problems.is_empty(),
    "Expected no problems, got:\n{}",
    format_problems(&result.problems)
  );
}

/// Assert exactly one problem with `code` whose message contains `needle`.
#[allow(dead_code)]
pub fn assert_one(
  snapshot: &Snapshot,
  code: &str,
  needle: &str,
) -> Problem {
  let result = analyze(snapshot);
  assert_eq!(
    result.problems.len(),
    1,
    "Expected one problem, got:\n{}",
    format_problems(&result.problems)
  );

  let problem = result.problems[0].clone();
  assert_eq!(problem.code, code, "Unexpected code for: {}", problem.message);
  assert!(
    problem.message.contains(needle),
    "Expected `{}` in message: {}",
    needle,
    problem.message
  );
  problem
}

/// Assert the problem codes, in reported order.
#[allow(dead_code)]
pub fn assert_codes(
  snapshot: &Snapshot,
  expected: &[&str],
) {
  let result = analyze(snapshot);
  let actual: Vec<&str> = result.problems.iter().map(|p| p.code.as_str()).collect();
  assert_eq!(actual, expected, "Got:\n{}", format_problems(&result.problems));
}

/// Format problems for stable snapshot comparison.
pub fn format_problems(problems: &[Problem]) -> String {
  if problems.is_empty() {
    return "(no problems)".to_string();
  }

  let mut lines = Vec::new();
  for problem in problems {
    let severity = match problem.severity {
      Severity::Error => "ERROR",
      Severity::Warning => "WARN",
      Severity::Info => "INFO",
      Severity::Hint => "HINT",
    };
    lines.push(format!("[{}] {}: {}", severity, problem.code, problem.message));
    for note in &problem.notes {
      lines.push(format!("  note: {}", note));
    }
  }
  lines.join("\n")
}

/// Span of the first occurrence of `needle` in `text`.
#[allow(dead_code)]
pub fn span_of(
  text: &str,
  needle: &str,
) -> Span {
  let start = text.find(needle).expect("needle not in text") as u32;
  Span::new(Default::default(), BytePosition(start), BytePosition(start + needle.len() as u32))
}
