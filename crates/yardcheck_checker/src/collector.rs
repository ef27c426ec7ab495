use std::collections::HashSet;

use yardcheck_diagnostics::{
  message::ProblemMessage,
  problem::{Problem, ProblemKind},
};
use yardcheck_type::location::Location;

/// Accumulates problems, dropping repeats of the same finding.
#[derive(Debug, Default)]
pub struct ProblemCollector {
  problems: Vec<Problem>,
  seen: HashSet<(ProblemKind, Location, String)>,
}

impl ProblemCollector {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns `false` when an identical problem was already collected.
  pub fn push(
    &mut self,
    message: ProblemMessage,
  ) -> bool {
    self.push_problem(message.report())
  }

  pub fn push_problem(
    &mut self,
    problem: Problem,
  ) -> bool {
    let key = (problem.kind, problem.location.clone(), problem.message.clone());
    if !self.seen.insert(key) {
      return false;
    }

    self.problems.push(problem);
    true
  }

  pub fn len(&self) -> usize {
    self.problems.len()
  }

  pub fn is_empty(&self) -> bool {
    self.problems.is_empty()
  }

  /// Problems ordered by position, then code.
  pub fn into_problems(self) -> Vec<Problem> {
    let mut problems = self.problems;
    problems.sort_by(|a, b| {
      a.location
        .span
        .start
        .cmp(&b.location.span.start)
        .then_with(|| a.code.cmp(&b.code))
    });
    problems
  }
}

#[cfg(test)]
mod tests {
  use yardcheck_type::{location::Anchor, span::Span, BytePosition};

  use super::*;

  fn unresolved(
    at: u32,
    annotation: &str,
  ) -> ProblemMessage {
    ProblemMessage::UnresolvedReturnType {
      method: "Foo#bar".into(),
      annotation: annotation.into(),
      missing: vec![annotation.into()],
      location: Location::new(
        Anchor::Method(at),
        Span::new(Default::default(), BytePosition(at * 10), BytePosition(at * 10 + 3)),
      ),
    }
  }

  #[test]
  fn identical_problems_are_kept_once() {
    let mut collector = ProblemCollector::new();
    assert!(collector.push(unresolved(0, "Missing")));
    assert!(!collector.push(unresolved(0, "Missing")));
    assert!(collector.push(unresolved(0, "Other")));
    assert_eq!(collector.len(), 2);
  }

  #[test]
  fn problems_come_out_in_source_order() {
    let mut collector = ProblemCollector::new();
    collector.push(unresolved(2, "Late"));
    collector.push(unresolved(1, "Early"));

    let messages: Vec<String> = collector.into_problems().into_iter().map(|p| p.message).collect();
    assert_eq!(
      messages,
      ["Unresolved return type Early for Foo#bar", "Unresolved return type Late for Foo#bar"]
    );
  }
}
