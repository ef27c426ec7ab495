use yardcheck_type::location::Location;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
  Info,
  Warning,
  Error,
  Hint,
}

/// Stable category of a problem, independent of its wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProblemKind {
  Mismatch,
  Unresolved,
  MissingKeyword,
  WrongArgumentType,
  ArityOverflow,
}

impl ProblemKind {
  pub fn tag(self) -> &'static str {
    match self {
      ProblemKind::Mismatch => "mismatch",
      ProblemKind::Unresolved => "unresolved",
      ProblemKind::MissingKeyword => "missing-keyword",
      ProblemKind::WrongArgumentType => "wrong-argument-type",
      ProblemKind::ArityOverflow => "arity-overflow",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Problem {
  pub kind: ProblemKind,
  pub severity: Severity,
  pub message: String,
  pub code: String,
  pub location: Location,
  pub notes: Vec<String>,
}

impl Problem {
  pub fn new(
    kind: ProblemKind,
    severity: Severity,
    message: String,
    code: String,
    location: Location,
  ) -> Self {
    Self {
      kind,
      severity,
      message,
      code,
      location,
      notes: Vec::new(),
    }
  }

  pub fn with_note(
    mut self,
    note: String,
  ) -> Self {
    self.notes.push(note);
    self
  }

  pub fn is_error(&self) -> bool {
    self.severity == Severity::Error
  }
}
