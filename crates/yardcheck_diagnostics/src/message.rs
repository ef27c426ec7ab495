use std::fmt;

use yardcheck_type::location::Location;

use super::problem::{Problem, ProblemKind, Severity};

#[derive(Debug, Clone, PartialEq)]
pub enum ProblemMessage {
  // #region Mismatch
  ReturnTypeMismatch {
    method: String,
    declared: String,
    inferred: String,
    inherited_from: Option<String>,
    location: Location,
  },
  VariableTypeMismatch {
    name: String,
    declared: String,
    inferred: String,
    location: Location,
  },
  // #endregion Mismatch
  // #region Unresolved
  UnresolvedReturnType {
    method: String,
    annotation: String,
    missing: Vec<String>,
    location: Location,
  },
  UnresolvedParamType {
    method: String,
    param: String,
    annotation: String,
    missing: Vec<String>,
    location: Location,
  },
  UnresolvedVariableType {
    name: String,
    annotation: String,
    missing: Vec<String>,
    location: Location,
  },
  // #endregion Unresolved
  // #region Calls
  MissingKeywordArgument {
    method: String,
    param: String,
    location: Location,
  },
  WrongArgumentType {
    method: String,
    param: String,
    expected: String,
    received: String,
    location: Location,
  },
  TooManyArguments {
    method: String,
    unbound: Vec<String>,
    location: Location,
  },
  // #endregion Calls
}

impl fmt::Display for ProblemMessage {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ProblemMessage::ReturnTypeMismatch {
        method,
        declared,
        inferred,
        ..
      } => write!(
        f,
        "Declared return type {} does not match inferred type {} for {}",
        declared, inferred, method
      ),
      ProblemMessage::VariableTypeMismatch {
        name,
        declared,
        inferred,
        ..
      } => write!(
        f,
        "Declared type {} does not match inferred type {} for variable {}",
        declared, inferred, name
      ),
      ProblemMessage::UnresolvedReturnType { method, annotation, .. } => {
        write!(f, "Unresolved return type {} for {}", annotation, method)
      },
      ProblemMessage::UnresolvedParamType {
        method,
        param,
        annotation,
        ..
      } => write!(f, "Unresolved type {} for {} param on {}", annotation, param, method),
      ProblemMessage::UnresolvedVariableType { name, annotation, .. } => {
        write!(f, "Unresolved type {} for variable {}", annotation, name)
      },
      ProblemMessage::MissingKeywordArgument { method, param, .. } => {
        write!(f, "Call to {} is missing keyword argument {}", method, param)
      },
      ProblemMessage::WrongArgumentType {
        method,
        param,
        expected,
        received,
        ..
      } => write!(
        f,
        "Wrong argument type for {}: {} expected {}, received {}",
        method, param, expected, received
      ),
      ProblemMessage::TooManyArguments { method, unbound, .. } => {
        write!(f, "Too many arguments to {}: {} not accepted", method, unbound.join(", "))
      },
    }
  }
}

impl ProblemMessage {
  pub fn location(&self) -> &Location {
    match self {
      ProblemMessage::ReturnTypeMismatch { location, .. }
      | ProblemMessage::VariableTypeMismatch { location, .. }
      | ProblemMessage::UnresolvedReturnType { location, .. }
      | ProblemMessage::UnresolvedParamType { location, .. }
      | ProblemMessage::UnresolvedVariableType { location, .. }
      | ProblemMessage::MissingKeywordArgument { location, .. }
      | ProblemMessage::WrongArgumentType { location, .. }
      | ProblemMessage::TooManyArguments { location, .. } => location,
    }
  }

  pub fn kind(&self) -> ProblemKind {
    match self {
      ProblemMessage::ReturnTypeMismatch { .. } | ProblemMessage::VariableTypeMismatch { .. } => ProblemKind::Mismatch,
      ProblemMessage::UnresolvedReturnType { .. }
      | ProblemMessage::UnresolvedParamType { .. }
      | ProblemMessage::UnresolvedVariableType { .. } => ProblemKind::Unresolved,
      ProblemMessage::MissingKeywordArgument { .. } => ProblemKind::MissingKeyword,
      ProblemMessage::WrongArgumentType { .. } => ProblemKind::WrongArgumentType,
      ProblemMessage::TooManyArguments { .. } => ProblemKind::ArityOverflow,
    }
  }

  pub fn code(&self) -> String {
    match self {
      ProblemMessage::ReturnTypeMismatch { .. } => "Y0001",
      ProblemMessage::VariableTypeMismatch { .. } => "Y0002",
      ProblemMessage::UnresolvedReturnType { .. } => "Y0010",
      ProblemMessage::UnresolvedParamType { .. } => "Y0011",
      ProblemMessage::UnresolvedVariableType { .. } => "Y0012",
      ProblemMessage::MissingKeywordArgument { .. } => "Y0020",
      ProblemMessage::WrongArgumentType { .. } => "Y0021",
      ProblemMessage::TooManyArguments { .. } => "Y0022",
    }
    .to_string()
  }

  fn level(&self) -> Severity {
    match self {
      ProblemMessage::TooManyArguments { .. } => Severity::Warning,
      _ => Severity::Error,
    }
  }

  fn notes(&self) -> Vec<String> {
    match self {
      ProblemMessage::ReturnTypeMismatch {
        inherited_from: Some(owner),
        ..
      } => vec![format!("return type inherited from {}", owner)],
      ProblemMessage::UnresolvedReturnType { missing, .. }
      | ProblemMessage::UnresolvedParamType { missing, .. }
      | ProblemMessage::UnresolvedVariableType { missing, .. } => {
        vec![format!("not found: {}", missing.join(", "))]
      },
      _ => vec![],
    }
  }

  pub fn report(&self) -> Problem {
    self.report_with_severity(self.level())
  }

  pub fn report_with_severity(
    &self,
    severity: Severity,
  ) -> Problem {
    let mut problem = Problem::new(self.kind(), severity, self.to_string(), self.code(), self.location().clone());
    for note in self.notes() {
      problem = problem.with_note(note);
    }
    problem
  }
}

#[cfg(test)]
mod tests {
  use yardcheck_type::{location::Anchor, span::Span};

  use super::*;

  fn at_method() -> Location {
    Location::new(Anchor::Method(0), Span::default())
  }

  #[test]
  fn messages_carry_their_category_phrases() {
    let mismatch = ProblemMessage::ReturnTypeMismatch {
      method: "Foo#bar".into(),
      declared: "Integer".into(),
      inferred: "String".into(),
      inherited_from: None,
      location: at_method(),
    };
    let unresolved = ProblemMessage::UnresolvedReturnType {
      method: "Foo#bar".into(),
      annotation: "UnknownClass".into(),
      missing: vec!["UnknownClass".into()],
      location: at_method(),
    };
    let missing = ProblemMessage::MissingKeywordArgument {
      method: "Foo#bar".into(),
      param: "baz".into(),
      location: at_method(),
    };
    let wrong = ProblemMessage::WrongArgumentType {
      method: "Foo#bar".into(),
      param: "baz".into(),
      expected: "Integer".into(),
      received: "String".into(),
      location: at_method(),
    };

    assert!(mismatch.to_string().contains("does not match"));
    assert!(unresolved.to_string().contains("Unresolved"));
    assert!(missing.to_string().contains("missing keyword argument"));
    assert!(wrong.to_string().contains("Wrong argument type"));
    assert!(wrong.to_string().contains("baz"));
  }

  #[test]
  fn report_fills_kind_code_and_notes() {
    let problem = ProblemMessage::ReturnTypeMismatch {
      method: "Sub#name".into(),
      declared: "String".into(),
      inferred: "Integer".into(),
      inherited_from: Some("Sup".into()),
      location: at_method(),
    }
    .report();

    assert_eq!(problem.kind, ProblemKind::Mismatch);
    assert_eq!(problem.code, "Y0001");
    assert_eq!(problem.severity, Severity::Error);
    assert_eq!(problem.notes, vec!["return type inherited from Sup".to_string()]);
  }

  #[test]
  fn arity_overflow_is_a_warning() {
    let problem = ProblemMessage::TooManyArguments {
      method: "Foo#bar".into(),
      unbound: vec!["argument 2".into()],
      location: at_method(),
    }
    .report();

    assert_eq!(problem.severity, Severity::Warning);
    assert_eq!(problem.kind.tag(), "arity-overflow");
  }
}
