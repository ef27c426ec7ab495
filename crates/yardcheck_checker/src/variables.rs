use yardcheck_config::DebugTrace;
use yardcheck_diagnostics::message::ProblemMessage;
use yardcheck_log::trace_dbg;
use yardcheck_model::{AssignmentId, TypedAssignment};
use yardcheck_type::{
  compat::is_compatible,
  location::{Anchor, Location},
  resolve::ResolvedType,
};

use crate::Checker;

impl Checker<'_> {
  pub(crate) fn check_variables(&mut self) {
    let unit = self.unit;
    for (id, assignment) in unit.model.assignments() {
      self.check_variable(id, assignment);
    }
  }

  fn check_variable(
    &mut self,
    id: AssignmentId,
    assignment: &TypedAssignment,
  ) {
    if assignment.annotation.trim().is_empty() {
      return;
    }

    let namespace = assignment.namespace.as_deref();
    let anchor = Anchor::Assignment(id.index());
    let location = Location::new(anchor, assignment.span.clone());

    let declared = match self.resolve_annotation(anchor, &assignment.annotation, namespace) {
      ResolvedType::Unresolved { missing, .. } => {
        self.problems.push(ProblemMessage::UnresolvedVariableType {
          name: assignment.name.clone(),
          annotation: assignment.annotation.trim().to_string(),
          missing,
          location,
        });
        return;
      },
      ResolvedType::Resolved(declared) => declared,
    };

    if declared.is_unchecked() {
      return;
    }

    let inferred = self.unit.inference.infer(&assignment.value, &self.context().within(namespace));
    trace_dbg!(self.config, DebugTrace::Rules, "{} = {}, declared {}", assignment.name, inferred, declared);

    if !is_compatible(&declared, &inferred, &self.hierarchy) {
      self.problems.push(ProblemMessage::VariableTypeMismatch {
        name: assignment.name.clone(),
        declared: declared.to_string(),
        inferred: inferred.to_string(),
        location,
      });
    }
  }
}
