use yardcheck_config::DebugTrace;
use yardcheck_diagnostics::message::ProblemMessage;
use yardcheck_log::trace_dbg;
use yardcheck_model::{MethodDecl, MethodId};
use yardcheck_type::{
  compat::is_compatible,
  index::AnnotationSelector,
  location::{Anchor, Location},
  resolve::ResolvedType,
};

use crate::Checker;

impl Checker<'_> {
  pub(crate) fn check_returns(&mut self) {
    let unit = self.unit;
    for (id, method) in unit.model.methods() {
      self.check_return(id, method);
    }
  }

  fn check_return(
    &mut self,
    id: MethodId,
    method: &MethodDecl,
  ) {
    let owner = method.owner.as_deref();
    let (text, inherited_from) = match method.own_return_tag() {
      Some(text) => (text.to_string(), None),
      None => {
        let inherited = owner.and_then(|owner| {
          self
            .hierarchy
            .nearest_annotation(owner, &method.name, method.scope, AnnotationSelector::Return, true)
            .map(|(ancestor, text)| (text.to_string(), Some(ancestor.to_string())))
        });
        match inherited {
          Some(found) => found,
          None => return,
        }
      },
    };

    let anchor = Anchor::Method(id.index());
    let location = Location::new(anchor, method.span.clone());

    let namespace = inherited_from.as_deref().or(owner);
    let declared = match self.resolve_annotation(anchor, &text, namespace) {
      // The ancestor that wrote the tag reports it.
      ResolvedType::Unresolved { .. } if inherited_from.is_some() => return,
      ResolvedType::Unresolved { missing, .. } => {
        self.problems.push(ProblemMessage::UnresolvedReturnType {
          method: method.path(),
          annotation: text.trim().to_string(),
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

    let inferred = self.unit.inference.infer_body(id, &self.context().within(owner));
    trace_dbg!(self.config, DebugTrace::Rules, "{} returns {}, declared {}", method.path(), inferred, declared);

    if !is_compatible(&declared, &inferred, &self.hierarchy) {
      self.problems.push(ProblemMessage::ReturnTypeMismatch {
        method: method.path(),
        declared: declared.to_string(),
        inferred: inferred.to_string(),
        inherited_from,
        location,
      });
    }
  }
}
