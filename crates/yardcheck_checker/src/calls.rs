use yardcheck_config::{ArityPolicy, DebugTrace};
use yardcheck_diagnostics::message::ProblemMessage;
use yardcheck_log::{log_trc, trace_dbg};
use yardcheck_model::{CallId, CallSite, ParameterKind};
use yardcheck_type::{
  compat::is_compatible,
  location::{Anchor, Location},
  resolve::ResolvedType,
};

use crate::{Checker, Signature, SnapshotError};

impl Checker<'_> {
  pub(crate) fn check_calls(&mut self) -> Result<(), SnapshotError> {
    let unit = self.unit;
    for (id, call) in unit.model.calls() {
      self.check_call(id, call)?;
    }
    Ok(())
  }

  /// A call passes when any candidate accepts its arguments; otherwise the
  /// nearest candidate's problems are reported.
  fn check_call(
    &mut self,
    id: CallId,
    call: &CallSite,
  ) -> Result<(), SnapshotError> {
    let namespace = call.namespace.as_deref();
    let candidates = self.unit.resolver.resolve_call(call, &self.context().within(namespace));
    if candidates.is_empty() {
      log_trc!(self.config, "call to {} resolves to no method", call.method);
      return Ok(());
    }

    let location = Location::new(Anchor::Call(id.index()), call.span.clone());
    let mut reported: Option<Vec<ProblemMessage>> = None;

    for candidate in candidates {
      let signature = self.signature(candidate)?;
      let found = self.check_arguments(&signature, call, &location);
      trace_dbg!(
        self.config,
        DebugTrace::Rules,
        "call to {}: {} problems",
        signature.path,
        found.len()
      );

      if found.is_empty() {
        return Ok(());
      }
      if reported.is_none() {
        reported = Some(found);
      }
    }

    for message in reported.unwrap_or_default() {
      self.problems.push(message);
    }
    Ok(())
  }

  fn check_arguments(
    &mut self,
    signature: &Signature,
    call: &CallSite,
    location: &Location,
  ) -> Vec<ProblemMessage> {
    let mut found = Vec::new();
    let binding = signature.bind(&call.args, &call.kwargs);

    for param in &binding.missing_keywords {
      found.push(ProblemMessage::MissingKeywordArgument {
        method: signature.path.clone(),
        param: param.name.clone(),
        location: location.clone(),
      });
    }

    let anchor = Anchor::Method(signature.method.index());
    for (param, arg) in &binding.pairs {
      // Splat tags describe the collection, not each element.
      if !param.is_typed() || matches!(param.kind, ParameterKind::Rest | ParameterKind::DoubleRest) {
        continue;
      }

      let Some(text) = param.annotation.as_deref() else {
        continue;
      };
      let namespace = param.inherited_from.as_deref().or(signature.owner.as_deref());
      let ResolvedType::Resolved(expected) = self.resolve_annotation(anchor, text, namespace) else {
        continue;
      };

      let received = self
        .unit
        .inference
        .infer(arg, &self.context().within(call.namespace.as_deref()));

      if !is_compatible(&expected, &received, &self.hierarchy) {
        found.push(ProblemMessage::WrongArgumentType {
          method: signature.path.clone(),
          param: param.name.clone(),
          expected: expected.to_string(),
          received: received.to_string(),
          location: location.clone(),
        });
      }
    }

    if self.config.arity == ArityPolicy::Report && !binding.unbound.is_empty() {
      found.push(ProblemMessage::TooManyArguments {
        method: signature.path.clone(),
        unbound: binding.unbound.clone(),
        location: location.clone(),
      });
    }

    found
  }
}
