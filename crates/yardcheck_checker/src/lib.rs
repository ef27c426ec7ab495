//! Checks documentation-comment type annotations against a semantic snapshot.
//!
//! A run resolves every annotation, compares it with what inference can tell,
//! and binds call-site arguments to the parameters of the methods they reach.
//! Inference that gives up never produces a problem; a name missing from the
//! index always does.

mod calls;
mod collector;
pub mod dump;
mod hierarchy;
mod params;
mod returns;
mod signature;
mod variables;

use std::collections::HashMap;
use std::fmt;

use yardcheck_config::{CheckerConfig, DebugTrace};
use yardcheck_diagnostics::problem::Problem;
use yardcheck_log::{log_dbg, trace_dbg};
use yardcheck_model::{CallResolver, InferContext, Inference, MethodId, SemanticModel, Snapshot};
use yardcheck_type::{
  annotation::parse,
  index::{AnnotationSelector, TypeIndex},
  location::Anchor,
  resolve::{resolve_in, ResolveScope, ResolvedType},
};

pub use collector::ProblemCollector;
pub use hierarchy::Hierarchy;
pub use signature::{Binding, Parameter, Signature};

/// The collaborators one checking run reads from.
#[derive(Clone, Copy)]
pub struct Unit<'a> {
  pub model: &'a dyn SemanticModel,
  pub index: &'a dyn TypeIndex,
  pub inference: &'a dyn Inference,
  pub resolver: &'a dyn CallResolver,
}

impl<'a> Unit<'a> {
  pub fn new(
    model: &'a dyn SemanticModel,
    index: &'a dyn TypeIndex,
    inference: &'a dyn Inference,
    resolver: &'a dyn CallResolver,
  ) -> Self {
    Self {
      model,
      index,
      inference,
      resolver,
    }
  }

  pub fn from_snapshot(snapshot: &'a Snapshot) -> Self {
    Self::new(snapshot, snapshot, snapshot, snapshot)
  }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckResult {
  pub problems: Vec<Problem>,
}

impl CheckResult {
  pub fn has_errors(&self) -> bool {
    self.problems.iter().any(Problem::is_error)
  }

  pub fn is_empty(&self) -> bool {
    self.problems.is_empty()
  }
}

/// The snapshot broke its contract; the run produces no partial result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
  /// A call reaches a method whose parameter list was not recorded.
  MissingSignature { method: String },
  /// A call resolved to a method id the model does not hold.
  UnknownMethod { id: u32 },
}

impl fmt::Display for SnapshotError {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      SnapshotError::MissingSignature { method } => write!(f, "method {} has no parameter list", method),
      SnapshotError::UnknownMethod { id } => write!(f, "call resolved to unknown method #{}", id),
    }
  }
}

impl std::error::Error for SnapshotError {}

/// Runs every rule family the configured profile enables.
pub fn check(
  unit: &Unit<'_>,
  config: &CheckerConfig,
) -> Result<CheckResult, SnapshotError> {
  let mut checker = Checker::new(unit, config);
  checker.run()?;
  Ok(checker.finish())
}

pub(crate) struct Checker<'a> {
  unit: &'a Unit<'a>,
  config: &'a CheckerConfig,
  hierarchy: Hierarchy<'a>,
  annotations: HashMap<(Anchor, Option<String>, String), ResolvedType>,
  signatures: HashMap<MethodId, Signature>,
  problems: ProblemCollector,
}

impl<'a> Checker<'a> {
  pub(crate) fn new(
    unit: &'a Unit<'a>,
    config: &'a CheckerConfig,
  ) -> Self {
    Self {
      unit,
      config,
      hierarchy: Hierarchy::build(unit.index, config),
      annotations: HashMap::new(),
      signatures: HashMap::new(),
      problems: ProblemCollector::new(),
    }
  }

  fn run(&mut self) -> Result<(), SnapshotError> {
    let rules = self.config.rules();
    log_dbg!(self.config, "checking with the {} profile", self.config.profile.name());

    if rules.returns {
      trace_dbg!(self.config, DebugTrace::Rules, "return types");
      self.check_returns();
    }

    if rules.variables {
      trace_dbg!(self.config, DebugTrace::Rules, "typed assignments");
      self.check_variables();
    }

    if rules.params {
      trace_dbg!(self.config, DebugTrace::Rules, "parameter tags");
      self.check_params();
    }

    if rules.calls {
      trace_dbg!(self.config, DebugTrace::Rules, "call sites");
      self.check_calls()?;
    }

    Ok(())
  }

  fn finish(self) -> CheckResult {
    log_dbg!(self.config, "{} problems", self.problems.len());
    CheckResult {
      problems: self.problems.into_problems(),
    }
  }

  fn context(&self) -> InferContext<'_> {
    InferContext::new(&self.hierarchy)
  }

  /// Parses and resolves `text`, once per anchor and namespace.
  fn resolve_annotation(
    &mut self,
    anchor: Anchor,
    text: &str,
    namespace: Option<&str>,
  ) -> ResolvedType {
    let key = (anchor, namespace.map(str::to_string), text.to_string());
    if let Some(resolved) = self.annotations.get(&key) {
      return resolved.clone();
    }

    let mut ty = parse(text);
    if let Some(namespace) = namespace {
      ty = ty.replace_self(namespace);
    }

    let scope = ResolveScope::new(self.unit.index)
      .with_namespace(namespace)
      .with_builtins(&self.config.builtins);
    let resolved = resolve_in(&ty, &scope);
    trace_dbg!(self.config, DebugTrace::Types, "{:?} `{}` -> {:?}", anchor, text, resolved);

    self.annotations.insert(key, resolved.clone());
    resolved
  }

  /// Signature of `id`, with tags inherited from ancestors where the method
  /// documents none of its own.
  fn signature(
    &mut self,
    id: MethodId,
  ) -> Result<Signature, SnapshotError> {
    if let Some(signature) = self.signatures.get(&id) {
      return Ok(signature.clone());
    }

    let signature = build_signature(self.unit, &self.hierarchy, id)?;
    trace_dbg!(
      self.config,
      DebugTrace::Signature,
      "{}({})",
      signature.path,
      signature.params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
    );

    self.signatures.insert(id, signature.clone());
    Ok(signature)
  }
}

pub(crate) fn build_signature(
  unit: &Unit<'_>,
  hierarchy: &Hierarchy<'_>,
  id: MethodId,
) -> Result<Signature, SnapshotError> {
  let decl = unit.model.method(id).ok_or(SnapshotError::UnknownMethod { id: id.index() })?;
  let params = decl
    .params
    .as_ref()
    .ok_or_else(|| SnapshotError::MissingSignature { method: decl.path() })?;

  Ok(Signature::build(id, decl, params, |name| {
    if let Some(text) = decl.param_tag(name) {
      return Some((text, None));
    }

    let owner = decl.owner.as_deref()?;
    hierarchy
      .nearest_annotation(owner, &decl.name, decl.scope, AnnotationSelector::Param(name), true)
      .map(|(ancestor, text)| (text, Some(ancestor.to_string())))
  }))
}
