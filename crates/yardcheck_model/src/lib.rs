//! Semantic snapshot consumed by the checker.
//!
//! The checker never parses source code. It reads declarations and call sites
//! through [`SemanticModel`], asks [`Inference`] what expressions evaluate to,
//! and maps calls to methods through [`CallResolver`]. [`Snapshot`] implements
//! all of them together with [`yardcheck_type::index::TypeIndex`] for data
//! produced ahead of time (JSON or the builder).

pub mod builtin;
pub mod decl;
pub mod expr;
mod infer;
pub mod snapshot;

use yardcheck_type::{compat::Ancestry, types::InferredType, Id};

pub use decl::{MethodDecl, NamespaceKind, ParamDecl, ParamTag, ParameterKind, TypeDecl};
pub use expr::{CallSite, Expr, KeywordArg, TypedAssignment};
pub use snapshot::{Snapshot, SnapshotBuilder, SnapshotFile};

pub type MethodId = Id<MethodDecl>;
pub type AssignmentId = Id<TypedAssignment>;
pub type CallId = Id<CallSite>;

/// Everything one analyzed unit declares.
pub trait SemanticModel {
  fn methods(&self) -> Vec<(MethodId, &MethodDecl)>;

  fn method(
    &self,
    id: MethodId,
  ) -> Option<&MethodDecl>;

  fn assignments(&self) -> Vec<(AssignmentId, &TypedAssignment)>;

  fn calls(&self) -> Vec<(CallId, &CallSite)>;
}

/// Where an expression is evaluated.
#[derive(Clone, Copy)]
pub struct InferContext<'a> {
  pub ancestry: &'a dyn Ancestry,
  pub namespace: Option<&'a str>,
}

impl<'a> InferContext<'a> {
  pub fn new(ancestry: &'a dyn Ancestry) -> Self {
    Self {
      ancestry,
      namespace: None,
    }
  }

  pub fn within(
    mut self,
    namespace: Option<&'a str>,
  ) -> Self {
    self.namespace = namespace;
    self
  }
}

/// Expression-level type inference.
///
/// Must answer `Undetermined` instead of guessing, and must not fail on
/// unknown identifiers.
pub trait Inference {
  fn infer(
    &self,
    expr: &Expr,
    ctx: &InferContext<'_>,
  ) -> InferredType;

  /// Type of the value a method body returns.
  fn infer_body(
    &self,
    method: MethodId,
    ctx: &InferContext<'_>,
  ) -> InferredType;
}

/// Maps a call site to the methods it may invoke.
pub trait CallResolver {
  fn resolve_call(
    &self,
    call: &CallSite,
    ctx: &InferContext<'_>,
  ) -> Vec<MethodId>;
}
