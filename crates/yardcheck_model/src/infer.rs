//! The bundled inference: literals, constructors, constants and calls to
//! methods whose return type is documented. Everything else is undetermined.

use yardcheck_type::{
  annotation::parse,
  index::{AnnotationSelector, MethodScope, TypeIndex},
  resolve::{resolve_in, ResolveScope, ResolvedType},
  types::{ComplexType, InferredType, ParamShape, SimpleType},
};

use crate::{
  decl::NamespaceKind, expr::Expr, CallResolver, CallSite, InferContext, Inference, MethodId, SemanticModel, Snapshot,
};

impl Inference for Snapshot {
  fn infer(
    &self,
    expr: &Expr,
    ctx: &InferContext<'_>,
  ) -> InferredType {
    match expr {
      Expr::Literal { type_name } => InferredType::named(type_name.clone()),
      Expr::Nil => InferredType::Known(ComplexType::nil()),
      // Modules have no instances.
      Expr::New { class } => match self.qualify(class, ctx) {
        Some(name) if self.kind_of(&name) != Some(NamespaceKind::Module) => InferredType::named(name),
        _ => InferredType::Undetermined,
      },
      Expr::Const { name } => match self.qualify(name, ctx) {
        Some(name) => InferredType::Known(class_of(name)),
        None => InferredType::Undetermined,
      },
      Expr::SelfRef => match ctx.namespace {
        Some(namespace) => InferredType::named(namespace),
        None => InferredType::Undetermined,
      },
      Expr::Typed { annotation } => {
        let scope = ResolveScope::new(self).with_namespace(ctx.namespace);
        match resolve_in(&parse(annotation), &scope) {
          ResolvedType::Resolved(ty) => InferredType::known(ty),
          ResolvedType::Unresolved { .. } => InferredType::Undetermined,
        }
      },
      Expr::Call { receiver, method, .. } => self.infer_call(receiver.as_deref(), method, ctx),
      Expr::Unknown => InferredType::Undetermined,
    }
  }

  fn infer_body(
    &self,
    method: MethodId,
    ctx: &InferContext<'_>,
  ) -> InferredType {
    let Some(decl) = self.method(method) else {
      return InferredType::Undetermined;
    };

    let ctx = ctx.within(decl.owner.as_deref());
    let mut exprs = decl.body.iter();
    let Some(first) = exprs.next() else {
      return InferredType::Known(ComplexType::nil());
    };

    let mut inferred = self.infer(first, &ctx);
    for expr in exprs {
      if inferred.is_undetermined() {
        break;
      }
      inferred = inferred.join(&self.infer(expr, &ctx));
    }
    inferred
  }
}

impl CallResolver for Snapshot {
  fn resolve_call(
    &self,
    call: &CallSite,
    ctx: &InferContext<'_>,
  ) -> Vec<MethodId> {
    let ctx = ctx.within(call.namespace.as_deref().or(ctx.namespace));
    self.lookup(call.receiver.as_ref(), &call.method, &ctx)
  }
}

fn class_of(name: String) -> ComplexType {
  ComplexType::single(SimpleType::named("Class").with_params(ParamShape::List, vec![ComplexType::named(name)]))
}

impl Snapshot {
  fn qualify(
    &self,
    name: &str,
    ctx: &InferContext<'_>,
  ) -> Option<String> {
    ResolveScope::new(self).with_namespace(ctx.namespace).qualify(name)
  }

  fn infer_call(
    &self,
    receiver: Option<&Expr>,
    method: &str,
    ctx: &InferContext<'_>,
  ) -> InferredType {
    if let (Some(Expr::Const { name }), "new") = (receiver, method) {
      return self.infer(&Expr::New { class: name.clone() }, ctx);
    }

    let candidates = self.lookup(receiver, method, ctx);
    if candidates.is_empty() {
      return InferredType::Undetermined;
    }

    let mut inferred: Option<InferredType> = None;
    for id in candidates {
      let returned = self.documented_return(id, ctx);
      inferred = Some(match inferred {
        Some(previous) => previous.join(&returned),
        None => returned,
      });
    }
    inferred.unwrap_or(InferredType::Undetermined)
  }

  /// Return type a method documents, on itself or on the nearest ancestor.
  fn documented_return(
    &self,
    id: MethodId,
    ctx: &InferContext<'_>,
  ) -> InferredType {
    let Some(decl) = self.method(id) else {
      return InferredType::Undetermined;
    };

    let text = match (decl.own_return_tag(), decl.owner.as_deref()) {
      (Some(text), _) => Some(text),
      (None, Some(owner)) => ctx
        .ancestry
        .lineage(owner)
        .iter()
        .skip(1)
        .find_map(|ancestor| self.member_annotation(ancestor, &decl.name, decl.scope, AnnotationSelector::Return)),
      (None, None) => None,
    };

    let Some(text) = text else {
      return InferredType::Undetermined;
    };

    let mut ty = parse(text);
    if let Some(owner) = decl.owner.as_deref() {
      ty = ty.replace_self(owner);
    }

    let scope = ResolveScope::new(self).with_namespace(decl.owner.as_deref());
    match resolve_in(&ty, &scope) {
      ResolvedType::Resolved(ty) => InferredType::known(ty),
      ResolvedType::Unresolved { .. } => InferredType::Undetermined,
    }
  }

  /// Methods a call on `receiver` may reach, nearest definition first.
  fn lookup(
    &self,
    receiver: Option<&Expr>,
    method: &str,
    ctx: &InferContext<'_>,
  ) -> Vec<MethodId> {
    match receiver {
      None => {
        let inherited = ctx
          .namespace
          .and_then(|namespace| self.find_in_lineage(namespace, method, MethodScope::Instance, ctx));
        inherited.or_else(|| self.top_level_method(method)).into_iter().collect()
      },
      Some(Expr::Const { name }) => {
        let Some(name) = self.qualify(name, ctx) else {
          return Vec::new();
        };
        let found = if method == "new" {
          self.find_in_lineage(&name, "initialize", MethodScope::Instance, ctx)
        } else {
          self.find_in_lineage(&name, method, MethodScope::Class, ctx)
        };
        found.into_iter().collect()
      },
      Some(expr) => {
        let InferredType::Known(ty) = self.infer(expr, ctx) else {
          return Vec::new();
        };

        let mut found = Vec::new();
        for item in ty.items() {
          if item.is_nil() || item.is_duck() {
            continue;
          }

          let hit = match (item.name.as_str(), item.params.first()) {
            ("Class", Some(inner)) => inner
              .items()
              .first()
              .and_then(|class| self.find_in_lineage(&class.name, method, MethodScope::Class, ctx)),
            (name, _) => self.find_in_lineage(name, method, MethodScope::Instance, ctx),
          };

          if let Some(id) = hit {
            if !found.contains(&id) {
              found.push(id);
            }
          }
        }
        found
      },
    }
  }

  fn find_in_lineage(
    &self,
    name: &str,
    method: &str,
    scope: MethodScope,
    ctx: &InferContext<'_>,
  ) -> Option<MethodId> {
    let lineage = ctx.ancestry.lineage(name);
    if lineage.is_empty() {
      return self.member(name, method, scope);
    }

    lineage.iter().find_map(|ancestor| self.member(ancestor, method, scope))
  }
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use yardcheck_type::compat::Ancestry;

  use super::*;
  use crate::{MethodDecl, ParamDecl, SnapshotBuilder, TypeDecl};

  /// Superclass chain then direct mixins; enough for lookups in these tests.
  struct Lineages(HashMap<String, Vec<String>>);

  impl Lineages {
    fn of(snapshot: &Snapshot) -> Self {
      let mut lineages = HashMap::new();
      for name in snapshot.type_names() {
        let mut chain = vec![name.to_string()];
        let mut current = snapshot.superclass_of(name);
        while let Some(next) = current {
          chain.push(next.to_string());
          current = snapshot.superclass_of(next);
        }
        for owner in chain.clone() {
          for mixin in snapshot.mixins_of(&owner) {
            if !chain.iter().any(|c| c == mixin) {
              chain.push(mixin.to_string());
            }
          }
        }
        lineages.insert(name.to_string(), chain);
      }
      Self(lineages)
    }
  }

  impl Ancestry for Lineages {
    fn knows(
      &self,
      name: &str,
    ) -> bool {
      self.0.contains_key(name)
    }

    fn lineage(
      &self,
      name: &str,
    ) -> &[String] {
      self.0.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    fn responds_to(
      &self,
      _name: &str,
      _method: &str,
    ) -> Option<bool> {
      None
    }
  }

  fn fixture() -> Snapshot {
    SnapshotBuilder::new()
      .ty(TypeDecl::class("Foo"))
      .ty(TypeDecl::class("Sub").inherits("Foo"))
      .method(MethodDecl::instance("Foo", "name").returns("String"))
      .method(MethodDecl::instance("Foo", "me").returns("self"))
      .method(MethodDecl::instance("Sub", "name").body(vec![Expr::integer()]))
      .method(MethodDecl::singleton("Foo", "build").returns("Foo"))
      .method(MethodDecl::instance("Foo", "initialize").param(ParamDecl::required("bar")))
      .method(MethodDecl::new(None, "helper").returns("Integer"))
      .build()
  }

  #[test]
  fn literals_and_constructors() {
    let snapshot = fixture();
    let lineages = Lineages::of(&snapshot);
    let ctx = InferContext::new(&lineages);

    assert_eq!(snapshot.infer(&Expr::string(), &ctx), InferredType::named("String"));
    assert_eq!(snapshot.infer(&Expr::Nil, &ctx), InferredType::named("nil"));
    assert_eq!(snapshot.infer(&Expr::new_instance("Foo"), &ctx), InferredType::named("Foo"));
    assert_eq!(snapshot.infer(&Expr::new_instance("Missing"), &ctx), InferredType::Undetermined);
    assert_eq!(snapshot.infer(&Expr::new_instance("Comparable"), &ctx), InferredType::Undetermined);
    assert_eq!(snapshot.infer(&Expr::constant("Foo"), &ctx).to_string(), "Class<Foo>");
    assert_eq!(snapshot.infer(&Expr::Unknown, &ctx), InferredType::Undetermined);
  }

  #[test]
  fn calls_use_documented_return_types() {
    let snapshot = fixture();
    let lineages = Lineages::of(&snapshot);
    let ctx = InferContext::new(&lineages);

    let name = Expr::call(Expr::new_instance("Foo"), "name");
    assert_eq!(snapshot.infer(&name, &ctx), InferredType::named("String"));

    let me = Expr::call(Expr::new_instance("Sub"), "me");
    assert_eq!(snapshot.infer(&me, &ctx), InferredType::named("Foo"));

    let build = Expr::call(Expr::constant("Foo"), "build");
    assert_eq!(snapshot.infer(&build, &ctx), InferredType::named("Foo"));

    assert_eq!(snapshot.infer(&Expr::send("helper"), &ctx), InferredType::named("Integer"));
    assert_eq!(snapshot.infer(&Expr::send("unknown_method"), &ctx), InferredType::Undetermined);
  }

  #[test]
  fn overrides_inherit_the_documented_return_type() {
    let snapshot = fixture();
    let lineages = Lineages::of(&snapshot);
    let ctx = InferContext::new(&lineages);

    let name = Expr::call(Expr::new_instance("Sub"), "name");
    assert_eq!(snapshot.infer(&name, &ctx), InferredType::named("String"));
  }

  #[test]
  fn bodies_join_their_return_expressions() {
    let snapshot = SnapshotBuilder::new()
      .class("Foo")
      .method(MethodDecl::instance("Foo", "empty"))
      .method(MethodDecl::instance("Foo", "either").body(vec![Expr::string(), Expr::Nil]))
      .method(MethodDecl::instance("Foo", "opaque").body(vec![Expr::string(), Expr::Unknown]))
      .build();
    let lineages = Lineages::of(&snapshot);
    let ctx = InferContext::new(&lineages);

    let ids: Vec<_> = snapshot.methods().into_iter().map(|(id, _)| id).collect();
    assert_eq!(snapshot.infer_body(ids[0], &ctx), InferredType::named("nil"));
    assert_eq!(snapshot.infer_body(ids[1], &ctx).to_string(), "String, nil");
    assert_eq!(snapshot.infer_body(ids[2], &ctx), InferredType::Undetermined);
  }

  #[test]
  fn constructor_calls_resolve_to_initialize() {
    let snapshot = fixture();
    let lineages = Lineages::of(&snapshot);
    let ctx = InferContext::new(&lineages);

    let call = CallSite::new(Some(Expr::constant("Sub")), "new");
    let found = snapshot.resolve_call(&call, &ctx);
    assert_eq!(found.len(), 1);
    assert_eq!(snapshot.method(found[0]).map(|m| m.path()), Some("Foo#initialize".to_string()));
  }
}
