use crate::{
  index::TypeIndex,
  types::{ComplexType, SimpleType},
};

/// Outcome of looking every name of an annotation up in the index.
///
/// `Resolved(ComplexType::Absent)` is "no annotation" and is never reported;
/// `Unresolved` always is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
  Resolved(ComplexType),
  Unresolved {
    annotation: ComplexType,
    missing: Vec<String>,
  },
}

impl ResolvedType {
  pub fn is_unresolved(&self) -> bool {
    matches!(self, ResolvedType::Unresolved { .. })
  }

  pub fn is_absent(&self) -> bool {
    matches!(self, ResolvedType::Resolved(ComplexType::Absent))
  }

  pub fn resolved(&self) -> Option<&ComplexType> {
    match self {
      ResolvedType::Resolved(ty) => Some(ty),
      ResolvedType::Unresolved { .. } => None,
    }
  }
}

/// Where names are looked up.
pub struct ResolveScope<'a> {
  pub index: &'a dyn TypeIndex,
  /// Enclosing namespace used for relative names, e.g. `Outer` for `Inner`.
  pub namespace: Option<&'a str>,
  /// Extra names treated as always present.
  pub builtins: &'a [String],
}

impl<'a> ResolveScope<'a> {
  pub fn new(index: &'a dyn TypeIndex) -> Self {
    Self {
      index,
      namespace: None,
      builtins: &[],
    }
  }

  pub fn with_namespace(
    mut self,
    namespace: Option<&'a str>,
  ) -> Self {
    self.namespace = namespace;
    self
  }

  pub fn with_builtins(
    mut self,
    builtins: &'a [String],
  ) -> Self {
    self.builtins = builtins;
    self
  }

  /// Fully qualified name of `name` as seen from the namespace, or `None`.
  pub fn qualify(
    &self,
    name: &str,
  ) -> Option<String> {
    let bare = name.trim_start_matches("::");
    if self.index.contains(bare) {
      return Some(bare.to_string());
    }

    if name.starts_with("::") {
      return None;
    }

    let mut namespace = self.namespace;
    while let Some(ns) = namespace {
      let candidate = format!("{}::{}", ns, bare);
      if self.index.contains(&candidate) {
        return Some(candidate);
      }
      namespace = ns.rfind("::").map(|i| &ns[..i]);
    }

    None
  }

  fn is_known(
    &self,
    ty: &SimpleType,
  ) -> bool {
    ty.is_builtin() || ty.is_duck() || self.builtins.iter().any(|b| b == &ty.name) || self.qualify(&ty.name).is_some()
  }
}

pub fn resolve(
  ty: &ComplexType,
  index: &dyn TypeIndex,
) -> ResolvedType {
  resolve_in(ty, &ResolveScope::new(index))
}

/// Resolves every name, rewriting relative names to their qualified form.
pub fn resolve_in(
  ty: &ComplexType,
  scope: &ResolveScope<'_>,
) -> ResolvedType {
  let mut missing = Vec::new();
  let resolved = match ty {
    ComplexType::Union(items) => ComplexType::Union(items.iter().map(|i| qualify_simple(i, scope, &mut missing)).collect()),
    other => other.clone(),
  };

  if missing.is_empty() {
    ResolvedType::Resolved(resolved)
  } else {
    ResolvedType::Unresolved {
      annotation: ty.clone(),
      missing,
    }
  }
}

fn qualify_simple(
  ty: &SimpleType,
  scope: &ResolveScope<'_>,
  missing: &mut Vec<String>,
) -> SimpleType {
  let name = if scope.is_known(ty) {
    scope.qualify(&ty.name).unwrap_or_else(|| ty.name.clone())
  } else {
    if !missing.contains(&ty.name) {
      missing.push(ty.name.clone());
    }
    ty.name.clone()
  };

  let params = ty
    .params
    .iter()
    .map(|param| match param {
      ComplexType::Union(items) => ComplexType::Union(items.iter().map(|i| qualify_simple(i, scope, missing)).collect()),
      other => other.clone(),
    })
    .collect();

  SimpleType {
    name,
    params,
    shape: ty.shape,
    nilable: ty.nilable,
  }
}
