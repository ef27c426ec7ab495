use std::fmt;

/// Names that never need to be present in a type index.
pub const BUILTIN_NAMES: &[&str] = &[
  "void",
  "undefined",
  "nil",
  "NilClass",
  "self",
  "Boolean",
  "true",
  "false",
  "TrueClass",
  "FalseClass",
  "Object",
  "BasicObject",
  "Class",
  "Module",
];

/// How the generic parameters of a [`SimpleType`] were written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamShape {
  /// `Array<String>`
  List,
  /// `Hash{Symbol => String}`
  KeyValue,
  /// `Array(String, Integer)`
  Fixed,
}

/// One alternative of an annotation, e.g. `Array<String>` or `#call`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SimpleType {
  pub name: String,
  pub params: Vec<ComplexType>,
  pub shape: ParamShape,
  pub nilable: bool,
}

impl SimpleType {
  pub fn named(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      params: Vec::new(),
      shape: ParamShape::List,
      nilable: false,
    }
  }

  pub fn nil() -> Self {
    Self::named("nil")
  }

  pub fn with_params(
    mut self,
    shape: ParamShape,
    params: Vec<ComplexType>,
  ) -> Self {
    self.shape = shape;
    self.params = params;
    self
  }

  pub fn nilable(mut self) -> Self {
    self.nilable = true;
    self
  }

  /// Duck types are capabilities such as `#call`.
  pub fn is_duck(&self) -> bool {
    self.name.starts_with('#') && self.name.len() > 1
  }

  /// The method a duck type requires, without the leading `#`.
  pub fn duck_method(&self) -> Option<&str> {
    if self.is_duck() {
      Some(&self.name[1..])
    } else {
      None
    }
  }

  pub fn is_nil(&self) -> bool {
    matches!(self.name.as_str(), "nil" | "NilClass")
  }

  pub fn is_builtin(&self) -> bool {
    BUILTIN_NAMES.contains(&self.name.as_str())
  }

  /// Every name this type mentions, outer name first.
  pub fn names(&self) -> Vec<&str> {
    let mut names = vec![self.name.as_str()];
    for param in &self.params {
      names.extend(param.names());
    }
    names
  }

  fn replace_self(
    &self,
    concrete: &str,
  ) -> SimpleType {
    let name = if self.name == "self" {
      concrete.to_string()
    } else {
      self.name.clone()
    };

    SimpleType {
      name,
      params: self.params.iter().map(|p| p.replace_self(concrete)).collect(),
      shape: self.shape,
      nilable: self.nilable,
    }
  }
}

impl fmt::Display for SimpleType {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    write!(f, "{}", self.name)?;

    if !self.params.is_empty() {
      let rendered: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
      match self.shape {
        ParamShape::List => write!(f, "<{}>", rendered.join(", "))?,
        ParamShape::KeyValue => write!(f, "{{{}}}", rendered.join(" => "))?,
        ParamShape::Fixed => write!(f, "({})", rendered.join(", "))?,
      }
    }

    if self.nilable {
      write!(f, "?")?;
    }

    Ok(())
  }
}

/// A parsed annotation.
///
/// `Absent` means nothing was written and is never checked. `Void` means the
/// value is deliberately ignored. A `Union` always holds at least one
/// alternative; their order only matters for display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComplexType {
  Absent,
  Void,
  Union(Vec<SimpleType>),
}

impl ComplexType {
  pub fn single(ty: SimpleType) -> Self {
    ComplexType::Union(vec![ty])
  }

  pub fn named(name: impl Into<String>) -> Self {
    Self::single(SimpleType::named(name))
  }

  /// Builds a union, collapsing an empty list into `Absent`.
  pub fn union(items: Vec<SimpleType>) -> Self {
    if items.is_empty() {
      ComplexType::Absent
    } else {
      ComplexType::Union(items)
    }
  }

  pub fn nil() -> Self {
    Self::single(SimpleType::nil())
  }

  pub fn is_absent(&self) -> bool {
    matches!(self, ComplexType::Absent)
  }

  pub fn is_void(&self) -> bool {
    matches!(self, ComplexType::Void)
  }

  /// Absent and void annotations never produce a mismatch.
  pub fn is_unchecked(&self) -> bool {
    self.is_absent() || self.is_void()
  }

  pub fn items(&self) -> &[SimpleType] {
    match self {
      ComplexType::Union(items) => items,
      ComplexType::Absent | ComplexType::Void => &[],
    }
  }

  pub fn names(&self) -> Vec<&str> {
    self.items().iter().flat_map(|item| item.names()).collect()
  }

  /// Joins two types, keeping the first occurrence of each alternative.
  pub fn merge(
    &self,
    other: &ComplexType,
  ) -> ComplexType {
    match (self, other) {
      (ComplexType::Absent, _) => other.clone(),
      (_, ComplexType::Absent) => self.clone(),
      (ComplexType::Void, _) | (_, ComplexType::Void) => ComplexType::Void,
      (ComplexType::Union(left), ComplexType::Union(right)) => {
        let mut items = left.clone();
        for item in right {
          if !items.contains(item) {
            items.push(item.clone());
          }
        }
        ComplexType::Union(items)
      },
    }
  }

  /// Substitutes `self` with the enclosing namespace.
  pub fn replace_self(
    &self,
    concrete: &str,
  ) -> ComplexType {
    match self {
      ComplexType::Union(items) => ComplexType::Union(items.iter().map(|i| i.replace_self(concrete)).collect()),
      other => other.clone(),
    }
  }
}

impl fmt::Display for ComplexType {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      ComplexType::Absent => write!(f, "undefined"),
      ComplexType::Void => write!(f, "void"),
      ComplexType::Union(items) => {
        let rendered: Vec<String> = items.iter().map(|i| i.to_string()).collect();
        write!(f, "{}", rendered.join(", "))
      },
    }
  }
}

/// What inference produced for an expression or a method body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferredType {
  /// Inference gave up. Never reported.
  Undetermined,
  Known(ComplexType),
}

impl InferredType {
  /// Absent and void results carry no information and become `Undetermined`.
  pub fn known(ty: ComplexType) -> Self {
    if ty.is_unchecked() {
      InferredType::Undetermined
    } else {
      InferredType::Known(ty)
    }
  }

  pub fn named(name: impl Into<String>) -> Self {
    InferredType::Known(ComplexType::named(name))
  }

  pub fn is_undetermined(&self) -> bool {
    matches!(self, InferredType::Undetermined)
  }

  pub fn as_known(&self) -> Option<&ComplexType> {
    match self {
      InferredType::Known(ty) => Some(ty),
      InferredType::Undetermined => None,
    }
  }

  /// Union of two inferences; any undetermined branch makes the whole undetermined.
  pub fn join(
    &self,
    other: &InferredType,
  ) -> InferredType {
    match (self, other) {
      (InferredType::Known(a), InferredType::Known(b)) => InferredType::Known(a.merge(b)),
      _ => InferredType::Undetermined,
    }
  }
}

impl fmt::Display for InferredType {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    match self {
      InferredType::Undetermined => write!(f, "undefined"),
      InferredType::Known(ty) => write!(f, "{}", ty),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn display_renders_each_param_shape() {
    let list = SimpleType::named("Array").with_params(ParamShape::List, vec![ComplexType::named("String")]);
    let hash = SimpleType::named("Hash").with_params(
      ParamShape::KeyValue,
      vec![ComplexType::named("Symbol"), ComplexType::named("Integer")],
    );
    let fixed = SimpleType::named("Array").with_params(
      ParamShape::Fixed,
      vec![ComplexType::named("String"), ComplexType::named("Integer")],
    );

    assert_eq!(list.to_string(), "Array<String>");
    assert_eq!(hash.to_string(), "Hash{Symbol => Integer}");
    assert_eq!(fixed.to_string(), "Array(String, Integer)");
    assert_eq!(SimpleType::named("String").nilable().to_string(), "String?");
  }

  #[test]
  fn merge_keeps_first_occurrence() {
    let a = ComplexType::union(vec![SimpleType::named("String"), SimpleType::named("Integer")]);
    let b = ComplexType::union(vec![SimpleType::named("Integer"), SimpleType::nil()]);

    assert_eq!(a.merge(&b).to_string(), "String, Integer, nil");
    assert_eq!(ComplexType::Absent.merge(&b), b);
  }

  #[test]
  fn unchecked_inference_is_undetermined() {
    assert!(InferredType::known(ComplexType::Void).is_undetermined());
    assert!(InferredType::known(ComplexType::Absent).is_undetermined());
    assert!(!InferredType::named("String").is_undetermined());
  }

  #[test]
  fn join_with_undetermined_is_undetermined() {
    let known = InferredType::named("String");
    assert!(known.join(&InferredType::Undetermined).is_undetermined());
    assert_eq!(known.join(&InferredType::named("Integer")).to_string(), "String, Integer");
  }

  #[test]
  fn replace_self_reaches_params() {
    let ty = ComplexType::single(SimpleType::named("Array").with_params(ParamShape::List, vec![ComplexType::named("self")]));
    assert_eq!(ty.replace_self("Foo").to_string(), "Array<Foo>");
  }
}
