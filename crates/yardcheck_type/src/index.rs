use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodScope {
  #[default]
  Instance,
  Class,
}

/// Which annotation of a member an inherited lookup is after.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationSelector<'a> {
  Return,
  Param(&'a str),
}

/// Read-only view of the known namespaces and their members.
///
/// Implementations must not change while a checking run holds them.
pub trait TypeIndex {
  fn contains(
    &self,
    name: &str,
  ) -> bool;

  fn superclass_of(
    &self,
    name: &str,
  ) -> Option<&str>;

  /// Included mixins, in inclusion order.
  fn mixins_of(
    &self,
    name: &str,
  ) -> Vec<&str>;

  fn type_names(&self) -> Vec<&str>;

  fn declares_member(
    &self,
    owner: &str,
    member: &str,
    scope: MethodScope,
  ) -> bool;

  /// The annotation text `owner` itself writes for `member`, if any.
  fn member_annotation(
    &self,
    owner: &str,
    member: &str,
    scope: MethodScope,
    selector: AnnotationSelector<'_>,
  ) -> Option<&str>;

  /// Direct ancestors: the superclass, then mixins in inclusion order.
  fn ancestors_of(
    &self,
    name: &str,
  ) -> Vec<&str> {
    let mut ancestors: Vec<&str> = self.superclass_of(name).into_iter().collect();
    ancestors.extend(self.mixins_of(name));
    ancestors
  }
}
