use std::collections::{HashMap, HashSet};

use yardcheck_config::{CheckerConfig, DebugTrace};
use yardcheck_log::trace_dbg;
use yardcheck_type::{
  compat::Ancestry,
  index::{AnnotationSelector, MethodScope, TypeIndex},
};

/// Precomputed lineages of every indexed type.
///
/// A lineage is the type itself, its superclass chain nearest first, then the
/// lineage of every mixin included along that chain, depth-first in inclusion
/// order. Duplicates keep their first position.
pub struct Hierarchy<'a> {
  index: &'a dyn TypeIndex,
  lineages: HashMap<String, Vec<String>>,
}

impl<'a> Hierarchy<'a> {
  pub fn build(
    index: &'a dyn TypeIndex,
    config: &CheckerConfig,
  ) -> Self {
    let mut hierarchy = Self {
      index,
      lineages: HashMap::new(),
    };

    let mut visiting = HashSet::new();
    for name in index.type_names() {
      let (lineage, _) = hierarchy.compute(name, &mut visiting);
      trace_dbg!(config, DebugTrace::Hierarchy, "lineage of {}: {:?}", name, lineage);
    }

    hierarchy
  }

  /// Lineage of `name`, and whether no include cycle cut it short.
  fn compute(
    &mut self,
    name: &str,
    visiting: &mut HashSet<String>,
  ) -> (Vec<String>, bool) {
    if let Some(lineage) = self.lineages.get(name) {
      return (lineage.clone(), true);
    }

    if !self.index.contains(name) {
      return (Vec::new(), true);
    }

    // Already on the walk: the caller holds this part of the cycle.
    if !visiting.insert(name.to_string()) {
      return (Vec::new(), false);
    }

    let mut chain = vec![name.to_string()];
    let mut current = self.index.superclass_of(name);
    while let Some(next) = current {
      if chain.iter().any(|seen| seen == next) {
        break;
      }
      chain.push(next.to_string());
      current = self.index.superclass_of(next);
    }

    let index = self.index;
    let mut lineage = chain.clone();
    let mut complete = true;
    for owner in &chain {
      for mixin in index.mixins_of(owner) {
        let (ancestors, done) = self.compute(mixin, visiting);
        complete &= done;
        for ancestor in ancestors {
          if !lineage.contains(&ancestor) {
            lineage.push(ancestor);
          }
        }
      }
    }

    visiting.remove(name);

    // A cut lineage is only final for the type the walk started from.
    if complete || visiting.is_empty() {
      self.lineages.insert(name.to_string(), lineage.clone());
    }
    (lineage, complete)
  }

  /// First annotation found walking the lineage of `type_name`.
  ///
  /// With `skip_self` the type's own declaration is not consulted. Returns
  /// the declaring ancestor together with the annotation text.
  pub fn nearest_annotation(
    &self,
    type_name: &str,
    member: &str,
    scope: MethodScope,
    selector: AnnotationSelector<'_>,
    skip_self: bool,
  ) -> Option<(&str, &'a str)> {
    let index = self.index;
    self
      .lineage(type_name)
      .iter()
      .skip(usize::from(skip_self))
      .find_map(|owner| {
        index
          .member_annotation(owner, member, scope, selector)
          .map(|text| (owner.as_str(), text))
      })
  }

  pub fn type_names(&self) -> Vec<&str> {
    let mut names: Vec<&str> = self.lineages.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
  }
}

impl Ancestry for Hierarchy<'_> {
  fn knows(
    &self,
    name: &str,
  ) -> bool {
    self.lineages.contains_key(name)
  }

  fn lineage(
    &self,
    name: &str,
  ) -> &[String] {
    self.lineages.get(name).map(Vec::as_slice).unwrap_or(&[])
  }

  fn responds_to(
    &self,
    name: &str,
    method: &str,
  ) -> Option<bool> {
    if !self.knows(name) {
      return None;
    }

    Some(
      self
        .lineage(name)
        .iter()
        .any(|owner| self.index.declares_member(owner, method, MethodScope::Instance)),
    )
  }
}

#[cfg(test)]
mod tests {
  use yardcheck_model::{MethodDecl, SnapshotBuilder, TypeDecl};

  use super::*;

  #[test]
  fn superclasses_come_before_mixins() {
    let snapshot = SnapshotBuilder::new()
      .module("Walks")
      .module("Swims")
      .ty(TypeDecl::class("Animal").includes("Walks"))
      .ty(TypeDecl::class("Duck").inherits("Animal").includes("Swims"))
      .build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    assert_eq!(
      hierarchy.lineage("Duck"),
      ["Duck", "Animal", "Object", "BasicObject", "Swims", "Walks", "Kernel"]
    );
  }

  #[test]
  fn mixins_contribute_their_own_mixins_depth_first() {
    let snapshot = SnapshotBuilder::new()
      .module("Inner")
      .ty(TypeDecl::module("Outer").includes("Inner"))
      .module("Other")
      .ty(TypeDecl::class("Thing").includes("Outer").includes("Other"))
      .build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    assert_eq!(
      hierarchy.lineage("Thing"),
      ["Thing", "Object", "BasicObject", "Outer", "Inner", "Other", "Kernel"]
    );
  }

  #[test]
  fn include_cycle_members_see_each_other() {
    let snapshot = SnapshotBuilder::new()
      .ty(TypeDecl::module("A").includes("B"))
      .ty(TypeDecl::module("B").includes("A"))
      .build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    assert_eq!(hierarchy.lineage("A"), ["A", "B"]);
    assert_eq!(hierarchy.lineage("B"), ["B", "A"]);
  }

  #[test]
  fn unknown_names_have_no_lineage() {
    let snapshot = SnapshotBuilder::new().build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    assert!(hierarchy.lineage("Nokogiri::HTML::Document").is_empty());
    assert_eq!(hierarchy.responds_to("Nokogiri::HTML::Document", "css"), None);
  }

  #[test]
  fn nearest_annotation_prefers_superclass_over_mixin() {
    let snapshot = SnapshotBuilder::new()
      .module("Mixin")
      .class("Sup")
      .ty(TypeDecl::class("Sub").inherits("Sup").includes("Mixin"))
      .method(MethodDecl::instance("Mixin", "foo").returns("Integer"))
      .method(MethodDecl::instance("Sup", "foo").returns("String"))
      .method(MethodDecl::instance("Sub", "foo"))
      .build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    let found = hierarchy.nearest_annotation("Sub", "foo", MethodScope::Instance, AnnotationSelector::Return, true);
    assert_eq!(found, Some(("Sup", "String")));
  }

  #[test]
  fn responds_to_walks_the_lineage() {
    let snapshot = SnapshotBuilder::new()
      .class("Callable")
      .ty(TypeDecl::class("Handler").inherits("Callable"))
      .method(MethodDecl::instance("Callable", "call"))
      .build();
    let hierarchy = Hierarchy::build(&snapshot, &CheckerConfig::quiet());

    assert_eq!(hierarchy.responds_to("Handler", "call"), Some(true));
    assert_eq!(hierarchy.responds_to("Handler", "each"), Some(false));
  }
}
