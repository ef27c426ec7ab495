use crate::types::{ComplexType, InferredType, SimpleType};

/// Subtype knowledge needed to compare an inferred type with an annotation.
pub trait Ancestry {
  fn knows(
    &self,
    name: &str,
  ) -> bool;

  /// `name` followed by its ancestors in lookup order. Empty when unknown.
  fn lineage(
    &self,
    name: &str,
  ) -> &[String];

  /// Whether instances of `name` respond to `method`; `None` when `name` is unknown.
  fn responds_to(
    &self,
    name: &str,
    method: &str,
  ) -> Option<bool>;
}

/// `true` unless `actual` is known and no alternative of it satisfies any
/// alternative of `declared`.
pub fn is_compatible(
  declared: &ComplexType,
  actual: &InferredType,
  ancestry: &dyn Ancestry,
) -> bool {
  let InferredType::Known(actual) = actual else {
    return true;
  };

  if declared.is_unchecked() || actual.is_unchecked() {
    return true;
  }

  declared
    .items()
    .iter()
    .any(|d| actual.items().iter().any(|a| satisfies(d, a, ancestry)))
}

pub fn satisfies(
  declared: &SimpleType,
  actual: &SimpleType,
  ancestry: &dyn Ancestry,
) -> bool {
  if matches!(declared.name.as_str(), "Object" | "BasicObject" | "undefined") {
    return true;
  }

  if actual.name == "undefined" || actual.is_duck() {
    return true;
  }

  if actual.is_nil() {
    return declared.nilable || declared.is_nil();
  }

  if declared.is_nil() {
    return false;
  }

  if let Some(method) = declared.duck_method() {
    return ancestry.responds_to(&actual.name, method).unwrap_or(true);
  }

  let actual_name = match actual.name.as_str() {
    "true" => "TrueClass",
    "false" => "FalseClass",
    other => other,
  };

  if declared.name == "Boolean" {
    return matches!(actual_name, "TrueClass" | "FalseClass" | "Boolean");
  }

  if declared.name == actual_name {
    return true;
  }

  if !ancestry.knows(actual_name) {
    return true;
  }

  ancestry.lineage(actual_name).iter().any(|ancestor| ancestor == &declared.name)
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;
  use crate::annotation::parse;

  struct Chains {
    lineages: HashMap<String, Vec<String>>,
    methods: HashMap<String, Vec<String>>,
  }

  impl Chains {
    fn new() -> Self {
      let mut lineages = HashMap::new();
      for chain in [
        vec!["Integer", "Numeric", "Comparable", "Object"],
        vec!["String", "Comparable", "Object"],
        vec!["Proc", "Object"],
        vec!["Widget", "Object"],
      ] {
        lineages.insert(chain[0].to_string(), chain.iter().map(|s| s.to_string()).collect());
      }

      let mut methods = HashMap::new();
      methods.insert("Proc".to_string(), vec!["call".to_string()]);

      Self { lineages, methods }
    }
  }

  impl Ancestry for Chains {
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
      self.lineages.get(name).map(|l| l.as_slice()).unwrap_or(&[])
    }

    fn responds_to(
      &self,
      name: &str,
      method: &str,
    ) -> Option<bool> {
      if !self.knows(name) {
        return None;
      }
      Some(self.methods.get(name).is_some_and(|m| m.iter().any(|x| x == method)))
    }
  }

  fn known(text: &str) -> InferredType {
    InferredType::Known(parse(text))
  }

  #[test]
  fn undetermined_always_passes() {
    assert!(is_compatible(&parse("Integer"), &InferredType::Undetermined, &Chains::new()));
  }

  #[test]
  fn absent_and_void_always_pass() {
    let chains = Chains::new();
    assert!(is_compatible(&ComplexType::Absent, &known("String"), &chains));
    assert!(is_compatible(&ComplexType::Void, &known("String"), &chains));
  }

  #[test]
  fn exact_and_ancestor_names_pass() {
    let chains = Chains::new();
    assert!(is_compatible(&parse("Integer"), &known("Integer"), &chains));
    assert!(is_compatible(&parse("Numeric"), &known("Integer"), &chains));
    assert!(is_compatible(&parse("Comparable"), &known("String"), &chains));
    assert!(!is_compatible(&parse("Integer"), &known("String"), &chains));
  }

  #[test]
  fn matching_is_existential_on_both_sides() {
    let chains = Chains::new();
    assert!(is_compatible(&parse("String, Integer"), &known("Integer"), &chains));
    assert!(is_compatible(&parse("Integer"), &known("String, Integer"), &chains));
    assert!(!is_compatible(&parse("String, Integer"), &known("Widget"), &chains));
  }

  #[test]
  fn nil_needs_a_nilable_declaration() {
    let chains = Chains::new();
    assert!(!is_compatible(&parse("String"), &known("nil"), &chains));
    assert!(is_compatible(&parse("String?"), &known("nil"), &chains));
    assert!(is_compatible(&parse("String, nil"), &known("nil"), &chains));
  }

  #[test]
  fn duck_types_are_structural() {
    let chains = Chains::new();
    assert!(is_compatible(&parse("#call"), &known("Proc"), &chains));
    assert!(!is_compatible(&parse("#call"), &known("Integer"), &chains));
    assert!(is_compatible(&parse("#call"), &known("Unindexed"), &chains));
  }

  #[test]
  fn unknown_actual_names_stay_silent() {
    assert!(is_compatible(&parse("Integer"), &known("Nokogiri::XML::Node"), &Chains::new()));
  }

  #[test]
  fn boolean_accepts_true_and_false() {
    let chains = Chains::new();
    assert!(is_compatible(&parse("Boolean"), &known("TrueClass"), &chains));
    assert!(is_compatible(&parse("Boolean"), &known("false"), &chains));
    assert!(!is_compatible(&parse("Boolean"), &known("String"), &chains));
  }
}
