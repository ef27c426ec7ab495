use serde::{Deserialize, Serialize};
use yardcheck_type::span::Span;

/// The expression forms the bundled inference understands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
  /// `'string'`, `100`, `:sym`
  Literal { type_name: String },
  Nil,
  /// `Foo.new`
  New { class: String },
  /// A constant reference such as `Foo`.
  Const { name: String },
  /// `self`
  SelfRef,
  /// `recv.method(args)`, or `method(args)` without a receiver.
  Call {
    #[serde(default)]
    receiver: Option<Box<Expr>>,
    method: String,
    #[serde(default)]
    args: Vec<Expr>,
  },
  /// A value whose type the producer already knows, as annotation text.
  Typed { annotation: String },
  Unknown,
}

impl Expr {
  pub fn literal(type_name: impl Into<String>) -> Self {
    Expr::Literal {
      type_name: type_name.into(),
    }
  }

  pub fn string() -> Self {
    Self::literal("String")
  }

  pub fn integer() -> Self {
    Self::literal("Integer")
  }

  pub fn new_instance(class: impl Into<String>) -> Self {
    Expr::New { class: class.into() }
  }

  pub fn constant(name: impl Into<String>) -> Self {
    Expr::Const { name: name.into() }
  }

  /// A receiverless call such as `unknown_method`.
  pub fn send(method: impl Into<String>) -> Self {
    Expr::Call {
      receiver: None,
      method: method.into(),
      args: Vec::new(),
    }
  }

  pub fn call(
    receiver: Expr,
    method: impl Into<String>,
  ) -> Self {
    Expr::Call {
      receiver: Some(Box::new(receiver)),
      method: method.into(),
      args: Vec::new(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordArg {
  pub name: String,
  pub value: Expr,
}

/// `recv.method(args, key: value)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSite {
  #[serde(default)]
  pub receiver: Option<Expr>,
  pub method: String,
  #[serde(default)]
  pub args: Vec<Expr>,
  #[serde(default)]
  pub kwargs: Vec<KeywordArg>,
  /// Namespace the call is written in.
  #[serde(default)]
  pub namespace: Option<String>,
  #[serde(default)]
  pub span: Span,
}

impl CallSite {
  pub fn new(
    receiver: Option<Expr>,
    method: impl Into<String>,
  ) -> Self {
    Self {
      receiver,
      method: method.into(),
      args: Vec::new(),
      kwargs: Vec::new(),
      namespace: None,
      span: Span::default(),
    }
  }

  /// `Class.new.method`
  pub fn on_instance(
    class: &str,
    method: impl Into<String>,
  ) -> Self {
    Self::new(Some(Expr::new_instance(class)), method)
  }

  pub fn arg(
    mut self,
    arg: Expr,
  ) -> Self {
    self.args.push(arg);
    self
  }

  pub fn kwarg(
    mut self,
    name: impl Into<String>,
    value: Expr,
  ) -> Self {
    self.kwargs.push(KeywordArg {
      name: name.into(),
      value,
    });
    self
  }

  pub fn at(
    mut self,
    span: Span,
  ) -> Self {
    self.span = span;
    self
  }
}

/// `# @type [Integer]` followed by `x = value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedAssignment {
  pub name: String,
  pub annotation: String,
  pub value: Expr,
  #[serde(default)]
  pub namespace: Option<String>,
  #[serde(default)]
  pub span: Span,
}

impl TypedAssignment {
  pub fn new(
    name: impl Into<String>,
    annotation: impl Into<String>,
    value: Expr,
  ) -> Self {
    Self {
      name: name.into(),
      annotation: annotation.into(),
      value,
      namespace: None,
      span: Span::default(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn expressions_use_a_kind_tag_in_json() {
    let expr: Expr = serde_json::from_str(
      r#"{ "kind": "call", "receiver": { "kind": "new", "class": "Foo" }, "method": "bar" }"#,
    )
    .unwrap();

    assert_eq!(expr, Expr::call(Expr::new_instance("Foo"), "bar"));
  }

  #[test]
  fn call_sites_default_their_arguments() {
    let call: CallSite = serde_json::from_str(r#"{ "method": "unknown_method" }"#).unwrap();
    assert!(call.receiver.is_none());
    assert!(call.args.is_empty());
    assert!(call.kwargs.is_empty());
  }
}
