use serde::{Deserialize, Serialize};
use yardcheck_type::{index::MethodScope, span::Span};

use crate::expr::Expr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamespaceKind {
  #[default]
  Class,
  Module,
}

/// A class or module together with what it inherits from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeDecl {
  pub name: String,
  #[serde(default)]
  pub kind: NamespaceKind,
  #[serde(default)]
  pub superclass: Option<String>,
  #[serde(default)]
  pub includes: Vec<String>,
  #[serde(default)]
  pub span: Span,
}

impl TypeDecl {
  pub fn class(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      kind: NamespaceKind::Class,
      superclass: None,
      includes: Vec::new(),
      span: Span::default(),
    }
  }

  pub fn module(name: impl Into<String>) -> Self {
    Self {
      kind: NamespaceKind::Module,
      ..Self::class(name)
    }
  }

  pub fn inherits(
    mut self,
    superclass: impl Into<String>,
  ) -> Self {
    self.superclass = Some(superclass.into());
    self
  }

  pub fn includes(
    mut self,
    mixin: impl Into<String>,
  ) -> Self {
    self.includes.push(mixin.into());
    self
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
  /// `a`
  Required,
  /// `a = 1`
  Optional,
  /// `*args`
  Rest,
  /// `a:`
  Keyword,
  /// `a: 1`
  OptionalKeyword,
  /// `**opts`
  DoubleRest,
  /// `&block`
  Block,
}

impl ParameterKind {
  pub fn is_positional(self) -> bool {
    matches!(self, ParameterKind::Required | ParameterKind::Optional)
  }

  pub fn is_keyword(self) -> bool {
    matches!(self, ParameterKind::Keyword | ParameterKind::OptionalKeyword)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDecl {
  pub name: String,
  pub kind: ParameterKind,
}

impl ParamDecl {
  pub fn new(
    name: impl Into<String>,
    kind: ParameterKind,
  ) -> Self {
    Self {
      name: name.into(),
      kind,
    }
  }

  pub fn required(name: impl Into<String>) -> Self {
    Self::new(name, ParameterKind::Required)
  }

  pub fn optional(name: impl Into<String>) -> Self {
    Self::new(name, ParameterKind::Optional)
  }

  pub fn keyword(name: impl Into<String>) -> Self {
    Self::new(name, ParameterKind::Keyword)
  }

  pub fn optional_keyword(name: impl Into<String>) -> Self {
    Self::new(name, ParameterKind::OptionalKeyword)
  }
}

/// `@param name [text]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamTag {
  pub name: String,
  pub text: String,
}

fn empty_params() -> Option<Vec<ParamDecl>> {
  Some(Vec::new())
}

/// A method definition with its documentation tags.
///
/// `body` lists the expressions the method can return. `params` is `None`
/// only when the producer could not build a parameter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodDecl {
  #[serde(default)]
  pub owner: Option<String>,
  pub name: String,
  #[serde(default)]
  pub scope: MethodScope,
  #[serde(default = "empty_params")]
  pub params: Option<Vec<ParamDecl>>,
  #[serde(default)]
  pub param_tags: Vec<ParamTag>,
  #[serde(default)]
  pub return_tag: Option<String>,
  #[serde(default)]
  pub body: Vec<Expr>,
  #[serde(default)]
  pub span: Span,
}

impl MethodDecl {
  pub fn new(
    owner: Option<&str>,
    name: impl Into<String>,
  ) -> Self {
    Self {
      owner: owner.map(str::to_string),
      name: name.into(),
      scope: MethodScope::Instance,
      params: Some(Vec::new()),
      param_tags: Vec::new(),
      return_tag: None,
      body: Vec::new(),
      span: Span::default(),
    }
  }

  pub fn instance(
    owner: &str,
    name: impl Into<String>,
  ) -> Self {
    Self::new(Some(owner), name)
  }

  pub fn singleton(
    owner: &str,
    name: impl Into<String>,
  ) -> Self {
    Self {
      scope: MethodScope::Class,
      ..Self::new(Some(owner), name)
    }
  }

  pub fn returns(
    mut self,
    text: impl Into<String>,
  ) -> Self {
    self.return_tag = Some(text.into());
    self
  }

  pub fn param(
    mut self,
    param: ParamDecl,
  ) -> Self {
    self.params.get_or_insert_with(Vec::new).push(param);
    self
  }

  pub fn tag(
    mut self,
    name: impl Into<String>,
    text: impl Into<String>,
  ) -> Self {
    self.param_tags.push(ParamTag {
      name: name.into(),
      text: text.into(),
    });
    self
  }

  pub fn body(
    mut self,
    body: Vec<Expr>,
  ) -> Self {
    self.body = body;
    self
  }

  pub fn without_signature(mut self) -> Self {
    self.params = None;
    self
  }

  pub fn at(
    mut self,
    span: Span,
  ) -> Self {
    self.span = span;
    self
  }

  /// The tag text this method itself writes for `param`.
  pub fn param_tag(
    &self,
    param: &str,
  ) -> Option<&str> {
    self
      .param_tags
      .iter()
      .find(|tag| tag.name == param)
      .map(|tag| tag.text.as_str())
      .filter(|text| !text.trim().is_empty())
  }

  pub fn own_return_tag(&self) -> Option<&str> {
    self.return_tag.as_deref().filter(|text| !text.trim().is_empty())
  }

  /// `Foo#bar`, `Foo.bar` or `bar` for top-level methods.
  pub fn path(&self) -> String {
    match (&self.owner, self.scope) {
      (Some(owner), MethodScope::Instance) => format!("{}#{}", owner, self.name),
      (Some(owner), MethodScope::Class) => format!("{}.{}", owner, self.name),
      (None, _) => self.name.clone(),
    }
  }
}
