//! Formal parameters of one method and how a call's arguments bind to them.

use std::fmt;

use yardcheck_model::{Expr, KeywordArg, MethodDecl, MethodId, ParamDecl, ParameterKind};
use yardcheck_type::{annotation::parse, types::ComplexType};

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
  pub name: String,
  pub kind: ParameterKind,
  /// Tag text as written, own or inherited.
  pub annotation: Option<String>,
  /// Parsed, not yet resolved, form of `annotation`.
  pub declared: ComplexType,
  /// Ancestor the tag was inherited from.
  pub inherited_from: Option<String>,
}

impl Parameter {
  pub fn is_typed(&self) -> bool {
    !self.declared.is_unchecked()
  }
}

impl fmt::Display for Parameter {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>,
  ) -> fmt::Result {
    let name = match self.kind {
      ParameterKind::Required => self.name.clone(),
      ParameterKind::Optional => format!("{} = ...", self.name),
      ParameterKind::Rest => format!("*{}", self.name),
      ParameterKind::Keyword => format!("{}:", self.name),
      ParameterKind::OptionalKeyword => format!("{}: ...", self.name),
      ParameterKind::DoubleRest => format!("**{}", self.name),
      ParameterKind::Block => format!("&{}", self.name),
    };

    match &self.annotation {
      Some(text) => write!(f, "{} [{}]", name, text),
      None => write!(f, "{}", name),
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
  pub method: MethodId,
  pub path: String,
  pub owner: Option<String>,
  pub params: Vec<Parameter>,
}

/// Result of matching call arguments to a signature.
#[derive(Debug, Default)]
pub struct Binding<'s, 'e> {
  pub pairs: Vec<(&'s Parameter, &'e Expr)>,
  pub missing_keywords: Vec<&'s Parameter>,
  /// Arguments nothing accepts, described for messages.
  pub unbound: Vec<String>,
}

impl Signature {
  /// Pairs every declared parameter with its tag; `tag_for` is asked by
  /// parameter name and answers `(text, inherited_from)`.
  pub fn build<'t>(
    method: MethodId,
    decl: &MethodDecl,
    params: &[ParamDecl],
    mut tag_for: impl FnMut(&str) -> Option<(&'t str, Option<String>)>,
  ) -> Self {
    let params = params
      .iter()
      .map(|param| {
        let tag = tag_for(&param.name);
        Parameter {
          name: param.name.clone(),
          kind: param.kind,
          declared: tag.as_ref().map(|(text, _)| parse(text)).unwrap_or(ComplexType::Absent),
          annotation: tag.as_ref().map(|(text, _)| text.to_string()),
          inherited_from: tag.and_then(|(_, owner)| owner),
        }
      })
      .collect();

    Self {
      method,
      path: decl.path(),
      owner: decl.owner.clone(),
      params,
    }
  }

  pub fn has_keywords(&self) -> bool {
    self
      .params
      .iter()
      .any(|p| p.kind.is_keyword() || p.kind == ParameterKind::DoubleRest)
  }

  /// Binds positional arguments in order (required first, then optional,
  /// then the rest parameter) and keyword arguments by name.
  ///
  /// Keyword arguments given to a method without keyword parameters form a
  /// single trailing hash argument.
  pub fn bind<'s, 'e>(
    &'s self,
    args: &'e [Expr],
    kwargs: &'e [KeywordArg],
  ) -> Binding<'s, 'e> {
    let mut binding = Binding::default();

    let implicit_hash = !kwargs.is_empty() && !self.has_keywords();
    let positional_count = args.len() + usize::from(implicit_hash);
    let mut positional = args.iter().map(Some).chain(implicit_hash.then_some(None));

    let required = self.params.iter().filter(|p| p.kind == ParameterKind::Required).count();
    let optional = self.params.iter().filter(|p| p.kind == ParameterKind::Optional).count();
    let spare = positional_count.saturating_sub(required);
    let mut optional_left = spare.min(optional);
    let rest_count = spare - optional_left;

    for param in &self.params {
      match param.kind {
        ParameterKind::Required => {
          if let Some(Some(arg)) = positional.next() {
            binding.pairs.push((param, arg));
          }
        },
        ParameterKind::Optional => {
          if optional_left > 0 {
            optional_left -= 1;
            if let Some(Some(arg)) = positional.next() {
              binding.pairs.push((param, arg));
            }
          }
        },
        ParameterKind::Rest => {
          for arg in positional.by_ref().take(rest_count).flatten() {
            binding.pairs.push((param, arg));
          }
        },
        _ => {},
      }
    }

    let leftover: Vec<Option<&Expr>> = positional.collect();
    let consumed = positional_count - leftover.len();
    for (offset, arg) in leftover.iter().enumerate() {
      match arg {
        Some(_) => binding.unbound.push(format!("argument {}", consumed + offset + 1)),
        None => binding.unbound.push("keyword arguments".to_string()),
      }
    }

    let double_rest = self.params.iter().find(|p| p.kind == ParameterKind::DoubleRest);
    if !implicit_hash {
      for kwarg in kwargs {
        let named = self.params.iter().find(|p| p.kind.is_keyword() && p.name == kwarg.name);
        match named.or(double_rest) {
          Some(param) => binding.pairs.push((param, &kwarg.value)),
          None => binding.unbound.push(format!("{}:", kwarg.name)),
        }
      }
    }

    for param in &self.params {
      if param.kind == ParameterKind::Keyword && !kwargs.iter().any(|k| k.name == param.name) {
        binding.missing_keywords.push(param);
      }
    }

    binding
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn signature(params: Vec<ParamDecl>) -> Signature {
    let mut decl = MethodDecl::instance("Foo", "bar");
    for param in params {
      decl = decl.param(param);
    }
    let params = decl.params.clone().unwrap_or_default();
    Signature::build(MethodId::new(0), &decl, &params, |name| {
      (name == "baz").then(|| ("Integer", None))
    })
  }

  fn names(binding: &Binding<'_, '_>) -> Vec<String> {
    binding.pairs.iter().map(|(p, _)| p.name.clone()).collect()
  }

  #[test]
  fn tags_are_matched_by_name() {
    let sig = signature(vec![ParamDecl::required("quz"), ParamDecl::required("baz")]);
    assert!(!sig.params[0].is_typed());
    assert_eq!(sig.params[1].declared, ComplexType::named("Integer"));
    assert_eq!(sig.params[1].to_string(), "baz [Integer]");
  }

  #[test]
  fn required_parameters_are_filled_before_optional_ones() {
    let sig = signature(vec![
      ParamDecl::required("a"),
      ParamDecl::optional("b"),
      ParamDecl::required("c"),
    ]);

    let two = [Expr::integer(), Expr::string()];
    assert_eq!(names(&sig.bind(&two, &[])), ["a", "c"]);

    let three = [Expr::integer(), Expr::string(), Expr::Nil];
    assert_eq!(names(&sig.bind(&three, &[])), ["a", "b", "c"]);
  }

  #[test]
  fn rest_absorbs_extra_positionals() {
    let sig = signature(vec![
      ParamDecl::required("a"),
      ParamDecl::new("rest", ParameterKind::Rest),
    ]);

    let args = [Expr::integer(), Expr::string(), Expr::Nil];
    let binding = sig.bind(&args, &[]);
    assert_eq!(names(&binding), ["a", "rest", "rest"]);
    assert!(binding.unbound.is_empty());
  }

  #[test]
  fn keywords_bind_by_name_and_report_missing_ones() {
    let sig = signature(vec![
      ParamDecl::keyword("baz"),
      ParamDecl::keyword("quz"),
      ParamDecl::optional_keyword("opt"),
    ]);

    let kwargs = [KeywordArg {
      name: "quz".to_string(),
      value: Expr::string(),
    }];
    let binding = sig.bind(&[], &kwargs);
    assert_eq!(names(&binding), ["quz"]);

    let missing: Vec<&str> = binding.missing_keywords.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(missing, ["baz"]);
  }

  #[test]
  fn unmatched_keywords_go_to_double_rest() {
    let sig = signature(vec![
      ParamDecl::optional_keyword("baz"),
      ParamDecl::new("options", ParameterKind::DoubleRest),
    ]);

    let kwargs = [KeywordArg {
      name: "other".to_string(),
      value: Expr::integer(),
    }];
    let binding = sig.bind(&[], &kwargs);
    assert_eq!(names(&binding), ["options"]);
    assert!(binding.unbound.is_empty());
  }

  #[test]
  fn overflow_is_recorded() {
    let sig = signature(vec![ParamDecl::required("a")]);

    let args = [Expr::integer(), Expr::string()];
    let kwargs = [KeywordArg {
      name: "x".to_string(),
      value: Expr::Nil,
    }];
    let binding = sig.bind(&args, &kwargs);
    assert_eq!(names(&binding), ["a"]);
    assert_eq!(binding.unbound, ["argument 2", "keyword arguments"]);
  }

  #[test]
  fn keywords_form_a_trailing_hash_without_keyword_parameters() {
    let sig = signature(vec![ParamDecl::required("a"), ParamDecl::optional("options")]);

    let args = [Expr::integer()];
    let kwargs = [KeywordArg {
      name: "x".to_string(),
      value: Expr::Nil,
    }];
    let binding = sig.bind(&args, &kwargs);
    assert_eq!(names(&binding), ["a"]);
    assert!(binding.unbound.is_empty());
  }
}
