//! Annotation text to [`ComplexType`].
//!
//! Accepted forms, all of which can be combined:
//! - unions: `String, Integer` or `String | Integer`
//! - generics: `Array<String>`, `Hash{Symbol => String}`, `Array(String, Integer)`
//! - nilable names: `String?`, or a `nil` alternative
//! - duck types: `#call`
//!
//! Text that does not fit the grammar is kept whole as a single name so the
//! resolver reports it instead of the checker crashing on it.

use crate::types::{ComplexType, ParamShape, SimpleType};

#[derive(Debug, Clone, PartialEq, Eq)]
enum AnnotationError {
  Expected(&'static str, usize),
  Unexpected(char, usize),
}

type ParseResult<T> = Result<T, AnnotationError>;

pub fn parse(text: &str) -> ComplexType {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return ComplexType::Absent;
  }

  let mut parser = AnnotationParser::new(trimmed);
  match parser.parse_annotation() {
    Ok(items) if items.len() == 1 && items[0].name == "void" && items[0].params.is_empty() => ComplexType::Void,
    Ok(items) => ComplexType::union(items),
    Err(_) => ComplexType::single(SimpleType::named(trimmed)),
  }
}

/// Parses every annotation of a tag such as `@param x [String, nil]`.
/// Multiple bracket groups are not a thing in practice; only the text
/// between the brackets reaches this function.
pub fn parse_all<'a>(texts: impl IntoIterator<Item = &'a str>) -> ComplexType {
  texts
    .into_iter()
    .map(parse)
    .fold(ComplexType::Absent, |acc, ty| acc.merge(&ty))
}

struct AnnotationParser {
  chars: Vec<char>,
  pos: usize,
}

impl AnnotationParser {
  fn new(source: &str) -> Self {
    Self {
      chars: source.chars().collect(),
      pos: 0,
    }
  }

  fn parse_annotation(&mut self) -> ParseResult<Vec<SimpleType>> {
    let items = self.parse_union(&[',', '|'])?;
    self.skip_whitespace();

    if let Some(c) = self.peek() {
      return Err(AnnotationError::Unexpected(c, self.pos));
    }

    Ok(items)
  }

  fn parse_union(
    &mut self,
    separators: &[char],
  ) -> ParseResult<Vec<SimpleType>> {
    let mut items = vec![self.parse_simple()?];

    loop {
      self.skip_whitespace();
      match self.peek() {
        Some(c) if separators.contains(&c) => {
          self.pos += 1;
          items.push(self.parse_simple()?);
        },
        _ => break,
      }
    }

    Ok(items)
  }

  fn parse_simple(&mut self) -> ParseResult<SimpleType> {
    self.skip_whitespace();

    let start = self.pos;
    while let Some(c) = self.peek() {
      if is_name_char(c) {
        self.pos += 1;
      } else {
        break;
      }
    }

    if start == self.pos {
      return Err(AnnotationError::Expected("type name", self.pos));
    }

    let name: String = self.chars[start..self.pos].iter().collect();
    let mut ty = SimpleType::named(name);

    self.skip_whitespace();
    match self.peek() {
      Some('<') => {
        self.pos += 1;
        let inner = self.parse_union(&[',', '|'])?;
        self.expect('>')?;
        ty = ty.with_params(ParamShape::List, vec![ComplexType::union(inner)]);
      },
      Some('{') => {
        self.pos += 1;
        let key = self.parse_union(&[',', '|'])?;
        self.expect_arrow()?;
        let value = self.parse_union(&[',', '|'])?;
        self.expect('}')?;
        ty = ty.with_params(ParamShape::KeyValue, vec![ComplexType::union(key), ComplexType::union(value)]);
      },
      Some('(') => {
        self.pos += 1;
        let mut elements = vec![ComplexType::union(self.parse_union(&['|'])?)];
        loop {
          self.skip_whitespace();
          if self.peek() == Some(',') {
            self.pos += 1;
            elements.push(ComplexType::union(self.parse_union(&['|'])?));
          } else {
            break;
          }
        }
        self.expect(')')?;
        ty = ty.with_params(ParamShape::Fixed, elements);
      },
      _ => {},
    }

    self.skip_whitespace();
    if self.peek() == Some('?') {
      self.pos += 1;
      ty = ty.nilable();
    }

    Ok(ty)
  }

  fn expect(
    &mut self,
    expected: char,
  ) -> ParseResult<()> {
    self.skip_whitespace();
    match self.peek() {
      Some(c) if c == expected => {
        self.pos += 1;
        Ok(())
      },
      Some(c) => Err(AnnotationError::Unexpected(c, self.pos)),
      None => Err(AnnotationError::Expected("closing bracket", self.pos)),
    }
  }

  fn expect_arrow(&mut self) -> ParseResult<()> {
    self.expect('=')?;
    match self.peek() {
      Some('>') => {
        self.pos += 1;
        Ok(())
      },
      _ => Err(AnnotationError::Expected("=>", self.pos)),
    }
  }

  fn peek(&self) -> Option<char> {
    self.chars.get(self.pos).copied()
  }

  fn skip_whitespace(&mut self) {
    while matches!(self.peek(), Some(c) if c.is_whitespace()) {
      self.pos += 1;
    }
  }
}

fn is_name_char(c: char) -> bool {
  c.is_alphanumeric() || c == '_' || c == ':' || c == '#'
}
