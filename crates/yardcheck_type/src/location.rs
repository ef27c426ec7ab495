use crate::span::Span;

/// Identity of the declaration or expression a problem is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Anchor {
  Method(u32),
  Assignment(u32),
  Call(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Location {
  pub anchor: Anchor,
  pub span: Span,
}

impl Location {
  pub fn new(
    anchor: Anchor,
    span: Span,
  ) -> Self {
    Self { anchor, span }
  }
}
