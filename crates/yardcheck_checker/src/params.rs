use yardcheck_diagnostics::message::ProblemMessage;
use yardcheck_type::{
  location::{Anchor, Location},
  resolve::ResolvedType,
};

use crate::Checker;

impl Checker<'_> {
  /// Every `@param` tag a method writes must name known types. Inherited
  /// tags are reported on the ancestor that writes them.
  pub(crate) fn check_params(&mut self) {
    let unit = self.unit;
    for (id, method) in unit.model.methods() {
      let anchor = Anchor::Method(id.index());
      for tag in &method.param_tags {
        if tag.text.trim().is_empty() {
          continue;
        }

        if let ResolvedType::Unresolved { missing, .. } =
          self.resolve_annotation(anchor, &tag.text, method.owner.as_deref())
        {
          self.problems.push(ProblemMessage::UnresolvedParamType {
            method: method.path(),
            param: tag.name.clone(),
            annotation: tag.text.trim().to_string(),
            missing,
            location: Location::new(anchor, method.span.clone()),
          });
        }
      }
    }
  }
}
