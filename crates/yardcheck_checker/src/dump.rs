//! Tables printed by `--dump`.

use ascii_table::AsciiTable;
use yardcheck_diagnostics::problem::{Problem, Severity};
use yardcheck_type::{compat::Ancestry, file::SourceMap};

use crate::{build_signature, Hierarchy, Unit};

fn table(headers: &[&str]) -> AsciiTable {
  let mut table = AsciiTable::default();
  table.set_max_width(160);
  for (index, header) in headers.iter().enumerate() {
    table.column(index).set_header(*header);
  }
  table
}

pub fn dump_lineage(hierarchy: &Hierarchy<'_>) -> String {
  let rows: Vec<Vec<String>> = hierarchy
    .type_names()
    .into_iter()
    .map(|name| {
      let ancestors = hierarchy.lineage(name).iter().skip(1).cloned().collect::<Vec<_>>();
      vec![name.to_string(), ancestors.join(" < ")]
    })
    .collect();

  table(&["Type", "Lineage"]).format(rows)
}

pub fn dump_signatures(
  unit: &Unit<'_>,
  hierarchy: &Hierarchy<'_>,
) -> String {
  let rows: Vec<Vec<String>> = unit
    .model
    .methods()
    .into_iter()
    .map(|(id, method)| {
      let params = match build_signature(unit, hierarchy, id) {
        Ok(signature) => signature.params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", "),
        Err(_) => "-".to_string(),
      };
      let returns = method.own_return_tag().unwrap_or("").to_string();
      vec![method.path(), params, returns]
    })
    .collect();

  table(&["Method", "Parameters", "Returns"]).format(rows)
}

pub fn dump_problems(
  problems: &[Problem],
  sm: &SourceMap,
) -> String {
  let rows: Vec<Vec<String>> = problems
    .iter()
    .map(|problem| {
      let span = &problem.location.span;
      let (line, col) = sm.line_col(&span.file, span.start);
      let severity = match problem.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
        Severity::Hint => "hint",
      };
      vec![
        format!("{}:{}", line, col),
        problem.code.clone(),
        problem.kind.tag().to_string(),
        severity.to_string(),
        problem.message.clone(),
      ]
    })
    .collect();

  table(&["At", "Code", "Kind", "Severity", "Message"]).format(rows)
}
