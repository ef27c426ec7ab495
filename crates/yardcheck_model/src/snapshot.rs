use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use yardcheck_type::{
  file::SourceMap,
  index::{AnnotationSelector, MethodScope, TypeIndex},
  Store,
};

use crate::{
  builtin::CORE_TYPES,
  decl::{MethodDecl, NamespaceKind, TypeDecl},
  expr::{CallSite, TypedAssignment},
  AssignmentId, CallId, MethodId, SemanticModel,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceText {
  pub path: String,
  pub text: String,
}

/// On-disk form of a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
  #[serde(default)]
  pub source: Option<SourceText>,
  #[serde(default)]
  pub types: Vec<TypeDecl>,
  #[serde(default)]
  pub methods: Vec<MethodDecl>,
  #[serde(default)]
  pub assignments: Vec<TypedAssignment>,
  #[serde(default)]
  pub calls: Vec<CallSite>,
}

#[derive(Debug, Clone)]
struct TypeEntry {
  kind: NamespaceKind,
  superclass: Option<String>,
  includes: Vec<String>,
  core_methods: &'static [&'static str],
}

impl TypeEntry {
  fn fresh(
    name: &str,
    kind: NamespaceKind,
  ) -> Self {
    let superclass = match kind {
      NamespaceKind::Class if name != "BasicObject" => Some("Object".to_string()),
      _ => None,
    };

    Self {
      kind,
      superclass,
      includes: Vec::new(),
      core_methods: &[],
    }
  }
}

/// An immutable, fully indexed unit: core classes, declared namespaces,
/// methods, typed assignments and call sites.
#[derive(Debug, Clone)]
pub struct Snapshot {
  types: BTreeMap<String, TypeEntry>,
  methods: Store<MethodDecl>,
  assignments: Store<TypedAssignment>,
  calls: Store<CallSite>,
  members: HashMap<(String, MethodScope), HashMap<String, MethodId>>,
  top_level: HashMap<String, MethodId>,
  source_map: SourceMap,
}

impl Snapshot {
  pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
    let file: SnapshotFile = serde_json::from_str(text)?;
    Ok(Self::from_file(file))
  }

  pub fn from_file(file: SnapshotFile) -> Self {
    let mut types = BTreeMap::new();
    for core in CORE_TYPES {
      types.insert(
        core.name.to_string(),
        TypeEntry {
          kind: core.kind,
          superclass: core.superclass.map(str::to_string),
          includes: core.includes.iter().map(|s| s.to_string()).collect(),
          core_methods: core.methods,
        },
      );
    }

    for decl in &file.types {
      let entry = types
        .entry(decl.name.clone())
        .or_insert_with(|| TypeEntry::fresh(&decl.name, decl.kind));

      if decl.superclass.is_some() {
        entry.superclass.clone_from(&decl.superclass);
      }
      for mixin in &decl.includes {
        if !entry.includes.contains(mixin) {
          entry.includes.push(mixin.clone());
        }
      }
    }

    let mut members: HashMap<(String, MethodScope), HashMap<String, MethodId>> = HashMap::new();
    let mut top_level = HashMap::new();
    let methods: Store<MethodDecl> = file.methods.into();

    for (id, method) in methods.iter() {
      match &method.owner {
        Some(owner) => {
          types
            .entry(owner.clone())
            .or_insert_with(|| TypeEntry::fresh(owner, NamespaceKind::Class));
          members
            .entry((owner.clone(), method.scope))
            .or_default()
            .insert(method.name.clone(), id);
        },
        None => {
          top_level.insert(method.name.clone(), id);
        },
      }
    }

    let mut source_map = SourceMap::new();
    if let Some(source) = file.source {
      source_map.add_file(source.path, source.text);
    }

    Self {
      types,
      methods,
      assignments: file.assignments.into(),
      calls: file.calls.into(),
      members,
      top_level,
      source_map,
    }
  }

  pub fn source_map(&self) -> &SourceMap {
    &self.source_map
  }

  pub fn kind_of(
    &self,
    name: &str,
  ) -> Option<NamespaceKind> {
    self.types.get(name).map(|entry| entry.kind)
  }

  /// The method `owner` itself defines, ignoring ancestors.
  pub fn member(
    &self,
    owner: &str,
    name: &str,
    scope: MethodScope,
  ) -> Option<MethodId> {
    self
      .members
      .get(&(owner.to_string(), scope))
      .and_then(|names| names.get(name))
      .copied()
  }

  pub fn top_level_method(
    &self,
    name: &str,
  ) -> Option<MethodId> {
    self.top_level.get(name).copied()
  }
}

impl SemanticModel for Snapshot {
  fn methods(&self) -> Vec<(MethodId, &MethodDecl)> {
    self.methods.iter().collect()
  }

  fn method(
    &self,
    id: MethodId,
  ) -> Option<&MethodDecl> {
    self.methods.try_get(&id)
  }

  fn assignments(&self) -> Vec<(AssignmentId, &TypedAssignment)> {
    self.assignments.iter().collect()
  }

  fn calls(&self) -> Vec<(CallId, &CallSite)> {
    self.calls.iter().collect()
  }
}

impl TypeIndex for Snapshot {
  fn contains(
    &self,
    name: &str,
  ) -> bool {
    self.types.contains_key(name)
  }

  fn superclass_of(
    &self,
    name: &str,
  ) -> Option<&str> {
    self.types.get(name).and_then(|entry| entry.superclass.as_deref())
  }

  fn mixins_of(
    &self,
    name: &str,
  ) -> Vec<&str> {
    self
      .types
      .get(name)
      .map(|entry| entry.includes.iter().map(String::as_str).collect())
      .unwrap_or_default()
  }

  fn type_names(&self) -> Vec<&str> {
    self.types.keys().map(String::as_str).collect()
  }

  fn declares_member(
    &self,
    owner: &str,
    member: &str,
    scope: MethodScope,
  ) -> bool {
    if self.member(owner, member, scope).is_some() {
      return true;
    }

    scope == MethodScope::Instance
      && self
        .types
        .get(owner)
        .is_some_and(|entry| entry.core_methods.contains(&member))
  }

  fn member_annotation(
    &self,
    owner: &str,
    member: &str,
    scope: MethodScope,
    selector: AnnotationSelector<'_>,
  ) -> Option<&str> {
    let method = self.methods.get(&self.member(owner, member, scope)?);
    match selector {
      AnnotationSelector::Return => method.own_return_tag(),
      AnnotationSelector::Param(param) => method.param_tag(param),
    }
  }
}

/// Assembles a snapshot in code.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
  file: SnapshotFile,
}

impl SnapshotBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn source(
    mut self,
    path: impl Into<String>,
    text: impl Into<String>,
  ) -> Self {
    self.file.source = Some(SourceText {
      path: path.into(),
      text: text.into(),
    });
    self
  }

  pub fn ty(
    mut self,
    decl: TypeDecl,
  ) -> Self {
    self.file.types.push(decl);
    self
  }

  pub fn class(
    self,
    name: &str,
  ) -> Self {
    self.ty(TypeDecl::class(name))
  }

  pub fn module(
    self,
    name: &str,
  ) -> Self {
    self.ty(TypeDecl::module(name))
  }

  pub fn method(
    mut self,
    method: MethodDecl,
  ) -> Self {
    self.file.methods.push(method);
    self
  }

  pub fn assignment(
    mut self,
    assignment: TypedAssignment,
  ) -> Self {
    self.file.assignments.push(assignment);
    self
  }

  pub fn call(
    mut self,
    call: CallSite,
  ) -> Self {
    self.file.calls.push(call);
    self
  }

  pub fn build(self) -> Snapshot {
    Snapshot::from_file(self.file)
  }
}
