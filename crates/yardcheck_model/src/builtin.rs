//! Core classes every snapshot starts with.

use crate::decl::NamespaceKind;

pub struct CoreType {
  pub name: &'static str,
  pub kind: NamespaceKind,
  pub superclass: Option<&'static str>,
  pub includes: &'static [&'static str],
  pub methods: &'static [&'static str],
}

const fn class(
  name: &'static str,
  superclass: &'static str,
  includes: &'static [&'static str],
  methods: &'static [&'static str],
) -> CoreType {
  CoreType {
    name,
    kind: NamespaceKind::Class,
    superclass: Some(superclass),
    includes,
    methods,
  }
}

const fn module(
  name: &'static str,
  methods: &'static [&'static str],
) -> CoreType {
  CoreType {
    name,
    kind: NamespaceKind::Module,
    superclass: None,
    includes: &[],
    methods,
  }
}

pub const CORE_TYPES: &[CoreType] = &[
  CoreType {
    name: "BasicObject",
    kind: NamespaceKind::Class,
    superclass: None,
    includes: &[],
    methods: &["!", "==", "!=", "equal?", "instance_eval", "__send__"],
  },
  module("Kernel", &["puts", "print", "raise", "require", "format", "loop"]),
  module("Comparable", &["<", "<=", ">", ">=", "between?", "clamp"]),
  module("Enumerable", &["each", "map", "select", "reject", "reduce", "to_a", "include?", "first"]),
  class(
    "Object",
    "BasicObject",
    &["Kernel"],
    &[
      "to_s",
      "inspect",
      "class",
      "nil?",
      "is_a?",
      "respond_to?",
      "hash",
      "freeze",
      "dup",
      "send",
      "tap",
    ],
  ),
  class("Module", "Object", &[], &["name", "include", "extend", "attr_accessor", "const_get"]),
  class("Class", "Module", &[], &["new", "allocate", "superclass"]),
  class("NilClass", "Object", &[], &["to_a", "to_s", "to_i", "&", "|"]),
  class("TrueClass", "Object", &[], &["&", "|", "^"]),
  class("FalseClass", "Object", &[], &["&", "|", "^"]),
  class("Numeric", "Object", &["Comparable"], &["+", "-", "*", "/", "abs", "zero?", "to_i", "to_f"]),
  class("Integer", "Numeric", &[], &["times", "succ", "pred", "to_s", "chr", "even?", "odd?"]),
  class("Float", "Numeric", &[], &["round", "floor", "ceil", "nan?"]),
  class(
    "String",
    "Object",
    &["Comparable"],
    &["to_s", "to_str", "to_sym", "to_i", "length", "size", "+", "upcase", "downcase", "strip", "split"],
  ),
  class("Symbol", "Object", &["Comparable"], &["to_sym", "to_proc", "to_s", "length"]),
  class(
    "Array",
    "Object",
    &["Enumerable"],
    &["each", "<<", "push", "pop", "size", "length", "last", "to_a", "to_ary", "[]", "[]="],
  ),
  class(
    "Hash",
    "Object",
    &["Enumerable"],
    &["each", "[]", "[]=", "keys", "values", "fetch", "to_h", "to_hash", "key?"],
  ),
  class("Range", "Object", &["Enumerable"], &["each", "begin", "end", "cover?"]),
  class("Proc", "Object", &[], &["call", "to_proc", "arity", "curry"]),
  class("Method", "Object", &[], &["call", "to_proc", "arity", "owner"]),
  class("Regexp", "Object", &[], &["match", "=~", "source"]),
  class("Exception", "Object", &[], &["message", "backtrace", "full_message"]),
  class("StandardError", "Exception", &[], &[]),
  class("IO", "Object", &["Enumerable"], &["read", "write", "puts", "close"]),
  class("File", "IO", &[], &["path"]),
  class("Time", "Object", &["Comparable"], &["to_i", "year", "month", "day"]),
];
