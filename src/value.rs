// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use crate::convert::ObjectInfo;
use crate::error::Error;


/// The kind of a [`Value`], without the value itself.
///
/// Kinds classify field specifications and drive both form input
/// construction and kind-directed parsing of textual input.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ValueKind {
  /// The absence of a value.
  Nil,
  /// A boolean.
  Bool,
  /// A signed integer.
  Int,
  /// A floating point number.
  Float,
  /// A string.
  Str,
  /// An ordered sequence of values.
  List,
  /// A structured object description.
  Object,
}

impl Display for ValueKind {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    let name = match self {
      Self::Nil => "nil",
      Self::Bool => "bool",
      Self::Int => "int",
      Self::Float => "float",
      Self::Str => "str",
      Self::List => "list",
      Self::Object => "object",
    };
    write!(f, "{name}")
  }
}


/// An opaque value as stored by the typed containers and passed
/// through forms and the clipboard.
///
/// Values are acyclic by construction: an object cannot contain
/// itself, because building one requires all constituents to exist
/// beforehand.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
  /// The absence of a value.
  Nil,
  /// A boolean.
  Bool(bool),
  /// A signed integer.
  Int(i64),
  /// A floating point number.
  Float(f64),
  /// A string.
  Str(String),
  /// An ordered sequence of values.
  List(Vec<Value>),
  /// A structured object description.
  Object(ObjectInfo),
}

impl Value {
  /// Retrieve the [`ValueKind`] of this value.
  pub fn kind(&self) -> ValueKind {
    match self {
      Self::Nil => ValueKind::Nil,
      Self::Bool(..) => ValueKind::Bool,
      Self::Int(..) => ValueKind::Int,
      Self::Float(..) => ValueKind::Float,
      Self::Str(..) => ValueKind::Str,
      Self::List(..) => ValueKind::List,
      Self::Object(..) => ValueKind::Object,
    }
  }
}

impl Display for Value {
  /// Format the value into a deterministic, human readable rendering.
  ///
  /// The rendering is what the storage widgets display in place of the
  /// value itself; strings render verbatim, sequences and objects
  /// recurse.
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self {
      Self::Nil => write!(f, "none"),
      Self::Bool(value) => write!(f, "{value}"),
      Self::Int(value) => write!(f, "{value}"),
      Self::Float(value) => write!(f, "{value}"),
      Self::Str(value) => write!(f, "{value}"),
      Self::List(values) => {
        write!(f, "[")?;
        for (index, value) in values.iter().enumerate() {
          if index > 0 {
            write!(f, ", ")?;
          }
          write!(f, "{value}")?;
        }
        write!(f, "]")
      },
      Self::Object(object) => write!(f, "{object}"),
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<i32> for Value {
  fn from(value: i32) -> Self {
    Self::Int(i64::from(value))
  }
}

impl From<i64> for Value {
  fn from(value: i64) -> Self {
    Self::Int(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Self::Float(value)
  }
}

impl From<&str> for Value {
  fn from(value: &str) -> Self {
    Self::Str(value.to_string())
  }
}

impl From<String> for Value {
  fn from(value: String) -> Self {
    Self::Str(value)
  }
}

impl From<Vec<Value>> for Value {
  fn from(values: Vec<Value>) -> Self {
    Self::List(values)
  }
}

impl From<ObjectInfo> for Value {
  fn from(object: ObjectInfo) -> Self {
    Self::Object(object)
  }
}


/// A trait for types usable as fields of a described class.
///
/// The trait ties a Rust type to the [`ValueKind`] it maps to and
/// provides the conversions in both directions. It is what the
/// [`Describe`][crate::Describe] derive macro builds on.
pub trait FormField: Sized {
  /// The kind of [`Value`] this field type maps to.
  const KIND: ValueKind;

  /// Convert the field into a [`Value`].
  fn into_value(self) -> Value;

  /// Reconstruct the field from a [`Value`], failing with
  /// [`Error::KindMismatch`] if the value is of the wrong kind.
  fn from_value(value: Value) -> Result<Self, Error>;
}

impl FormField for bool {
  const KIND: ValueKind = ValueKind::Bool;

  fn into_value(self) -> Value {
    Value::Bool(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::Bool(value) => Ok(value),
      other => Err(mismatch(ValueKind::Bool, &other)),
    }
  }
}

impl FormField for i64 {
  const KIND: ValueKind = ValueKind::Int;

  fn into_value(self) -> Value {
    Value::Int(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::Int(value) => Ok(value),
      other => Err(mismatch(ValueKind::Int, &other)),
    }
  }
}

impl FormField for f64 {
  const KIND: ValueKind = ValueKind::Float;

  fn into_value(self) -> Value {
    Value::Float(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::Float(value) => Ok(value),
      other => Err(mismatch(ValueKind::Float, &other)),
    }
  }
}

impl FormField for String {
  const KIND: ValueKind = ValueKind::Str;

  fn into_value(self) -> Value {
    Value::Str(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::Str(value) => Ok(value),
      other => Err(mismatch(ValueKind::Str, &other)),
    }
  }
}

impl FormField for Vec<Value> {
  const KIND: ValueKind = ValueKind::List;

  fn into_value(self) -> Value {
    Value::List(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::List(values) => Ok(values),
      other => Err(mismatch(ValueKind::List, &other)),
    }
  }
}

impl FormField for ObjectInfo {
  const KIND: ValueKind = ValueKind::Object;

  fn into_value(self) -> Value {
    Value::Object(self)
  }

  fn from_value(value: Value) -> Result<Self, Error> {
    match value {
      Value::Object(object) => Ok(object),
      other => Err(mismatch(ValueKind::Object, &other)),
    }
  }
}


/// Create a `KindMismatch` error for the given expectation and value.
fn mismatch(expected: ValueKind, actual: &Value) -> Error {
  Error::KindMismatch {
    expected,
    actual: actual.kind(),
  }
}
