// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! The descriptor model for structured objects and its conversion
//! into (and back out of) a plain, serialization ready form.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use indexmap::IndexMap;

use serde::Deserialize;
use serde::Serialize;

use crate::class::ClassHandle;
use crate::class::ClassRegistry;
use crate::error::Error;
use crate::value::Value;


/// The maximum nesting depth supported when converting value graphs.
///
/// Descriptor graphs are acyclic by construction, but converted input
/// may originate outside the application (e.g., from the clipboard)
/// and so recursion is bounded rather than trusted.
pub const MAX_DEPTH: usize = 64;


/// A description of "a class plus its constructor keyword arguments",
/// possibly nested.
///
/// An `ObjectInfo` is what a submitted form produces and what the
/// edit flow consumes to pre-fill a form again. The class is kept as
/// a resolved [`ClassHandle`]; crossing a serialization boundary
/// reduces it to its textual reference, to be resolved again on the
/// way back in.
#[derive(Clone, Debug)]
pub struct ObjectInfo {
  /// The class being described.
  class: ClassHandle,
  /// The keyword arguments of the class' constructor, in insertion
  /// order.
  kwargs: IndexMap<String, Value>,
}

impl ObjectInfo {
  /// Create a new `ObjectInfo` describing the given class, without
  /// any keyword arguments.
  pub fn new(class: ClassHandle) -> Self {
    Self {
      class,
      kwargs: IndexMap::new(),
    }
  }

  /// A builder-style variant of [`set`][Self::set].
  pub fn with<V>(mut self, name: &str, value: V) -> Self
  where
    V: Into<Value>,
  {
    self.set(name, value);
    self
  }

  /// Set the keyword argument `name` to `value`, replacing any
  /// earlier value.
  pub fn set<V>(&mut self, name: &str, value: V)
  where
    V: Into<Value>,
  {
    let _prev = self.kwargs.insert(name.to_string(), value.into());
  }

  /// Retrieve the value of the keyword argument `name`, if present.
  pub fn get(&self, name: &str) -> Option<&Value> {
    self.kwargs.get(name)
  }

  /// Retrieve the described class.
  pub fn class(&self) -> &ClassHandle {
    &self.class
  }

  /// Retrieve the textual reference of the described class.
  pub fn class_ref(&self) -> &str {
    self.class.name()
  }

  /// Retrieve the keyword arguments, in insertion order.
  pub fn kwargs(&self) -> &IndexMap<String, Value> {
    &self.kwargs
  }
}

impl PartialEq for ObjectInfo {
  /// Compare two descriptions structurally: by class reference and by
  /// keyword arguments, recursively. Identity of the underlying class
  /// handles plays no role.
  fn eq(&self, other: &Self) -> bool {
    self.class_ref() == other.class_ref() && self.kwargs == other.kwargs
  }
}

impl Display for ObjectInfo {
  /// Format the description as `Class(name=value, ...)`.
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}(", self.class_ref())?;
    for (index, (name, value)) in self.kwargs.iter().enumerate() {
      if index > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{name}={value}")?;
    }
    write!(f, ")")
  }
}


/// The plain, serialization ready form of a [`Value`].
///
/// `Packed` is what actually crosses the clipboard boundary: scalars
/// and sequences pass through structurally, while objects are reduced
/// to their class reference plus packed keyword arguments.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Packed {
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
  /// An ordered sequence of packed values.
  Seq(Vec<Packed>),
  /// A packed object description.
  Object(PackedObject),
}


/// The packed form of an [`ObjectInfo`]: the class reduced to its
/// textual reference, the keyword arguments packed recursively.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PackedObject {
  /// The textual reference of the described class.
  pub class_ref: String,
  /// The packed keyword arguments, in their original order.
  pub kwargs: IndexMap<String, Packed>,
}


/// Convert a value into its plain, serialization ready form.
///
/// The conversion is pure: the input is not modified and the result
/// shares no state with it. Nesting beyond [`MAX_DEPTH`] fails with
/// [`Error::DepthExceeded`].
pub fn pack(value: &Value) -> Result<Packed, Error> {
  pack_at(value, 0)
}

fn pack_at(value: &Value, depth: usize) -> Result<Packed, Error> {
  if depth >= MAX_DEPTH {
    return Err(Error::DepthExceeded)
  }

  let packed = match value {
    Value::Nil => Packed::Nil,
    Value::Bool(value) => Packed::Bool(*value),
    Value::Int(value) => Packed::Int(*value),
    Value::Float(value) => Packed::Float(*value),
    Value::Str(value) => Packed::Str(value.clone()),
    Value::List(values) => {
      let packed = values
        .iter()
        .map(|value| pack_at(value, depth + 1))
        .collect::<Result<Vec<_>, Error>>()?;
      Packed::Seq(packed)
    },
    Value::Object(object) => {
      let mut kwargs = IndexMap::with_capacity(object.kwargs().len());
      for (name, value) in object.kwargs() {
        let _prev = kwargs.insert(name.clone(), pack_at(value, depth + 1)?);
      }
      Packed::Object(PackedObject {
        class_ref: object.class_ref().to_string(),
        kwargs,
      })
    },
  };
  Ok(packed)
}


/// Convert a packed value back into a [`Value`], resolving class
/// references through the given registry.
///
/// An unresolvable class reference fails with
/// [`Error::UnknownClass`]; packed input nested beyond [`MAX_DEPTH`]
/// fails with [`Error::DepthExceeded`].
pub fn unpack(packed: Packed, registry: &ClassRegistry) -> Result<Value, Error> {
  unpack_at(packed, registry, 0)
}

fn unpack_at(packed: Packed, registry: &ClassRegistry, depth: usize) -> Result<Value, Error> {
  if depth >= MAX_DEPTH {
    return Err(Error::DepthExceeded)
  }

  let value = match packed {
    Packed::Nil => Value::Nil,
    Packed::Bool(value) => Value::Bool(value),
    Packed::Int(value) => Value::Int(value),
    Packed::Float(value) => Value::Float(value),
    Packed::Str(value) => Value::Str(value),
    Packed::Seq(packed) => {
      let values = packed
        .into_iter()
        .map(|packed| unpack_at(packed, registry, depth + 1))
        .collect::<Result<Vec<_>, Error>>()?;
      Value::List(values)
    },
    Packed::Object(object) => {
      let class = registry.resolve(&object.class_ref)?;
      let mut info = ObjectInfo::new(class);
      for (name, packed) in object.kwargs {
        info.set(&name, unpack_at(packed, registry, depth + 1)?);
      }
      Value::Object(info)
    },
  };
  Ok(value)
}
