// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::rc::Rc;

use indexmap::IndexMap;

use tracing::debug;
use tracing::trace;

use crate::convert::ObjectInfo;
use crate::error::Error;
use crate::value::Value;
use crate::value::ValueKind;


/// The specification of a single constructor field of a class:
/// its name, the kind of value it takes, and an optional default.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldSpec {
  /// The name of the field.
  name: String,
  /// The kind of value the field takes.
  kind: ValueKind,
  /// The default value pre-applied when a form is generated.
  default: Option<Value>,
}

impl FieldSpec {
  /// Create a new `FieldSpec` without a default value.
  pub fn new(name: &str, kind: ValueKind) -> Self {
    Self {
      name: name.to_string(),
      kind,
      default: None,
    }
  }

  /// A builder-style method setting the field's default value.
  pub fn with_default<V>(mut self, default: V) -> Self
  where
    V: Into<Value>,
  {
    self.default = Some(default.into());
    self
  }

  /// Retrieve the name of the field.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Retrieve the kind of value the field takes.
  pub fn kind(&self) -> ValueKind {
    self.kind
  }

  /// Retrieve the field's default value, if any.
  pub fn default(&self) -> Option<&Value> {
    self.default.as_ref()
  }
}


/// The specification of a class: its reference name and the ordered
/// list of its constructor fields.
///
/// A `ClassSpec` is everything the wizard knows about a class; it is
/// what drives form generation and what a
/// [`class_ref`][ObjectInfo::class_ref] resolves back to.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassSpec {
  /// The reference name of the class.
  name: String,
  /// The constructor fields, in declaration order.
  fields: Vec<FieldSpec>,
}

impl ClassSpec {
  /// Create a new `ClassSpec` with the given reference name and no
  /// fields.
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      fields: Vec::new(),
    }
  }

  /// A builder-style method appending a field to the specification.
  pub fn field(mut self, field: FieldSpec) -> Self {
    self.fields.push(field);
    self
  }

  /// Retrieve the reference name of the class.
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Retrieve the constructor fields, in declaration order.
  pub fn fields(&self) -> &[FieldSpec] {
    &self.fields
  }

  /// Retrieve the specification of the field named `name`, if any.
  pub fn find(&self, name: &str) -> Option<&FieldSpec> {
    self.fields.iter().find(|field| field.name() == name)
  }
}


/// A cheap handle to a registered class.
///
/// Handles are freely clonable and compare structurally, by the
/// specification they point to, never by identity.
#[derive(Clone, Debug)]
pub struct ClassHandle(Rc<ClassSpec>);

impl ClassHandle {
  /// Retrieve the reference name of the class.
  pub fn name(&self) -> &str {
    self.0.name()
  }

  /// Retrieve the full specification of the class.
  pub fn spec(&self) -> &ClassSpec {
    &self.0
  }
}

impl PartialEq for ClassHandle {
  fn eq(&self, other: &Self) -> bool {
    self.0 == other.0
  }
}


/// The registry mapping class references to class handles.
///
/// The registry is the sole authority for resolving the textual class
/// references found in deserialized input back into usable handles.
/// It is passed explicitly wherever resolution may happen; there is
/// no process wide instance.
#[derive(Debug, Default)]
pub struct ClassRegistry {
  /// The registered classes, keyed by reference name, in registration
  /// order.
  classes: IndexMap<String, ClassHandle>,
}

impl ClassRegistry {
  /// Create a new, empty `ClassRegistry`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Register a class specification, returning the handle now
  /// representing it.
  ///
  /// Registering a second specification under an already used name
  /// replaces the earlier one; handles to the earlier specification
  /// stay valid but no longer resolve.
  pub fn add(&mut self, spec: ClassSpec) -> ClassHandle {
    let name = spec.name().to_string();
    let handle = ClassHandle(Rc::new(spec));
    trace!(class = %name, "registering class");

    let prev = self.classes.insert(name, handle.clone());
    if let Some(prev) = prev {
      debug!(class = prev.name(), "replaced earlier class registration");
    }
    handle
  }

  /// Register a [`Describe`] type, returning the handle now
  /// representing its class.
  pub fn register<T>(&mut self) -> ClassHandle
  where
    T: Describe,
  {
    self.add(T::class_spec())
  }

  /// Resolve a textual class reference into a handle.
  pub fn resolve(&self, class_ref: &str) -> Result<ClassHandle, Error> {
    self
      .classes
      .get(class_ref)
      .cloned()
      .ok_or_else(|| Error::UnknownClass(class_ref.to_string()))
  }

  /// Retrieve an iterator over all registered classes, in
  /// registration order.
  pub fn classes(&self) -> impl Iterator<Item = &ClassHandle> {
    self.classes.values()
  }

  /// Retrieve the number of registered classes.
  pub fn len(&self) -> usize {
    self.classes.len()
  }

  /// Check whether the registry is empty.
  pub fn is_empty(&self) -> bool {
    self.classes.is_empty()
  }
}


/// A trait connecting a plain Rust type to the descriptor model.
///
/// Implementations are typically generated with
/// `#[derive(Describe)]` from the accompanying derive crate: the
/// class reference is the type's name and every named field maps to a
/// keyword argument through [`FormField`][crate::FormField].
pub trait Describe {
  /// Retrieve the textual class reference of this type.
  fn class_ref() -> &'static str;

  /// Retrieve the class specification of this type.
  fn class_spec() -> ClassSpec;

  /// Describe this instance as an [`ObjectInfo`], resolving the class
  /// through the given registry.
  fn describe(&self, registry: &ClassRegistry) -> Result<ObjectInfo, Error>;

  /// Reconstruct an instance from an [`ObjectInfo`].
  fn build(info: &ObjectInfo) -> Result<Self, Error>
  where
    Self: Sized;
}
