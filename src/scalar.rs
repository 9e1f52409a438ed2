// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::backend::Backend;
use crate::backend::Id;
use crate::backend::Opts;
use crate::backend::WidgetKind;
use crate::error::Error;
use crate::value::Value;


/// A read-only display for a single opaque value.
///
/// The widget shows the value's rendering in an entry while keeping
/// the value itself retrievable, the degenerate single slot cousin of
/// the typed containers.
#[derive(Debug)]
pub struct ObjectScalar {
  /// The entry used for display.
  widget: Id,
  /// The stored value, if any.
  value: Option<Value>,
}

impl ObjectScalar {
  /// Create a new, empty `ObjectScalar` inside the given parent.
  pub fn new(backend: &mut dyn Backend, parent: Option<Id>) -> Result<Self, Error> {
    let widget = backend.construct(
      WidgetKind::Entry,
      Opts {
        parent,
        ..Default::default()
      },
    )?;

    Ok(Self {
      widget,
      value: None,
    })
  }

  /// Retrieve the [`Id`] of the display entry.
  pub fn id(&self) -> Id {
    self.widget
  }

  /// Retrieve the stored value, if any.
  pub fn get(&self) -> Option<&Value> {
    self.value.as_ref()
  }

  /// Store a value, updating the display to its rendering.
  pub fn set(&mut self, backend: &mut dyn Backend, value: Value) -> Result<(), Error> {
    backend.set_entry_text(self.widget, &value.to_string())?;
    self.value = Some(value);
    Ok(())
  }

  /// Remove the stored value, clearing the display.
  pub fn clear(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    backend.set_entry_text(self.widget, "")?;
    self.value = None;
    Ok(())
  }
}
