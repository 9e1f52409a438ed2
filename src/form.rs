// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::debug;

use crate::backend::Backend;
use crate::backend::DialogKind;
use crate::backend::Id;
use crate::backend::Opts;
use crate::backend::WidgetKind;
use crate::class::ClassHandle;
use crate::class::FieldSpec;
use crate::config::Config;
use crate::convert::ObjectInfo;
use crate::edit::ComboEdit;
use crate::error::Error;
use crate::listbox::ListBox;
use crate::storage::Position;
use crate::value::Value;
use crate::value::ValueKind;


/// The input widget generated for a single field of a form.
#[derive(Debug)]
pub enum FieldInput {
  /// A text entry, used for string (and nil) fields.
  Text(Id),
  /// A spin box, used for integer and float fields.
  Number(Id),
  /// A check button reflecting a boolean state holder.
  Flag {
    /// The check button.
    check: Id,
    /// The boolean state holder the check button reflects.
    state: Id,
  },
  /// An editable combo, used for nested object fields.
  Object(ComboEdit),
  /// A list box, used for sequence fields.
  List(ListBox),
}


/// An editable form generated from a class specification.
///
/// The form constructs one labeled input row per field of the class,
/// can be pre-filled from an existing [`ObjectInfo`] (the edit flow),
/// and gathers its rows back into an [`ObjectInfo`] on submission.
#[derive(Debug)]
pub struct ObjectFrame {
  /// The class the form edits.
  class: ClassHandle,
  /// The frame containing the input rows.
  frame: Id,
  /// The per field input widgets, in field declaration order.
  fields: Vec<(FieldSpec, FieldInput)>,
}

impl ObjectFrame {
  /// Generate a form for the given class inside the given parent,
  /// with field defaults pre-applied.
  pub fn new(
    backend: &mut dyn Backend,
    parent: Option<Id>,
    class: ClassHandle,
    config: Config,
  ) -> Result<Self, Error> {
    let frame = backend.construct(
      WidgetKind::Frame,
      Opts {
        parent,
        ..Default::default()
      },
    )?;

    let mut fields = Vec::with_capacity(class.spec().fields().len());
    for spec in class.spec().fields() {
      let _label = backend.construct(
        WidgetKind::Label,
        Opts {
          parent: Some(frame),
          text: Some(spec.name().to_string()),
          ..Default::default()
        },
      )?;

      let mut input = match spec.kind() {
        ValueKind::Bool => {
          let state = backend.construct(
            WidgetKind::BoolState,
            Opts {
              parent: Some(frame),
              ..Default::default()
            },
          )?;
          let check = backend.construct(
            WidgetKind::CheckButton,
            Opts {
              parent: Some(frame),
              state: Some(state),
              ..Default::default()
            },
          )?;
          FieldInput::Flag { check, state }
        },
        ValueKind::Int | ValueKind::Float => {
          let widget = backend.construct(
            WidgetKind::SpinBox,
            Opts {
              parent: Some(frame),
              ..Default::default()
            },
          )?;
          FieldInput::Number(widget)
        },
        ValueKind::Object => {
          FieldInput::Object(ComboEdit::new(backend, Some(frame), Vec::new(), config)?)
        },
        ValueKind::List => FieldInput::List(ListBox::new(backend, Some(frame), config)?),
        ValueKind::Nil | ValueKind::Str => {
          let widget = backend.construct(
            WidgetKind::Entry,
            Opts {
              parent: Some(frame),
              hint: Some(spec.name().to_string()),
              ..Default::default()
            },
          )?;
          FieldInput::Text(widget)
        },
      };

      if let Some(default) = spec.default() {
        apply(backend, &mut input, default)?;
      }
      fields.push((spec.clone(), input));
    }

    Ok(Self {
      class,
      frame,
      fields,
    })
  }

  /// Retrieve the class the form edits.
  pub fn class(&self) -> &ClassHandle {
    &self.class
  }

  /// Retrieve the [`Id`] of the containing frame.
  pub fn frame(&self) -> Id {
    self.frame
  }

  /// Retrieve the input widget of the field named `name`, if any.
  pub fn input(&self, name: &str) -> Option<&FieldInput> {
    self
      .fields
      .iter()
      .find(|(spec, _)| spec.name() == name)
      .map(|(_, input)| input)
  }

  /// Retrieve the input widget of the field named `name`, mutably.
  pub fn input_mut(&mut self, name: &str) -> Option<&mut FieldInput> {
    self
      .fields
      .iter_mut()
      .find(|(spec, _)| spec.name() == name)
      .map(|(_, input)| input)
  }

  /// Pre-fill the form from an existing object description.
  ///
  /// The description must be of the class the form was generated
  /// for; keyword arguments without a corresponding field are
  /// ignored.
  pub fn load(&mut self, backend: &mut dyn Backend, info: &ObjectInfo) -> Result<(), Error> {
    if info.class_ref() != self.class.name() {
      return Err(Error::ClassMismatch {
        expected: self.class.name().to_string(),
        actual: info.class_ref().to_string(),
      })
    }

    for (spec, input) in &mut self.fields {
      if let Some(value) = info.get(spec.name()) {
        apply(backend, input, value)?;
      }
    }
    Ok(())
  }

  /// Gather the form rows back into an object description.
  ///
  /// Parsing is kind directed per field; unparsable input fails with
  /// [`Error::Invalid`] naming the field. Empty numeric input and
  /// object fields without a selection are omitted from the result.
  pub fn gather(&self, backend: &mut dyn Backend) -> Result<ObjectInfo, Error> {
    let mut info = ObjectInfo::new(self.class.clone());

    for (spec, input) in &self.fields {
      let value = match input {
        FieldInput::Text(widget) => {
          let text = backend.entry_text(*widget)?;
          if spec.kind() == ValueKind::Nil && text.is_empty() {
            Some(Value::Nil)
          } else {
            Some(Value::Str(text))
          }
        },
        FieldInput::Number(widget) => {
          let text = backend.entry_text(*widget)?;
          let trimmed = text.trim();
          if trimmed.is_empty() {
            None
          } else if spec.kind() == ValueKind::Int {
            let parsed = trimmed.parse::<i64>().map_err(|_| invalid(spec))?;
            Some(Value::Int(parsed))
          } else {
            let parsed = trimmed.parse::<f64>().map_err(|_| invalid(spec))?;
            Some(Value::Float(parsed))
          }
        },
        FieldInput::Flag { state, .. } => Some(Value::Bool(backend.bool_state(*state)?)),
        FieldInput::Object(combo_edit) => combo_edit.selected().cloned(),
        FieldInput::List(listbox) => Some(Value::List(listbox.values().cloned().collect())),
      };

      if let Some(value) = value {
        info.set(spec.name(), value);
      }
    }
    Ok(info)
  }

  /// Submit the form: gather the rows, reporting unparsable input
  /// through an error dialog instead of an error.
  ///
  /// The result is `None` if (and only if) input was rejected.
  pub async fn submit(&mut self, backend: &mut dyn Backend) -> Result<Option<ObjectInfo>, Error> {
    match self.gather(backend) {
      Ok(info) => Ok(Some(info)),
      Err(error @ Error::Invalid { .. }) => {
        debug!(%error, "rejecting form submission");
        let _ = backend
          .show_dialog(
            DialogKind::Error,
            "Input error",
            &error.to_string(),
            Some(self.frame),
          )
          .await;
        Ok(None)
      },
      Err(error) => Err(error),
    }
  }
}


/// Write a value into a field input widget.
fn apply(backend: &mut dyn Backend, input: &mut FieldInput, value: &Value) -> Result<(), Error> {
  match input {
    FieldInput::Text(widget) | FieldInput::Number(widget) => {
      backend.set_entry_text(*widget, &value.to_string())
    },
    FieldInput::Flag { state, .. } => match value {
      Value::Bool(flag) => backend.set_bool_state(*state, *flag),
      other => Err(Error::KindMismatch {
        expected: ValueKind::Bool,
        actual: other.kind(),
      }),
    },
    FieldInput::Object(combo_edit) => {
      let _index = combo_edit
        .combo_mut()
        .select_value(backend, value.clone())?;
      Ok(())
    },
    FieldInput::List(listbox) => match value {
      Value::List(values) => {
        listbox.clear(backend)?;
        let _index = listbox.insert(backend, Position::End, values.clone())?;
        Ok(())
      },
      other => Err(Error::KindMismatch {
        expected: ValueKind::List,
        actual: other.kind(),
      }),
    },
  }
}


/// Create an `Invalid` error for the given field.
fn invalid(spec: &FieldSpec) -> Error {
  Error::Invalid {
    field: spec.name().to_string(),
    kind: spec.kind(),
  }
}
