// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use async_trait::async_trait;

use tracing::debug;

use crate::backend::Backend;
use crate::backend::DialogKind;
use crate::backend::Id;
use crate::backend::Opts;
use crate::backend::WidgetKind;
use crate::class::ClassHandle;
use crate::combobox::ComboBox;
use crate::config::Config;
use crate::convert::ObjectInfo;
use crate::error::Error;
use crate::value::Value;


/// The state of a [`ComboEdit`] widget.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EditState {
  /// The combo shows the current selection; editing may be started.
  Idle,
  /// A sub-form is open for the selected object.
  Editing,
}


/// A collaborator opening a (modal) editor for a single object.
///
/// The editor is typically a sub-form pre-filled from the given
/// description. The call suspends the caller's logical flow until
/// the user closes the editor, returning the edited description on
/// submission and `None` on cancellation.
#[async_trait(?Send)]
pub trait ObjectEditor {
  /// Edit an object of the given class, starting from `old` if
  /// present.
  async fn edit(
    &mut self,
    backend: &mut dyn Backend,
    class: ClassHandle,
    old: Option<ObjectInfo>,
  ) -> Result<Option<ObjectInfo>, Error>;
}


/// A combo box paired with an "Edit" button, allowing the selected
/// object to be edited in place.
#[derive(Debug)]
pub struct ComboEdit {
  /// The frame containing combo and button.
  frame: Id,
  /// The button starting an edit of the selection.
  button: Id,
  /// The combo holding the editable values.
  combo: ComboBox,
  /// The current state of the widget.
  state: EditState,
}

impl ComboEdit {
  /// Create a new `ComboEdit` inside the given parent, pre-filled
  /// with the given values (the first of which becomes the
  /// selection).
  pub fn new(
    backend: &mut dyn Backend,
    parent: Option<Id>,
    values: Vec<Value>,
    config: Config,
  ) -> Result<Self, Error> {
    let frame = backend.construct(
      WidgetKind::Frame,
      Opts {
        parent,
        ..Default::default()
      },
    )?;
    let button = backend.construct(
      WidgetKind::Button,
      Opts {
        parent: Some(frame),
        text: Some("Edit".to_string()),
        ..Default::default()
      },
    )?;
    let mut combo = ComboBox::new(backend, Some(frame), config)?;
    combo.set_values(backend, values)?;

    Ok(Self {
      frame,
      button,
      combo,
      state: EditState::Idle,
    })
  }

  /// Retrieve the [`Id`] of the containing frame.
  pub fn frame(&self) -> Id {
    self.frame
  }

  /// Retrieve the [`Id`] of the edit button.
  pub fn button(&self) -> Id {
    self.button
  }

  /// Retrieve the inner combo box.
  pub fn combo(&self) -> &ComboBox {
    &self.combo
  }

  /// Retrieve the inner combo box, mutably.
  pub fn combo_mut(&mut self) -> &mut ComboBox {
    &mut self.combo
  }

  /// Retrieve the current state of the widget.
  pub fn state(&self) -> EditState {
    self.state
  }

  /// Replace the editable values, selecting the first one.
  pub fn set_values(&mut self, backend: &mut dyn Backend, values: Vec<Value>) -> Result<(), Error> {
    self.combo.set_values(backend, values)
  }

  /// Retrieve the currently selected value, if any.
  pub fn selected(&self) -> Option<&Value> {
    self.combo.selected()
  }

  /// Edit the selected object through the given editor.
  ///
  /// Editing requires a selection and the selected value to be an
  /// object; anything else is rejected with a dialog and the widget
  /// stays [`Idle`][EditState::Idle]. While the editor runs the
  /// widget is [`Editing`][EditState::Editing]; on submission the
  /// selected entry is replaced with the edited object, on
  /// cancellation nothing changes.
  pub async fn edit(
    &mut self,
    backend: &mut dyn Backend,
    editor: &mut dyn ObjectEditor,
  ) -> Result<(), Error> {
    let index = match self.combo.current() {
      Some(index) => index,
      None => {
        debug!("edit requires a selected candidate");
        let _ = backend
          .show_dialog(
            DialogKind::Error,
            "Empty list!",
            "Select at least one item!",
            Some(self.frame),
          )
          .await;
        return Ok(())
      },
    };

    let object = match self.combo.selected() {
      Some(Value::Object(object)) => object.clone(),
      _ => {
        debug!("edit requires the selection to be an object");
        let _ = backend
          .show_dialog(
            DialogKind::Error,
            "Edit error",
            "The selected item is not an object!",
            Some(self.frame),
          )
          .await;
        return Ok(())
      },
    };

    let class = object.class().clone();
    self.state = EditState::Editing;
    let result = editor.edit(backend, class, Some(object)).await;
    self.state = EditState::Idle;

    if let Some(edited) = result? {
      self.combo.replace(backend, index, Value::Object(edited))?;
    }
    Ok(())
  }
}
