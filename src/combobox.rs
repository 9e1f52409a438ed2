// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use tracing::debug;
use tracing::warn;

use crate::backend::Backend;
use crate::backend::DialogKind;
use crate::backend::Id;
use crate::backend::Opts;
use crate::backend::WidgetKind;
use crate::class::ClassRegistry;
use crate::clipboard;
use crate::clipboard::Pasted;
use crate::config::Config;
use crate::error::Error;
use crate::storage::Position;
use crate::storage::TypedChoice;
use crate::value::Value;


/// A combo box storing opaque candidate values while displaying
/// their textual renderings.
///
/// Like [`ListBox`][crate::ListBox], this is a composition: a
/// [`TypedChoice`] owns the data and the adapter mirrors it into the
/// toolkit display, truncating renderings to the configured display
/// limit as combo style widgets conventionally do.
#[derive(Debug)]
pub struct ComboBox {
  /// The toolkit combo display.
  widget: Id,
  /// The candidate values and current selection.
  choice: TypedChoice,
  /// The configuration the widget was constructed with.
  config: Config,
}

impl ComboBox {
  /// Create a new `ComboBox` inside the given parent.
  pub fn new(backend: &mut dyn Backend, parent: Option<Id>, config: Config) -> Result<Self, Error> {
    let widget = backend.construct(
      WidgetKind::Combo,
      Opts {
        parent,
        ..Default::default()
      },
    )?;

    Ok(Self {
      widget,
      choice: TypedChoice::new(),
      config,
    })
  }

  /// Retrieve the [`Id`] of the combo display.
  pub fn id(&self) -> Id {
    self.widget
  }

  /// Retrieve the data holding core of the widget.
  pub fn choice(&self) -> &TypedChoice {
    &self.choice
  }

  /// Retrieve an iterator over the candidate values.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.choice.values()
  }

  /// Retrieve the number of candidate values.
  pub fn count(&self) -> usize {
    self.choice.count()
  }

  /// Retrieve the index of the currently selected candidate, if any.
  pub fn current(&self) -> Option<usize> {
    self.choice.current()
  }

  /// Retrieve the currently selected value, if any.
  pub fn selected(&self) -> Option<&Value> {
    self.choice.selected()
  }

  /// Replace all candidate values, selecting the first one.
  pub fn set_values(&mut self, backend: &mut dyn Backend, values: Vec<Value>) -> Result<(), Error> {
    self.choice.set_values(values);
    self.sync(backend)
  }

  /// Insert a candidate value at the given position.
  pub fn insert(
    &mut self,
    backend: &mut dyn Backend,
    position: Position,
    value: Value,
  ) -> Result<usize, Error> {
    let index = self.choice.insert(position, value)?;
    self.sync(backend)?;
    Ok(index)
  }

  /// Remove the candidate at the given index.
  pub fn delete(&mut self, backend: &mut dyn Backend, index: usize) -> Result<(), Error> {
    self.choice.delete(index)?;
    self.sync(backend)
  }

  /// Replace the candidate at the given index.
  pub fn replace(
    &mut self,
    backend: &mut dyn Backend,
    index: usize,
    value: Value,
  ) -> Result<(), Error> {
    self.choice.replace(index, value)?;
    self.sync(backend)
  }

  /// Make the candidate at the given index the current selection.
  pub fn select(&mut self, backend: &mut dyn Backend, index: usize) -> Result<(), Error> {
    self.choice.select(index)?;
    backend.combo_select(self.widget, self.choice.current())
  }

  /// Make the given value the current selection, inserting it at the
  /// end first unless an equal candidate already exists.
  pub fn select_value(&mut self, backend: &mut dyn Backend, value: Value) -> Result<usize, Error> {
    let index = match self.choice.position_of(&value) {
      Some(index) => index,
      None => self.choice.insert(Position::End, value)?,
    };
    self.choice.select(index)?;
    self.sync(backend)?;
    Ok(index)
  }

  /// Remove all candidates and clear the selection.
  pub fn clear(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    self.choice.clear();
    self.sync(backend)
  }

  /// Serialize the single selected value onto the system clipboard,
  /// replacing any prior clipboard content.
  ///
  /// An empty selection is rejected with a dialog.
  pub async fn save_to_clipboard(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    let value = match self.choice.selected() {
      Some(value) => value.clone(),
      None => {
        debug!("copy requires a selected candidate");
        let _ = backend
          .show_dialog(
            DialogKind::Error,
            "Empty list!",
            "Select at least one item!",
            Some(self.widget),
          )
          .await;
        return Ok(())
      },
    };

    let payload = clipboard::encode(&value)?;
    backend.clipboard_write(&payload)
  }

  /// Make the clipboard content the current selection.
  ///
  /// The decoded value (or foreign text) is treated as a single
  /// candidate: it is deduplicated against the existing candidates,
  /// appended if new, and selected. A payload referencing an unknown
  /// class aborts the paste with an error dialog.
  pub async fn paste_from_clipboard(
    &mut self,
    backend: &mut dyn Backend,
    registry: &ClassRegistry,
  ) -> Result<(), Error> {
    let text = backend.clipboard_read()?;
    let value = match clipboard::decode(&text, registry) {
      Ok(Pasted::Decoded(value)) => value,
      Ok(Pasted::Raw(text)) => Value::Str(text),
      Err(error) => {
        warn!(%error, "refusing to paste undecodable payload");
        let _ = backend
          .show_dialog(
            DialogKind::Error,
            "Paste error",
            &error.to_string(),
            Some(self.widget),
          )
          .await;
        return Ok(())
      },
    };

    let _index = self.select_value(backend, value)?;
    Ok(())
  }

  /// Mirror the data holding core into the toolkit display.
  fn sync(&self, backend: &mut dyn Backend) -> Result<(), Error> {
    let rows = self
      .choice
      .entries()
      .iter()
      .map(|entry| truncated(entry.display(), self.config.display_limit))
      .collect::<Vec<_>>();
    backend.combo_set_rows(self.widget, &rows)?;
    backend.combo_select(self.widget, self.choice.current())
  }
}


/// Truncate a display rendering to at most `limit` characters.
fn truncated(display: &str, limit: usize) -> String {
  display.chars().take(limit).collect()
}
