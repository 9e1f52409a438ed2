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
use crate::storage::Direction;
use crate::storage::Position;
use crate::storage::TypedList;
use crate::value::Value;


/// A scrollable list box storing opaque values while displaying their
/// textual renderings.
///
/// The widget is a composition: a [`TypedList`] owns the data, and
/// this adapter forwards every mutation to the toolkit display
/// through the [`Backend`] capability set, keeping row `i` and entry
/// `i` describing the same value at all times.
#[derive(Debug)]
pub struct ListBox {
  /// The frame containing the list display and its scrollbar.
  frame: Id,
  /// The toolkit list display.
  widget: Id,
  /// The scrollbar attached to the list display.
  scrollbar: Id,
  /// The stored entries.
  list: TypedList,
  /// The configuration the widget was constructed with.
  config: Config,
}

impl ListBox {
  /// Create a new `ListBox` inside the given parent, composing a
  /// frame, the list display, and a scrollbar.
  pub fn new(backend: &mut dyn Backend, parent: Option<Id>, config: Config) -> Result<Self, Error> {
    let frame = backend.construct(
      WidgetKind::Frame,
      Opts {
        parent,
        ..Default::default()
      },
    )?;
    let widget = backend.construct(
      WidgetKind::ListBox,
      Opts {
        parent: Some(frame),
        ..Default::default()
      },
    )?;
    let scrollbar = backend.construct(
      WidgetKind::Scrollbar,
      Opts {
        parent: Some(frame),
        ..Default::default()
      },
    )?;

    Ok(Self {
      frame,
      widget,
      scrollbar,
      list: TypedList::new(),
      config,
    })
  }

  /// Retrieve the [`Id`] of the list display.
  pub fn id(&self) -> Id {
    self.widget
  }

  /// Retrieve the [`Id`] of the containing frame.
  pub fn frame(&self) -> Id {
    self.frame
  }

  /// Retrieve the [`Id`] of the scrollbar.
  pub fn scrollbar(&self) -> Id {
    self.scrollbar
  }

  /// Retrieve the data holding core of the widget.
  pub fn list(&self) -> &TypedList {
    &self.list
  }

  /// Retrieve an iterator over the stored values.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.list.values()
  }

  /// Retrieve the number of stored values.
  pub fn count(&self) -> usize {
    self.list.count()
  }

  /// Insert values at the given position, updating store and display
  /// together.
  pub fn insert(
    &mut self,
    backend: &mut dyn Backend,
    position: Position,
    values: Vec<Value>,
  ) -> Result<usize, Error> {
    let before = self.list.count();
    let index = self.list.insert(position, values)?;
    let count = self.list.count() - before;

    let rows = self.list.entries()[index..index + count]
      .iter()
      .map(|entry| entry.display().to_string())
      .collect::<Vec<_>>();
    backend.rows_insert(self.widget, index, &rows)?;
    Ok(index)
  }

  /// Remove the entries at the given indices, updating store and
  /// display together.
  ///
  /// The display sees one range deletion per contiguous run of
  /// indices, exactly as computed by [`TypedList::delete`].
  pub fn delete(&mut self, backend: &mut dyn Backend, indices: &[usize]) -> Result<(), Error> {
    let runs = self.list.delete(indices)?;
    for (first, last) in runs {
      backend.rows_delete(self.widget, first, last)?;
    }
    Ok(())
  }

  /// Remove all entries, updating store and display together.
  pub fn clear(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    self.list.clear();
    backend.rows_clear(self.widget)
  }

  /// Swap the entry at `index` with its neighbor in the given
  /// direction and re-select it at its new index.
  ///
  /// Moves across the container boundaries are no-ops.
  pub fn move_entry(
    &mut self,
    backend: &mut dyn Backend,
    index: usize,
    direction: Direction,
  ) -> Result<(), Error> {
    match self.list.move_entry(index, direction)? {
      Some(target) => {
        let display = match self.list.entry(target) {
          Some(entry) => entry.display().to_string(),
          None => {
            return Err(Error::OutOfBounds {
              index: target,
              len: self.list.count(),
            })
          },
        };
        backend.rows_delete(self.widget, index, index)?;
        backend.rows_insert(self.widget, target, &[display])?;
        backend.select(self.widget, &[target])
      },
      None => Ok(()),
    }
  }

  /// Move the single selected entry in the given direction.
  ///
  /// Anything but a single row selection is rejected with a dialog.
  pub async fn move_selection(
    &mut self,
    backend: &mut dyn Backend,
    direction: Direction,
  ) -> Result<(), Error> {
    let selection = backend.selection(self.widget)?;
    if selection.len() == 1 {
      self.move_entry(backend, selection[0], direction)
    } else {
      debug!(rows = selection.len(), "move requires a single selected row");
      let _ = backend
        .show_dialog(
          DialogKind::Error,
          "Selection error",
          "Select ONE item!",
          Some(self.widget),
        )
        .await;
      Ok(())
    }
  }

  /// Remove the selected entries, after asking for confirmation if
  /// the configuration requests it.
  ///
  /// An empty selection is rejected with a dialog.
  pub async fn delete_selected(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    let selection = backend.selection(self.widget)?;
    if selection.is_empty() {
      let _ = backend
        .show_dialog(
          DialogKind::Error,
          "Empty list!",
          "Select at least one item!",
          Some(self.widget),
        )
        .await;
      return Ok(())
    }

    if self.config.confirm_delete {
      let answer = backend
        .show_dialog(
          DialogKind::YesNoCancel,
          "Delete",
          "Delete the selected items?",
          Some(self.widget),
        )
        .await;
      if answer != Some(true) {
        return Ok(())
      }
    }
    self.delete(backend, &selection)
  }

  /// Serialize the selected values onto the system clipboard,
  /// replacing any prior clipboard content.
  ///
  /// A multi row selection is wrapped into a single sequence value;
  /// an empty selection is rejected with a dialog.
  pub async fn save_to_clipboard(&mut self, backend: &mut dyn Backend) -> Result<(), Error> {
    let mut selection = backend.selection(self.widget)?;
    if selection.is_empty() {
      let _ = backend
        .show_dialog(
          DialogKind::Error,
          "Empty list!",
          "Select at least one item!",
          Some(self.widget),
        )
        .await;
      return Ok(())
    }
    selection.sort_unstable();

    let mut values = Vec::with_capacity(selection.len());
    for index in selection {
      let entry = self.list.entry(index).ok_or(Error::OutOfBounds {
        index,
        len: self.list.count(),
      })?;
      values.push(entry.value().clone());
    }

    let value = match values.len() {
      1 => values.remove(0),
      _ => Value::List(values),
    };
    let payload = clipboard::encode(&value)?;
    backend.clipboard_write(&payload)
  }

  /// Append the clipboard content to the list.
  ///
  /// A decoded sequence is appended element-wise; any other decoded
  /// value, as well as foreign text, is appended as one element. A
  /// payload referencing an unknown class aborts the paste with an
  /// error dialog.
  pub async fn paste_from_clipboard(
    &mut self,
    backend: &mut dyn Backend,
    registry: &ClassRegistry,
  ) -> Result<(), Error> {
    let text = backend.clipboard_read()?;
    let pasted = match clipboard::decode(&text, registry) {
      Ok(pasted) => pasted,
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

    let values = match pasted {
      Pasted::Decoded(Value::List(values)) => values,
      Pasted::Decoded(value) => vec![value],
      Pasted::Raw(text) => vec![Value::Str(text)],
    };
    let _index = self.insert(backend, Position::End, values)?;
    Ok(())
  }
}
