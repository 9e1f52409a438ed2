// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

use async_trait::async_trait;

use crate::error::Error;


/// An `Id` uniquely representing a widget constructed by a
/// [`Backend`].
///
/// Ids are opaque to this crate: a backend hands them out from
/// [`construct`][Backend::construct] and receives them back in every
/// widget addressed call. An `Id` must not be used with a backend
/// other than the one that created it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Id {
  idx: usize,
}

impl Id {
  /// Create a new `Id` from a backend internal index.
  pub fn new(idx: usize) -> Self {
    Self { idx }
  }

  /// Retrieve the backend internal index of this `Id`.
  pub fn idx(&self) -> usize {
    self.idx
  }
}

impl Display for Id {
  /// Format the `Id` into the given formatter.
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    write!(f, "{}", self.idx)
  }
}


/// The kind of widget to construct.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum WidgetKind {
  /// A plain container frame.
  Frame,
  /// A static text label.
  Label,
  /// A thin visual separator.
  Separator,
  /// A push button.
  Button,
  /// A button opening a menu.
  MenuButton,
  /// A menu.
  Menu,
  /// A single line text entry.
  Entry,
  /// A numeric entry with increment/decrement steppers.
  SpinBox,
  /// A scrollbar.
  Scrollbar,
  /// A combo box.
  Combo,
  /// A list box.
  ListBox,
  /// A top level window.
  TopLevel,
  /// A check button.
  CheckButton,
  /// An invisible boolean state holder, linkable to a check button.
  BoolState,
}


/// The kind of modal dialog to show.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DialogKind {
  /// An informational message with a single acknowledgment.
  Info,
  /// An error message with a single acknowledgment.
  Error,
  /// A yes/no/cancel question.
  YesNoCancel,
}


/// Options supplied to [`construct`][Backend::construct].
///
/// All options are optional; backends ignore options that do not
/// apply to the kind of widget being constructed.
#[derive(Clone, Debug, Default)]
pub struct Opts {
  /// The widget to nest the new widget into. `None` places the
  /// widget at the top level.
  pub parent: Option<Id>,
  /// Static text, e.g., of a label or button.
  pub text: Option<String>,
  /// Hint text displayed in an empty entry until it receives input.
  pub hint: Option<String>,
  /// The boolean state holder a check button reflects.
  pub state: Option<Id>,
}


/// The capability set the wizard requires from a widget toolkit.
///
/// All of the crate's widgets are compositions over this one
/// interface: they own their data and forward display updates through
/// it, never subclassing any toolkit type. One implementation exists
/// per supported toolkit (including themed variants), and the active
/// one is passed explicitly into every operation that needs it.
#[async_trait(?Send)]
pub trait Backend: Debug {
  /// Construct a widget of the given kind.
  fn construct(&mut self, kind: WidgetKind, opts: Opts) -> Result<Id, Error>;

  /// Show a modal dialog and wait for the user to dismiss it.
  ///
  /// The result is `Some` for a yes/no answer and `None` for a
  /// cancellation or a plain acknowledgment.
  async fn show_dialog(
    &mut self,
    kind: DialogKind,
    title: &str,
    message: &str,
    parent: Option<Id>,
  ) -> Option<bool>;

  /// Read the textual content of the system clipboard.
  fn clipboard_read(&mut self) -> Result<String, Error>;

  /// Replace the content of the system clipboard with the given text.
  fn clipboard_write(&mut self, text: &str) -> Result<(), Error>;

  /// Insert display rows into a list box, before row `index`.
  fn rows_insert(&mut self, widget: Id, index: usize, rows: &[String]) -> Result<(), Error>;

  /// Delete the display rows `first..=last` (an inclusive range) from
  /// a list box in one call.
  fn rows_delete(&mut self, widget: Id, first: usize, last: usize) -> Result<(), Error>;

  /// Delete all display rows of a list box.
  fn rows_clear(&mut self, widget: Id) -> Result<(), Error>;

  /// Retrieve the currently selected rows of a list box, in ascending
  /// order.
  fn selection(&self, widget: Id) -> Result<Vec<usize>, Error>;

  /// Replace the row selection of a list box.
  fn select(&mut self, widget: Id, rows: &[usize]) -> Result<(), Error>;

  /// Replace all candidate rows of a combo box.
  fn combo_set_rows(&mut self, widget: Id, rows: &[String]) -> Result<(), Error>;

  /// Set the selected row of a combo box, or clear the selection.
  fn combo_select(&mut self, widget: Id, index: Option<usize>) -> Result<(), Error>;

  /// Retrieve the text of an entry or spin box.
  fn entry_text(&self, widget: Id) -> Result<String, Error>;

  /// Replace the text of an entry or spin box.
  fn set_entry_text(&mut self, widget: Id, text: &str) -> Result<(), Error>;

  /// Retrieve the value of a boolean state holder.
  fn bool_state(&self, widget: Id) -> Result<bool, Error>;

  /// Set the value of a boolean state holder.
  fn set_bool_state(&mut self, widget: Id, value: bool) -> Result<(), Error>;
}
