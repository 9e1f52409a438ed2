// Copyright (C) 2025 Daniel Mueller <deso@posteo.net>
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(unused)]

use std::collections::HashMap;
use std::collections::VecDeque;
use std::sync::Once;

use async_trait::async_trait;

use classwiz::Backend;
use classwiz::ClassRegistry;
use classwiz::ClassSpec;
use classwiz::DialogKind;
use classwiz::Error;
use classwiz::FieldSpec;
use classwiz::Id;
use classwiz::ObjectInfo;
use classwiz::Opts;
use classwiz::Value;
use classwiz::ValueKind;
use classwiz::WidgetKind;


/// Initialize the tracing subscriber once for the test binary.
fn init_tracing() {
  static INIT: Once = Once::new();

  INIT.call_once(|| {
    let _result = tracing_subscriber::fmt()
      .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
      .with_test_writer()
      .try_init();
  });
}


/// A scriptable in-memory implementation of the [`Backend`]
/// capability set, recording everything the widgets do with it.
#[derive(Debug, Default)]
pub struct TestBackend {
  /// The next widget index to hand out.
  next_idx: usize,
  /// A log of all `construct` invocations, in order.
  pub constructs: Vec<(WidgetKind, Opts)>,
  /// The display rows of list and combo widgets.
  pub rows: HashMap<Id, Vec<String>>,
  /// A log of all `rows_delete` invocations, in order.
  pub range_deletes: Vec<(Id, usize, usize)>,
  /// The row selections of list widgets.
  pub selections: HashMap<Id, Vec<usize>>,
  /// The current selections of combo widgets.
  pub combo_current: HashMap<Id, Option<usize>>,
  /// The texts of entry and spin box widgets.
  pub entry_texts: HashMap<Id, String>,
  /// The values of boolean state holders.
  pub bool_states: HashMap<Id, bool>,
  /// The simulated system clipboard.
  pub clipboard: Option<String>,
  /// A log of all dialogs shown, in order.
  pub dialogs: Vec<(DialogKind, String, String)>,
  /// Scripted answers for yes/no/cancel dialogs; `Some(true)` is
  /// assumed when exhausted.
  pub answers: VecDeque<Option<bool>>,
}

impl TestBackend {
  /// Create a new `TestBackend`.
  pub fn new() -> Self {
    init_tracing();
    Self::default()
  }

  /// Script the answer for the next yes/no/cancel dialog.
  pub fn answer_with(&mut self, answer: Option<bool>) {
    self.answers.push_back(answer)
  }

  /// Pretend the user selected the given rows of a list widget.
  pub fn select_rows(&mut self, widget: Id, rows: &[usize]) {
    let _prev = self.selections.insert(widget, rows.to_vec());
  }

  /// Retrieve the display rows of the given widget.
  pub fn rows_of(&self, widget: Id) -> Vec<String> {
    self.rows.get(&widget).cloned().unwrap_or_default()
  }

  /// Retrieve the kinds of all constructed widgets, in construction
  /// order.
  pub fn constructed_kinds(&self) -> Vec<WidgetKind> {
    self.constructs.iter().map(|(kind, _)| *kind).collect()
  }
}

#[async_trait(?Send)]
impl Backend for TestBackend {
  fn construct(&mut self, kind: WidgetKind, opts: Opts) -> Result<Id, Error> {
    let id = Id::new(self.next_idx);
    self.next_idx += 1;
    self.constructs.push((kind, opts));
    Ok(id)
  }

  async fn show_dialog(
    &mut self,
    kind: DialogKind,
    title: &str,
    message: &str,
    _parent: Option<Id>,
  ) -> Option<bool> {
    self
      .dialogs
      .push((kind, title.to_string(), message.to_string()));

    match kind {
      DialogKind::YesNoCancel => self.answers.pop_front().unwrap_or(Some(true)),
      DialogKind::Info | DialogKind::Error => None,
    }
  }

  fn clipboard_read(&mut self) -> Result<String, Error> {
    Ok(self.clipboard.clone().unwrap_or_default())
  }

  fn clipboard_write(&mut self, text: &str) -> Result<(), Error> {
    self.clipboard = Some(text.to_string());
    Ok(())
  }

  fn rows_insert(&mut self, widget: Id, index: usize, rows: &[String]) -> Result<(), Error> {
    let existing = self.rows.entry(widget).or_default();
    if index > existing.len() {
      return Err(Error::Backend(format!("row index {index} is out of range")))
    }

    for (offset, row) in rows.iter().enumerate() {
      existing.insert(index + offset, row.clone());
    }
    Ok(())
  }

  fn rows_delete(&mut self, widget: Id, first: usize, last: usize) -> Result<(), Error> {
    let existing = self.rows.entry(widget).or_default();
    if first > last || last >= existing.len() {
      return Err(Error::Backend(format!(
        "row range {first}..={last} is out of range"
      )))
    }

    existing.drain(first..=last).for_each(drop);
    self.range_deletes.push((widget, first, last));
    Ok(())
  }

  fn rows_clear(&mut self, widget: Id) -> Result<(), Error> {
    self.rows.entry(widget).or_default().clear();
    Ok(())
  }

  fn selection(&self, widget: Id) -> Result<Vec<usize>, Error> {
    Ok(self.selections.get(&widget).cloned().unwrap_or_default())
  }

  fn select(&mut self, widget: Id, rows: &[usize]) -> Result<(), Error> {
    let _prev = self.selections.insert(widget, rows.to_vec());
    Ok(())
  }

  fn combo_set_rows(&mut self, widget: Id, rows: &[String]) -> Result<(), Error> {
    let _prev = self.rows.insert(widget, rows.to_vec());
    Ok(())
  }

  fn combo_select(&mut self, widget: Id, index: Option<usize>) -> Result<(), Error> {
    let _prev = self.combo_current.insert(widget, index);
    Ok(())
  }

  fn entry_text(&self, widget: Id) -> Result<String, Error> {
    Ok(self.entry_texts.get(&widget).cloned().unwrap_or_default())
  }

  fn set_entry_text(&mut self, widget: Id, text: &str) -> Result<(), Error> {
    let _prev = self.entry_texts.insert(widget, text.to_string());
    Ok(())
  }

  fn bool_state(&self, widget: Id) -> Result<bool, Error> {
    Ok(self.bool_states.get(&widget).copied().unwrap_or_default())
  }

  fn set_bool_state(&mut self, widget: Id, value: bool) -> Result<(), Error> {
    let _prev = self.bool_states.insert(widget, value);
    Ok(())
  }
}


/// Create a registry with the classes the tests work with.
pub fn registry() -> ClassRegistry {
  let mut registry = ClassRegistry::new();
  let _point = registry.add(
    ClassSpec::new("Point")
      .field(FieldSpec::new("x", ValueKind::Float))
      .field(FieldSpec::new("y", ValueKind::Float)),
  );
  let _line = registry.add(
    ClassSpec::new("Line")
      .field(FieldSpec::new("start", ValueKind::Object))
      .field(FieldSpec::new("end", ValueKind::Object))
      .field(FieldSpec::new("label", ValueKind::Str)),
  );
  let _sketch = registry.add(
    ClassSpec::new("Sketch")
      .field(FieldSpec::new("name", ValueKind::Str))
      .field(FieldSpec::new("lines", ValueKind::List))
      .field(FieldSpec::new("visible", ValueKind::Bool).with_default(true)),
  );
  registry
}

/// Describe a point.
pub fn point(registry: &ClassRegistry, x: f64, y: f64) -> ObjectInfo {
  ObjectInfo::new(registry.resolve("Point").unwrap())
    .with("x", x)
    .with("y", y)
}

/// Describe a line between two points.
pub fn line(registry: &ClassRegistry, label: &str) -> ObjectInfo {
  ObjectInfo::new(registry.resolve("Line").unwrap())
    .with("start", point(registry, 0.0, 0.0))
    .with("end", point(registry, 3.0, 4.0))
    .with("label", label)
}

/// Describe a sketch: an object graph three levels deep with mixed
/// scalar and sequence keyword arguments.
pub fn sketch(registry: &ClassRegistry) -> ObjectInfo {
  ObjectInfo::new(registry.resolve("Sketch").unwrap())
    .with("name", "main")
    .with(
      "lines",
      vec![
        Value::Object(line(registry, "diagonal")),
        Value::Object(line(registry, "base")),
      ],
    )
    .with("visible", true)
}
