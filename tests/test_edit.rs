// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use async_trait::async_trait;

use classwiz::Backend;
use classwiz::ClassHandle;
use classwiz::ComboEdit;
use classwiz::Config;
use classwiz::DialogKind;
use classwiz::EditState;
use classwiz::Error;
use classwiz::FieldInput;
use classwiz::ObjectEditor;
use classwiz::ObjectFrame;
use classwiz::ObjectInfo;
use classwiz::Opts;
use classwiz::Value;
use classwiz::WidgetKind;

use common::point;
use common::registry;
use common::TestBackend;


/// An editor returning a scripted result, recording its invocations.
#[derive(Debug, Default)]
struct ScriptedEditor {
  /// The result to report from the next edit.
  result: Option<ObjectInfo>,
  /// The class and prior object of every edit requested so far.
  calls: Vec<(String, Option<ObjectInfo>)>,
}

#[async_trait(?Send)]
impl ObjectEditor for ScriptedEditor {
  async fn edit(
    &mut self,
    _backend: &mut dyn Backend,
    class: ClassHandle,
    old: Option<ObjectInfo>,
  ) -> Result<Option<ObjectInfo>, Error> {
    self.calls.push((class.name().to_string(), old));
    Ok(self.result.clone())
  }
}


#[test]
fn combo_edit_composes_frame_button_and_combo() {
  let mut backend = TestBackend::new();
  let combo_edit = ComboEdit::new(&mut backend, None, Vec::new(), Config::default()).unwrap();

  assert_eq!(
    backend.constructed_kinds(),
    vec![WidgetKind::Frame, WidgetKind::Button, WidgetKind::Combo],
  );
  assert_eq!(backend.constructs[1].1.text.as_deref(), Some("Edit"));
  assert_eq!(combo_edit.state(), EditState::Idle);
}

#[tokio::test]
async fn editing_without_a_selection_shows_a_dialog() {
  let mut backend = TestBackend::new();
  let mut combo_edit = ComboEdit::new(&mut backend, None, Vec::new(), Config::default()).unwrap();
  let mut editor = ScriptedEditor::default();

  combo_edit.edit(&mut backend, &mut editor).await.unwrap();

  assert_eq!(editor.calls, Vec::new());
  assert_eq!(combo_edit.state(), EditState::Idle);
  assert_eq!(backend.dialogs.len(), 1);
  assert_eq!(backend.dialogs[0].0, DialogKind::Error);
  assert_eq!(backend.dialogs[0].2, "Select at least one item!");
}

#[tokio::test]
async fn editing_a_non_object_shows_a_dialog() {
  let mut backend = TestBackend::new();
  let values = vec![Value::from("just text")];
  let mut combo_edit = ComboEdit::new(&mut backend, None, values, Config::default()).unwrap();
  let mut editor = ScriptedEditor::default();

  combo_edit.edit(&mut backend, &mut editor).await.unwrap();

  assert_eq!(editor.calls, Vec::new());
  assert_eq!(backend.dialogs.len(), 1);
  assert_eq!(backend.dialogs[0].1, "Edit error");
}

#[tokio::test]
async fn submitting_an_edit_replaces_the_selected_entry() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let values = vec![
    Value::Object(point(&registry, 1.0, 2.0)),
    Value::Object(point(&registry, 3.0, 4.0)),
  ];
  let mut combo_edit = ComboEdit::new(&mut backend, None, values, Config::default()).unwrap();
  // The first value became the selection.
  assert_eq!(combo_edit.combo().current(), Some(0));

  let edited = point(&registry, 5.0, 6.0);
  let mut editor = ScriptedEditor {
    result: Some(edited.clone()),
    calls: Vec::new(),
  };
  combo_edit.edit(&mut backend, &mut editor).await.unwrap();

  // The editor was started from the previously selected object.
  assert_eq!(
    editor.calls,
    vec![("Point".to_string(), Some(point(&registry, 1.0, 2.0)))],
  );

  let values = combo_edit.combo().values().cloned().collect::<Vec<_>>();
  assert_eq!(
    values,
    vec![
      Value::Object(edited),
      Value::Object(point(&registry, 3.0, 4.0)),
    ],
  );
  assert_eq!(combo_edit.state(), EditState::Idle);
  assert_eq!(backend.dialogs, Vec::new());
}

#[tokio::test]
async fn cancelling_an_edit_changes_nothing() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let values = vec![Value::Object(point(&registry, 1.0, 2.0))];
  let mut combo_edit = ComboEdit::new(&mut backend, None, values.clone(), Config::default()).unwrap();

  let mut editor = ScriptedEditor::default();
  combo_edit.edit(&mut backend, &mut editor).await.unwrap();

  assert_eq!(editor.calls.len(), 1);
  assert_eq!(
    combo_edit.combo().values().cloned().collect::<Vec<_>>(),
    values,
  );
  assert_eq!(combo_edit.state(), EditState::Idle);
}


/// An editor driving a generated form, the way an application wires
/// the pieces together: open a window, pre-fill the form, let the
/// "user" change a field, submit.
#[derive(Debug)]
struct FormEditor {
  config: Config,
}

#[async_trait(?Send)]
impl ObjectEditor for FormEditor {
  async fn edit(
    &mut self,
    backend: &mut dyn Backend,
    class: ClassHandle,
    old: Option<ObjectInfo>,
  ) -> Result<Option<ObjectInfo>, Error> {
    let window = backend.construct(WidgetKind::TopLevel, Opts::default())?;
    let mut form = ObjectFrame::new(backend, Some(window), class, self.config)?;
    if let Some(old) = &old {
      form.load(backend, old)?;
    }

    // Simulate the user doubling the x coordinate.
    if let Some(FieldInput::Number(widget)) = form.input("x") {
      let widget = *widget;
      let text = backend.entry_text(widget)?;
      let doubled = text.parse::<f64>().unwrap() * 2.0;
      backend.set_entry_text(widget, &doubled.to_string())?;
    }
    form.submit(backend).await
  }
}

#[tokio::test]
async fn editing_through_a_generated_form_round_trips() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let values = vec![Value::Object(point(&registry, 1.0, 2.0))];
  let mut combo_edit = ComboEdit::new(&mut backend, None, values, Config::default()).unwrap();

  let mut editor = FormEditor {
    config: Config::default(),
  };
  combo_edit.edit(&mut backend, &mut editor).await.unwrap();

  assert_eq!(
    combo_edit.selected(),
    Some(&Value::Object(point(&registry, 2.0, 2.0))),
  );
  assert_eq!(backend.dialogs, Vec::new());
}
