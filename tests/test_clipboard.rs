// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

mod common;

use classwiz::clipboard::decode;
use classwiz::clipboard::encode;
use classwiz::ClassRegistry;
use classwiz::ComboBox;
use classwiz::Config;
use classwiz::DialogKind;
use classwiz::Error;
use classwiz::ListBox;
use classwiz::Pasted;
use classwiz::Position;
use classwiz::Value;

use common::line;
use common::registry;
use common::sketch;
use common::TestBackend;


#[test]
fn encode_decode_round_trips_nested_objects() {
  let registry = registry();
  let value = Value::Object(sketch(&registry));

  let payload = encode(&value).unwrap();
  let pasted = decode(&payload, &registry).unwrap();
  assert_eq!(pasted, Pasted::Decoded(value));
}

#[test]
fn foreign_text_decodes_as_raw() {
  let registry = registry();
  // Not base64 at all.
  let pasted = decode("hello world", &registry).unwrap();
  assert_eq!(pasted, Pasted::Raw("hello world".to_string()));

  // Valid base64, but not a packed value underneath.
  let pasted = decode("aGVsbG8=", &registry).unwrap();
  assert_eq!(pasted, Pasted::Raw("aGVsbG8=".to_string()));
}

#[test]
fn unknown_class_in_payload_is_an_error() {
  let registry = registry();
  let payload = encode(&Value::Object(line(&registry, "l"))).unwrap();

  let empty = ClassRegistry::new();
  let result = decode(&payload, &empty);
  assert!(matches!(result, Err(Error::UnknownClass(..))));
}

#[tokio::test]
async fn copy_and_paste_reproduce_multiple_rows() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let mut source = ListBox::new(&mut backend, None, Config::default()).unwrap();
  let values = vec![
    Value::from("first"),
    Value::Object(line(&registry, "copied")),
    Value::Int(42),
  ];
  let _index = source
    .insert(&mut backend, Position::End, values.clone())
    .unwrap();

  backend.select_rows(source.id(), &[0, 1, 2]);
  source.save_to_clipboard(&mut backend).await.unwrap();

  let mut target = ListBox::new(&mut backend, None, Config::default()).unwrap();
  target
    .paste_from_clipboard(&mut backend, &registry)
    .await
    .unwrap();

  // A multi row copy is pasted element-wise, in order.
  let pasted = target.values().cloned().collect::<Vec<_>>();
  assert_eq!(pasted, values);
}

#[tokio::test]
async fn copy_and_paste_reproduce_a_single_row() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let mut source = ListBox::new(&mut backend, None, Config::default()).unwrap();
  let value = Value::Object(line(&registry, "solo"));
  let _index = source
    .insert(&mut backend, Position::End, vec![value.clone()])
    .unwrap();

  backend.select_rows(source.id(), &[0]);
  source.save_to_clipboard(&mut backend).await.unwrap();

  let mut target = ListBox::new(&mut backend, None, Config::default()).unwrap();
  target
    .paste_from_clipboard(&mut backend, &registry)
    .await
    .unwrap();

  assert_eq!(target.count(), 1);
  assert_eq!(target.values().next(), Some(&value));
}

#[tokio::test]
async fn copying_without_a_selection_shows_a_dialog() {
  let mut backend = TestBackend::new();
  let mut listbox = ListBox::new(&mut backend, None, Config::default()).unwrap();
  let _index = listbox
    .insert(&mut backend, Position::End, vec![Value::from("a")])
    .unwrap();

  listbox.save_to_clipboard(&mut backend).await.unwrap();

  assert_eq!(backend.clipboard, None);
  assert_eq!(
    backend.dialogs,
    vec![(
      DialogKind::Error,
      "Empty list!".to_string(),
      "Select at least one item!".to_string(),
    )],
  );
}

#[tokio::test]
async fn pasting_foreign_text_appends_it_as_a_string() {
  let registry = registry();
  let mut backend = TestBackend::new();
  backend.clipboard = Some("copied elsewhere".to_string());

  let mut listbox = ListBox::new(&mut backend, None, Config::default()).unwrap();
  listbox
    .paste_from_clipboard(&mut backend, &registry)
    .await
    .unwrap();

  assert_eq!(
    listbox.values().cloned().collect::<Vec<_>>(),
    vec![Value::from("copied elsewhere")],
  );
  assert_eq!(backend.dialogs, Vec::new());
}

#[tokio::test]
async fn pasting_an_unknown_class_aborts_with_a_dialog() {
  let registry = registry();
  let mut backend = TestBackend::new();
  backend.clipboard = Some(encode(&Value::Object(line(&registry, "l"))).unwrap());

  let known = ClassRegistry::new();
  let mut listbox = ListBox::new(&mut backend, None, Config::default()).unwrap();
  listbox
    .paste_from_clipboard(&mut backend, &known)
    .await
    .unwrap();

  assert_eq!(listbox.count(), 0);
  assert_eq!(backend.dialogs.len(), 1);
  assert_eq!(backend.dialogs[0].0, DialogKind::Error);
  assert_eq!(backend.dialogs[0].1, "Paste error");
}

#[tokio::test]
async fn combo_copy_and_paste_deduplicate_and_select() {
  let registry = registry();
  let mut backend = TestBackend::new();

  let value = Value::Object(line(&registry, "shared"));
  let mut source = ComboBox::new(&mut backend, None, Config::default()).unwrap();
  source
    .set_values(&mut backend, vec![value.clone()])
    .unwrap();
  source.save_to_clipboard(&mut backend).await.unwrap();

  let mut target = ComboBox::new(&mut backend, None, Config::default()).unwrap();
  target
    .set_values(&mut backend, vec![Value::from("existing")])
    .unwrap();

  // First paste appends the new candidate and selects it.
  target
    .paste_from_clipboard(&mut backend, &registry)
    .await
    .unwrap();
  assert_eq!(target.count(), 2);
  assert_eq!(target.current(), Some(1));
  assert_eq!(target.selected(), Some(&value));

  // A second paste of the same payload only moves the selection.
  target
    .paste_from_clipboard(&mut backend, &registry)
    .await
    .unwrap();
  assert_eq!(target.count(), 2);
  assert_eq!(target.current(), Some(1));
}

#[tokio::test]
async fn combo_copy_without_a_selection_shows_a_dialog() {
  let mut backend = TestBackend::new();
  let mut combo = ComboBox::new(&mut backend, None, Config::default()).unwrap();

  combo.save_to_clipboard(&mut backend).await.unwrap();

  assert_eq!(backend.clipboard, None);
  assert_eq!(backend.dialogs.len(), 1);
  assert_eq!(backend.dialogs[0].1, "Empty list!");
}
