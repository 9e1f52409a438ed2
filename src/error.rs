// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

use thiserror::Error as ThisError;

use crate::value::ValueKind;


/// The error type used throughout the crate.
#[derive(Debug, ThisError)]
pub enum Error {
  /// An index was outside the bounds of the container it was used
  /// with. This is a contract violation on the caller's side and is
  /// never recovered internally.
  #[error("index {index} is out of bounds for length {len}")]
  OutOfBounds {
    /// The offending index.
    index: usize,
    /// The length of the container at the time of the access.
    len: usize,
  },
  /// A class reference could not be resolved through the
  /// [`ClassRegistry`][crate::ClassRegistry].
  #[error("unknown class `{0}`")]
  UnknownClass(String),
  /// An object of one class was used where a different class was
  /// required.
  #[error("an object of class `{actual}` cannot fill a `{expected}` form")]
  ClassMismatch {
    /// The class the operation expected.
    expected: String,
    /// The class actually encountered.
    actual: String,
  },
  /// A keyword argument required for reconstructing an object was not
  /// present.
  #[error("missing keyword argument `{0}`")]
  MissingKwarg(String),
  /// A value of one kind was encountered where another kind was
  /// required.
  #[error("expected a {expected} value, found a {actual} value")]
  KindMismatch {
    /// The kind the operation expected.
    expected: ValueKind,
    /// The kind actually encountered.
    actual: ValueKind,
  },
  /// Textual form input could not be parsed as the kind the field
  /// requires.
  #[error("invalid {kind} input in field `{field}`")]
  Invalid {
    /// The name of the field holding the input.
    field: String,
    /// The kind the field requires.
    kind: ValueKind,
  },
  /// A value graph exceeded the supported nesting depth.
  #[error("value nesting exceeds the supported depth")]
  DepthExceeded,
  /// A value could not be serialized into its transport form.
  #[error("failed to serialize value")]
  Serialize(#[from] serde_cbor::Error),
  /// The widget backend reported a failure.
  #[error("backend failure: {0}")]
  Backend(String),
}
