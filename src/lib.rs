// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

#![allow(
  clippy::let_unit_value,
  clippy::redundant_field_names,
)]
#![warn(
  future_incompatible,
  missing_copy_implementations,
  missing_debug_implementations,
  missing_docs,
  rust_2018_compatibility,
  rust_2018_idioms,
  trivial_numeric_casts,
  unreachable_pub,
  unstable_features,
  unused_import_braces,
  unused_qualifications,
  unused_results,
)]

//! A crate providing the infrastructure for generating editable
//! forms for arbitrary structured objects on top of a pluggable
//! widget backend. It strives for being completely agnostic of the
//! underlying toolkit: all display work happens through a single
//! capability interface, [`Backend`], and all widgets are
//! compositions of plain data holders with thin display forwarding
//! adapters.
//!
//! The core pieces are the typed storage containers ([`TypedList`],
//! [`TypedChoice`]) that keep original values behind their textual
//! renderings, the [`clipboard`] codec round-tripping such values
//! through the system clipboard, the [`convert`] module turning
//! object descriptions ([`ObjectInfo`]) into a serialization ready
//! form and back, and the form generation ([`ObjectFrame`]) and
//! edit-in-place ([`ComboEdit`]) flows built on top.

mod backend;
mod class;
pub mod clipboard;
mod combobox;
mod config;
pub mod convert;
mod edit;
mod error;
mod form;
mod listbox;
mod scalar;
mod storage;
mod value;

pub use self::backend::Backend;
pub use self::backend::DialogKind;
pub use self::backend::Id;
pub use self::backend::Opts;
pub use self::backend::WidgetKind;
pub use self::class::ClassHandle;
pub use self::class::ClassRegistry;
pub use self::class::ClassSpec;
pub use self::class::Describe;
pub use self::class::FieldSpec;
pub use self::clipboard::Pasted;
pub use self::combobox::ComboBox;
pub use self::config::Config;
pub use self::convert::ObjectInfo;
pub use self::edit::ComboEdit;
pub use self::edit::EditState;
pub use self::edit::ObjectEditor;
pub use self::error::Error;
pub use self::form::FieldInput;
pub use self::form::ObjectFrame;
pub use self::listbox::ListBox;
pub use self::scalar::ObjectScalar;
pub use self::storage::Direction;
pub use self::storage::Entry;
pub use self::storage::Position;
pub use self::storage::TypedChoice;
pub use self::storage::TypedList;
pub use self::value::FormField;
pub use self::value::Value;
pub use self::value::ValueKind;

/// A module providing custom derive functionality for `classwiz`
/// related traits.
///
/// The module merely re-reports the procedural macros provided by the
/// `classwiz_derive` crate.
#[cfg(feature = "derive")]
pub mod derive {
  pub use classwiz_derive::*;
}
