// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! The typed storage containers backing the list box and combo box
//! widgets.
//!
//! Containers store opaque [`Value`]s, each paired with the display
//! string derived from it, and uphold one central invariant: the
//! backing sequence and the displayed rows describe the same entries
//! at the same indices at all times. All mutating operations either
//! complete fully or leave the container untouched.

use crate::error::Error;
use crate::value::Value;


/// One opaque value plus its cached display string; the atomic unit
/// stored by the typed containers.
///
/// The display string is derived from the value at construction and
/// never diverges from it.
#[derive(Clone, Debug, PartialEq)]
pub struct Entry {
  /// The stored value.
  value: Value,
  /// The display rendering of the stored value.
  display: String,
}

impl Entry {
  /// Create a new `Entry`, deriving the display string from the
  /// value.
  pub fn new(value: Value) -> Self {
    let display = value.to_string();
    Self { value, display }
  }

  /// Retrieve the stored value.
  pub fn value(&self) -> &Value {
    &self.value
  }

  /// Retrieve the display rendering of the stored value.
  pub fn display(&self) -> &str {
    &self.display
  }
}


/// A position at which to insert into an ordered container.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Position {
  /// Before the entry currently at the given index.
  At(usize),
  /// After the last entry.
  End,
}

impl Position {
  /// Resolve the position into a concrete index for a container of
  /// the given length, failing with [`Error::OutOfBounds`] for an
  /// index past the end.
  pub(crate) fn resolve(self, len: usize) -> Result<usize, Error> {
    match self {
      Self::At(index) if index <= len => Ok(index),
      Self::At(index) => Err(Error::OutOfBounds { index, len }),
      Self::End => Ok(len),
    }
  }
}

impl From<usize> for Position {
  fn from(index: usize) -> Self {
    Self::At(index)
  }
}


/// The direction in which to move an entry.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
  /// Towards the front of the container.
  Backward,
  /// Towards the back of the container.
  Forward,
}


/// An ordered, index addressable sequence of opaque values.
///
/// This is the data holding core of the list box widget, free of any
/// display concerns. Mutating operations report what they did in
/// terms of display rows, allowing a thin adapter to forward the
/// exact same changes to a toolkit widget.
#[derive(Debug, Default)]
pub struct TypedList {
  /// The stored entries.
  entries: Vec<Entry>,
}

impl TypedList {
  /// Create a new, empty `TypedList`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert values at the given position, returning the index of the
  /// first inserted entry.
  ///
  /// Either all values are inserted or, for an out of bounds
  /// position, none are.
  pub fn insert<I>(&mut self, position: Position, values: I) -> Result<usize, Error>
  where
    I: IntoIterator<Item = Value>,
  {
    let index = position.resolve(self.entries.len())?;

    for (offset, value) in values.into_iter().enumerate() {
      self.entries.insert(index + offset, Entry::new(value));
    }
    Ok(index)
  }

  /// Retrieve clones of the stored values in `[first, last)`.
  ///
  /// A `last` of `None` means the end of the sequence. Out of range
  /// bounds clamp to the sequence, mirroring slice taking in dynamic
  /// languages.
  pub fn get(&self, first: usize, last: Option<usize>) -> Vec<Value> {
    let last = last.unwrap_or(self.entries.len()).min(self.entries.len());
    let first = first.min(last);

    self.entries[first..last]
      .iter()
      .map(|entry| entry.value().clone())
      .collect()
  }

  /// Remove the entries at the given indices, which may be
  /// non-contiguous, unsorted, or duplicated, in one logical
  /// operation.
  ///
  /// The result describes the performed removal as inclusive
  /// `(first, last)` index runs, in application order, with each run
  /// already adjusted for the ones removed before it. Replaying these
  /// runs as range deletions against a display widget reproduces the
  /// removal exactly.
  ///
  /// If any index is out of bounds, nothing is removed.
  pub fn delete(&mut self, indices: &[usize]) -> Result<Vec<(usize, usize)>, Error> {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if let Some(&last) = sorted.last() {
      if last >= self.entries.len() {
        return Err(Error::OutOfBounds {
          index: last,
          len: self.entries.len(),
        })
      }
    }

    let mut runs = Vec::new();
    let mut removed = 0;
    let mut start = 0;

    while start < sorted.len() {
      // Extend the run for as long as the indices stay contiguous.
      let mut end = start;
      while end + 1 < sorted.len() && sorted[end + 1] == sorted[end] + 1 {
        end += 1;
      }

      // Earlier removals shifted everything after them to the left,
      // so adjust the run accordingly before applying it.
      let first = sorted[start] - removed;
      let last = sorted[end] - removed;
      self.entries.drain(first..=last).for_each(drop);

      runs.push((first, last));
      removed += last - first + 1;
      start = end + 1;
    }
    Ok(runs)
  }

  /// Swap the entry at `index` with its neighbor in the given
  /// direction, returning the entry's new index.
  ///
  /// Moving the first entry backward or the last entry forward is a
  /// no-op, reported as `None`.
  pub fn move_entry(&mut self, index: usize, direction: Direction) -> Result<Option<usize>, Error> {
    let len = self.entries.len();
    if index >= len {
      return Err(Error::OutOfBounds { index, len })
    }

    let target = match direction {
      Direction::Backward if index == 0 => return Ok(None),
      Direction::Backward => index - 1,
      Direction::Forward if index + 1 == len => return Ok(None),
      Direction::Forward => index + 1,
    };

    self.entries.swap(index, target);
    Ok(Some(target))
  }

  /// Retrieve the number of stored entries.
  pub fn count(&self) -> usize {
    self.entries.len()
  }

  /// Check whether the list is empty.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Remove all entries.
  pub fn clear(&mut self) {
    self.entries.clear()
  }

  /// Retrieve the stored entries.
  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  /// Retrieve the entry at the given index, if any.
  pub fn entry(&self, index: usize) -> Option<&Entry> {
    self.entries.get(index)
  }

  /// Retrieve an iterator over the stored values.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.entries.iter().map(Entry::value)
  }
}


/// An ordered sequence of candidate values plus a single current
/// selection.
///
/// This is the data holding core of the combo box widget. The
/// current selection, when set, always denotes a valid entry;
/// operations that reshape the sequence keep it denoting the same
/// logical entry where possible and clear it when that entry goes
/// away.
#[derive(Debug, Default)]
pub struct TypedChoice {
  /// The candidate entries.
  entries: Vec<Entry>,
  /// The index of the currently selected entry, if any.
  current: Option<usize>,
}

impl TypedChoice {
  /// Create a new, empty `TypedChoice`.
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace all candidate values.
  ///
  /// The first entry becomes the current selection; an empty
  /// replacement clears it.
  pub fn set_values<I>(&mut self, values: I)
  where
    I: IntoIterator<Item = Value>,
  {
    self.entries = values.into_iter().map(Entry::new).collect();
    self.current = if self.entries.is_empty() {
      None
    } else {
      Some(0)
    };
  }

  /// Insert a candidate value at the given position, returning the
  /// index it was inserted at.
  ///
  /// A selection at or after the position shifts along with the entry
  /// it denotes.
  pub fn insert(&mut self, position: Position, value: Value) -> Result<usize, Error> {
    let index = position.resolve(self.entries.len())?;
    self.entries.insert(index, Entry::new(value));

    if let Some(current) = self.current {
      if index <= current {
        self.current = Some(current + 1);
      }
    }
    Ok(index)
  }

  /// Remove the candidate at the given index.
  ///
  /// Removing the currently selected entry clears the selection; a
  /// selection after the removed entry shifts along with the entry it
  /// denotes.
  pub fn delete(&mut self, index: usize) -> Result<(), Error> {
    if index >= self.entries.len() {
      return Err(Error::OutOfBounds {
        index,
        len: self.entries.len(),
      })
    }

    let _removed = self.entries.remove(index);

    self.current = match self.current {
      Some(current) if current == index => None,
      Some(current) if current > index => Some(current - 1),
      current => current,
    };
    Ok(())
  }

  /// Replace the candidate at the given index, leaving the selection
  /// untouched.
  pub fn replace(&mut self, index: usize, value: Value) -> Result<(), Error> {
    let len = self.entries.len();
    match self.entries.get_mut(index) {
      Some(entry) => {
        *entry = Entry::new(value);
        Ok(())
      },
      None => Err(Error::OutOfBounds { index, len }),
    }
  }

  /// Make the entry at the given index the current selection.
  pub fn select(&mut self, index: usize) -> Result<(), Error> {
    if index >= self.entries.len() {
      return Err(Error::OutOfBounds {
        index,
        len: self.entries.len(),
      })
    }

    self.current = Some(index);
    Ok(())
  }

  /// Clear the current selection.
  pub fn deselect(&mut self) {
    self.current = None
  }

  /// Retrieve the index of the currently selected entry, if any.
  pub fn current(&self) -> Option<usize> {
    self.current
  }

  /// Retrieve the currently selected value, if any.
  pub fn selected(&self) -> Option<&Value> {
    self
      .current
      .and_then(|index| self.entries.get(index))
      .map(Entry::value)
  }

  /// Retrieve the index of the first candidate equal to the given
  /// value, if any.
  pub fn position_of(&self, value: &Value) -> Option<usize> {
    self.entries.iter().position(|entry| entry.value() == value)
  }

  /// Retrieve the number of candidates.
  pub fn count(&self) -> usize {
    self.entries.len()
  }

  /// Check whether there are no candidates.
  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Remove all candidates and clear the selection.
  pub fn clear(&mut self) {
    self.entries.clear();
    self.current = None;
  }

  /// Retrieve the candidate entries.
  pub fn entries(&self) -> &[Entry] {
    &self.entries
  }

  /// Retrieve an iterator over the candidate values.
  pub fn values(&self) -> impl Iterator<Item = &Value> {
    self.entries.iter().map(Entry::value)
  }
}
