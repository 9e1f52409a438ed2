// Copyright (C) 2025 Daniel Mueller (deso@posteo.net)
// SPDX-License-Identifier: GPL-3.0-or-later

//! The serialization boundary between in-memory values and the
//! system clipboard's text only transport.
//!
//! Values cross the boundary as base64 wrapped CBOR of their
//! [`Packed`][crate::convert::Packed] form. The format is stable
//! under the application's own write-then-read; content written by
//! anything else simply decodes as [`Pasted::Raw`] text.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use tracing::debug;

use crate::class::ClassRegistry;
use crate::convert::pack;
use crate::convert::unpack;
use crate::convert::Packed;
use crate::error::Error;
use crate::value::Value;


/// The outcome of decoding clipboard content.
///
/// The fallback to plain text is a modeled outcome, not an error:
/// clipboard content routinely originates outside the application.
#[derive(Clone, Debug, PartialEq)]
pub enum Pasted {
  /// The content was produced by [`encode`] and decoded back into a
  /// value.
  Decoded(Value),
  /// The content is opaque text from elsewhere.
  Raw(String),
}


/// Encode a value into a text safe clipboard payload.
pub fn encode(value: &Value) -> Result<String, Error> {
  let packed = pack(value)?;
  let bytes = serde_cbor::to_vec(&packed)?;
  Ok(STANDARD.encode(bytes))
}


/// Decode clipboard content, distinguishing the crate's own payload
/// format from foreign text.
///
/// Malformed payloads degrade to [`Pasted::Raw`]. A well-formed
/// payload referencing an unknown class, however, is a real failure:
/// it is reported as [`Error::UnknownClass`] rather than silently
/// treated as text, because treating it as text would drop data.
pub fn decode(text: &str, registry: &ClassRegistry) -> Result<Pasted, Error> {
  let bytes = match STANDARD.decode(text) {
    Ok(bytes) => bytes,
    Err(error) => {
      debug!(%error, "clipboard content is not base64; treating as text");
      return Ok(Pasted::Raw(text.to_string()))
    },
  };

  let packed = match serde_cbor::from_slice::<Packed>(&bytes) {
    Ok(packed) => packed,
    Err(error) => {
      debug!(%error, "clipboard content is not a packed value; treating as text");
      return Ok(Pasted::Raw(text.to_string()))
    },
  };

  let value = unpack(packed, registry)?;
  Ok(Pasted::Decoded(value))
}
