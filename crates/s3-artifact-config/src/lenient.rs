//! Leniently parsed integers.
//!
//! Run ids and run attempts arrive as strings. A malformed value does not fail
//! configuration; it becomes the not-a-number sentinel instead.
//!
//! Parsing reads an optional run of leading whitespace, an optional sign and
//! then as many decimal digits as are present; anything after the digits is
//! ignored. `"42"` and `"42abc"` both give `42`, `"abc"` gives the sentinel.

use std::fmt;

use serde::{Serialize, Serializer};

/// An integer that may be the not-a-number sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LenientInt(Option<i64>);

impl LenientInt {
  /// The not-a-number sentinel.
  pub const NAN: Self = Self(None);

  pub const fn new(value: i64) -> Self {
    Self(Some(value))
  }

  /// Parse the leading integer of `input`.
  pub fn parse(input: &str) -> Self {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first().copied() {
      Some(b'-') => (true, &s[1..]),
      Some(b'+') => (false, &s[1..]),
      _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
      return Self::NAN;
    }

    let digits = &rest[..digits_len];
    let value = match digits.parse::<i64>() {
      Ok(v) if negative => -v,
      Ok(v) => v,
      // Too many digits for i64
      Err(_) if negative => i64::MIN,
      Err(_) => i64::MAX,
    };

    Self(Some(value))
  }

  pub fn is_nan(self) -> bool {
    self.0.is_none()
  }
}

impl fmt::Display for LenientInt {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.0 {
      Some(v) => write!(f, "{}", v),
      None => f.write_str("NaN"),
    }
  }
}

/// The sentinel serializes as `null`.
impl Serialize for LenientInt {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self.0 {
      Some(v) => serializer.serialize_i64(v),
      None => serializer.serialize_none(),
    }
  }
}
