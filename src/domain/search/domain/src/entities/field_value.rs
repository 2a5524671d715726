// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{
    Duration,
    Local,
    LocalResult,
    NaiveDate,
    NaiveDateTime,
    NaiveTime,
    Offset,
    TimeZone,
};
use thiserror::Error;

use crate::FieldKind;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A column value as read from a row, before normalization into a document
#[derive(Debug, Clone, PartialEq)]
pub enum RawFieldValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
}

impl From<bool> for RawFieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for RawFieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawFieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawFieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawFieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<NaiveDate> for RawFieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveTime> for RawFieldValue {
    fn from(value: NaiveTime) -> Self {
        Self::Time(value)
    }
}

impl From<NaiveDateTime> for RawFieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

impl std::fmt::Display for RawFieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{v}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl FieldKind {
    /// Normalizes a row value into the JSON value the search engine expects
    /// for this kind.
    ///
    /// Temporal kinds are converted to epoch seconds by reading their calendar
    /// fields in the **local** time zone of the process, so the same row can
    /// produce different values on hosts with different zone settings.
    #[allow(clippy::wrong_self_convention)]
    pub fn from_value(self, raw: &RawFieldValue) -> Result<serde_json::Value, ValueConversionError> {
        let err = |reason: &'static str| ValueConversionError {
            kind: self,
            value: raw.to_string(),
            reason,
        };

        match self {
            Self::String | Self::Email | Self::Url | Self::PhoneNumber => {
                Ok(serde_json::Value::String(raw.to_string()))
            }

            Self::Integer => {
                let v = to_integer(raw).map_err(err)?;
                let v = i32::try_from(v).map_err(|_| err("out of 32-bit integer range"))?;
                Ok(v.into())
            }

            Self::Long => {
                let v = to_integer(raw).map_err(err)?;
                Ok(v.into())
            }

            Self::Float => {
                let v = to_float(raw).ok_or_else(|| err("not a number"))?;
                serde_json::Number::from_f64(v)
                    .map(serde_json::Value::Number)
                    .ok_or_else(|| err("not a finite number"))
            }

            Self::Boolean => Ok(is_truthy(raw).into()),

            Self::Date | Self::DateTime => {
                let naive = match raw {
                    RawFieldValue::Date(d) => d.and_time(NaiveTime::default()),
                    RawFieldValue::DateTime(dt) => *dt,
                    _ => return Err(err("not a date")),
                };
                local_epoch_seconds(&naive)
                    .map(Into::into)
                    .ok_or_else(|| err("cannot be placed in the local time zone"))
            }

            Self::Time => {
                let RawFieldValue::Time(t) = raw else {
                    return Err(err("not a time of day"));
                };
                local_epoch_seconds(&NaiveDate::default().and_time(*t))
                    .map(Into::into)
                    .ok_or_else(|| err("cannot be placed in the local time zone"))
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

// 2^63, exactly representable
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn to_integer(raw: &RawFieldValue) -> Result<i64, &'static str> {
    match raw {
        RawFieldValue::Bool(v) => Ok(i64::from(*v)),
        RawFieldValue::Int(v) => Ok(*v),
        RawFieldValue::Float(v) if v.is_finite() => {
            let v = v.trunc();
            if !(-I64_BOUND..I64_BOUND).contains(&v) {
                return Err("out of 64-bit integer range");
            }
            #[allow(clippy::cast_possible_truncation)]
            Ok(v as i64)
        }
        RawFieldValue::Text(v) => v.trim().parse().map_err(|_| "not an integer"),
        _ => Err("not an integer"),
    }
}

fn to_float(raw: &RawFieldValue) -> Option<f64> {
    match raw {
        RawFieldValue::Bool(v) => Some(f64::from(u8::from(*v))),
        #[allow(clippy::cast_precision_loss)]
        RawFieldValue::Int(v) => Some(*v as f64),
        RawFieldValue::Float(v) => Some(*v),
        RawFieldValue::Text(v) => v.trim().parse().ok(),
        _ => None,
    }
}

fn is_truthy(raw: &RawFieldValue) -> bool {
    match raw {
        RawFieldValue::Null => false,
        RawFieldValue::Bool(v) => *v,
        RawFieldValue::Int(v) => *v != 0,
        RawFieldValue::Float(v) => *v != 0.0,
        RawFieldValue::Text(v) => !v.is_empty(),
        RawFieldValue::Date(_) | RawFieldValue::Time(_) | RawFieldValue::DateTime(_) => true,
    }
}

// Ambiguous wall-clock times (DST fold) resolve to the earlier instant. Times
// skipped by a forward transition are read with the offset in effect before
// the gap, which lands them past it.
fn local_epoch_seconds(naive: &NaiveDateTime) -> Option<i64> {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => Some(dt.timestamp()),
        LocalResult::None => {
            let before_gap = naive.checked_sub_signed(Duration::days(1))?;
            let offset = Local.offset_from_local_datetime(&before_gap).earliest()?;
            Some((*naive - offset.fix()).and_utc().timestamp())
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Cannot convert value '{value}' for {kind} field: {reason}")]
pub struct ValueConversionError {
    pub kind: FieldKind,
    pub value: String,
    pub reason: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
