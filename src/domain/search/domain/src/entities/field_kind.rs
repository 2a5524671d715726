// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Column types understood by the search engine
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
)]
pub enum FieldType {
    #[serde(rename = "string")]
    #[strum(serialize = "string")]
    String,

    #[serde(rename = "int32")]
    #[strum(serialize = "int32")]
    Int32,

    #[serde(rename = "int64")]
    #[strum(serialize = "int64")]
    Int64,

    #[serde(rename = "float")]
    #[strum(serialize = "float")]
    Float,

    #[serde(rename = "bool")]
    #[strum(serialize = "bool")]
    Bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Closed set of declarable field kinds. Several kinds share a wire type and
/// differ only in tokenization defaults or in how row values are converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
pub enum FieldKind {
    String,
    Email,
    Url,
    Integer,
    Long,
    Float,
    Boolean,
    PhoneNumber,
    Date,
    Time,
    DateTime,
}

impl FieldKind {
    pub const EMAIL_TOKEN_SEPARATORS: &'static [char] = &['+', '-', '@', '.'];
    pub const PHONE_NUMBER_TOKEN_SEPARATORS: &'static [char] = &['(', ')', '-'];

    pub fn field_type(self) -> FieldType {
        match self {
            Self::String | Self::Email | Self::Url | Self::PhoneNumber => FieldType::String,
            Self::Integer => FieldType::Int32,
            Self::Long | Self::Date | Self::Time | Self::DateTime => FieldType::Int64,
            Self::Float => FieldType::Float,
            Self::Boolean => FieldType::Bool,
        }
    }

    /// Kinds that can serve as the collection's default sorting field.
    /// Temporal kinds are stored as 64-bit epoch seconds and qualify too.
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            Self::Integer | Self::Long | Self::Float | Self::Date | Self::Time | Self::DateTime
        )
    }

    pub fn default_token_separators(self) -> BTreeSet<char> {
        let separators: &[char] = match self {
            Self::Email => Self::EMAIL_TOKEN_SEPARATORS,
            Self::PhoneNumber => Self::PHONE_NUMBER_TOKEN_SEPARATORS,
            _ => &[],
        };
        separators.iter().copied().collect()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
