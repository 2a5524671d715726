// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

use crate::FieldType;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// One entry of a collection's `fields` list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDocument {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub facet: bool,
    pub index: bool,
    pub optional: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Document accepted by the collection-creation call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledSchema {
    pub name: String,
    pub fields: Vec<FieldDocument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_sorting_field: Option<String>,
}

impl CompiledSchema {
    /// The collection-creation request body
    pub fn to_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    pub fn field(&self, name: &str) -> Option<&FieldDocument> {
        self.fields.iter().find(|f| f.name == name)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
