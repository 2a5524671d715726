// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::{
    ConfigurationError,
    FieldDescriptor,
    RawFieldValue,
    SchemaDefinition,
    ValueConversionError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Read access to the attributes of a single entity row
pub trait DocumentSource {
    /// Missing attributes read as [`RawFieldValue::Null`]
    fn attribute_value(&self, attribute: &str) -> RawFieldValue;
}

impl DocumentSource for BTreeMap<String, RawFieldValue> {
    fn attribute_value(&self, attribute: &str) -> RawFieldValue {
        self.get(attribute).cloned().unwrap_or(RawFieldValue::Null)
    }
}

impl DocumentSource for HashMap<String, RawFieldValue> {
    fn attribute_value(&self, attribute: &str) -> RawFieldValue {
        self.get(attribute).cloned().unwrap_or(RawFieldValue::Null)
    }
}

pub type SearchDocument = serde_json::Map<String, serde_json::Value>;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

impl SchemaDefinition {
    /// Builds the document to upsert for one row.
    ///
    /// Each descriptor reads its `source_attribute`, falling back to the
    /// attribute it was registered under. Null values of optional fields are
    /// left out of the document. Fields that index empty values also get
    /// their `is_<name>_null` flag set.
    pub fn to_document(
        &self,
        source: &dyn DocumentSource,
    ) -> Result<SearchDocument, BuildDocumentError> {
        let mut document = SearchDocument::new();

        for (attribute, descriptor) in self.fields() {
            let name = descriptor.resolved_name(Some(attribute))?;
            let raw = source.attribute_value(descriptor.source_attribute().unwrap_or(attribute));

            if descriptor.index_empty_values() {
                document.insert(
                    FieldDescriptor::empty_value_flag_name(name),
                    is_empty(&raw).into(),
                );
            }

            if raw == RawFieldValue::Null {
                if descriptor.optional() {
                    continue;
                }
                return Err(MissingFieldValueError {
                    field_name: name.to_string(),
                }
                .into());
            }

            document.insert(name.to_string(), descriptor.kind().from_value(&raw)?);
        }

        Ok(document)
    }
}

fn is_empty(raw: &RawFieldValue) -> bool {
    match raw {
        RawFieldValue::Null => true,
        RawFieldValue::Text(v) => v.is_empty(),
        _ => false,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, PartialEq, Eq)]
pub enum BuildDocumentError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Conversion(#[from] ValueConversionError),

    #[error(transparent)]
    MissingValue(#[from] MissingFieldValueError),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Required field '{field_name}' has no value")]
pub struct MissingFieldValueError {
    pub field_name: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
