// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use crate::{ConfigurationError, FieldDocument, FieldKind};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Declaration of a single searchable attribute.
///
/// Instances are only obtainable through [`FieldDescriptor::builder`] or
/// [`FieldDescriptor::of`], so the empty-value flag rules always hold:
/// - `index_empty_values` requires `optional`
/// - `facet_index_empty_values` requires `index_empty_values`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    kind: FieldKind,
    index: bool,
    facet: bool,
    optional: bool,
    name: Option<String>,
    source_attribute: Option<String>,
    index_empty_values: bool,
    facet_index_empty_values: bool,
    token_separators: BTreeSet<char>,
}

#[bon::bon]
impl FieldDescriptor {
    #[builder]
    pub fn new(
        #[builder(start_fn)] kind: FieldKind,
        #[builder(default = true)] index: bool,
        #[builder(default)] facet: bool,
        #[builder(default)] optional: bool,
        #[builder(into)] name: Option<String>,
        #[builder(into)] source_attribute: Option<String>,
        #[builder(default)] index_empty_values: bool,
        #[builder(default)] facet_index_empty_values: bool,
        token_separators: Option<BTreeSet<char>>,
    ) -> Result<Self, ConfigurationError> {
        if index_empty_values && !optional {
            return Err(ConfigurationError::EmptyValuesOnRequiredField { kind });
        }
        if facet_index_empty_values && !index_empty_values {
            return Err(ConfigurationError::FacetEmptyValuesWithoutIndexing { kind });
        }

        Ok(Self {
            kind,
            index,
            facet,
            optional,
            name,
            source_attribute,
            index_empty_values,
            facet_index_empty_values,
            token_separators: token_separators
                .unwrap_or_else(|| kind.default_token_separators()),
        })
    }
}

impl FieldDescriptor {
    /// Descriptor with all flags at their defaults
    pub fn of(kind: FieldKind) -> Self {
        Self {
            kind,
            index: true,
            facet: false,
            optional: false,
            name: None,
            source_attribute: None,
            index_empty_values: false,
            facet_index_empty_values: false,
            token_separators: kind.default_token_separators(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn index(&self) -> bool {
        self.index
    }

    pub fn facet(&self) -> bool {
        self.facet
    }

    pub fn optional(&self) -> bool {
        self.optional
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn source_attribute(&self) -> Option<&str> {
        self.source_attribute.as_deref()
    }

    pub fn index_empty_values(&self) -> bool {
        self.index_empty_values
    }

    pub fn facet_index_empty_values(&self) -> bool {
        self.facet_index_empty_values
    }

    pub fn token_separators(&self) -> &BTreeSet<char> {
        &self.token_separators
    }

    /// Explicit name wins over the name inferred from the registration
    pub fn resolved_name<'a>(
        &'a self,
        inferred_name: Option<&'a str>,
    ) -> Result<&'a str, ConfigurationError> {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(inferred_name.filter(|n| !n.is_empty()))
            .ok_or(ConfigurationError::UnresolvedFieldName { kind: self.kind })
    }

    pub fn empty_value_flag_name(field_name: &str) -> String {
        format!("is_{field_name}_null")
    }

    /// Expands the declaration into one entry, or two when empty values are
    /// indexed: the value itself followed by its `is_<name>_null` flag.
    pub fn to_field_documents(
        &self,
        inferred_name: Option<&str>,
    ) -> Result<Vec<FieldDocument>, ConfigurationError> {
        let name = self.resolved_name(inferred_name)?;

        let mut documents = vec![FieldDocument {
            name: name.to_string(),
            field_type: self.kind.field_type(),
            facet: self.facet,
            index: self.index,
            optional: self.optional,
        }];

        if self.index_empty_values {
            documents.push(FieldDocument {
                name: Self::empty_value_flag_name(name),
                field_type: FieldKind::Boolean.field_type(),
                facet: self.facet_index_empty_values,
                index: true,
                optional: false,
            });
        }

        Ok(documents)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
