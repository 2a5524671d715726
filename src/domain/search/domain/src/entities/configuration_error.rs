// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use thiserror::Error;

use crate::FieldKind;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A schema declaration is structurally invalid. This is a programming error
/// in the declaration and is never defaulted away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Collection definition has no name, please set a non-empty collection name")]
    MissingCollectionName,

    #[error("Collection '{collection_name}' has no backing entity model")]
    MissingBackingEntity { collection_name: String },

    #[error(
        "Collection '{collection_name}' can't be backed by abstract entity model '{entity_name}'"
    )]
    AbstractBackingEntity {
        collection_name: String,
        entity_name: &'static str,
    },

    #[error("Collection '{collection_name}' has no fields, please add at least one field")]
    NoFields { collection_name: String },

    #[error("Please set the `name` for the {kind} field")]
    UnresolvedFieldName { kind: FieldKind },

    #[error(
        "You can only index empty values for an optional field, please set `optional` for the \
         {kind} field"
    )]
    EmptyValuesOnRequiredField { kind: FieldKind },

    #[error(
        "You can only facet the empty value flag of the {kind} field if you are indexing empty \
         values, please set `index_empty_values` or unset `facet_index_empty_values`"
    )]
    FacetEmptyValuesWithoutIndexing { kind: FieldKind },

    #[error("Field '{field_name}' is declared more than once in collection '{collection_name}'")]
    DuplicateFieldName {
        collection_name: String,
        field_name: String,
    },

    #[error("Sort field '{sort_field}' does not exist in collection '{collection_name}'")]
    SortFieldNotFound {
        collection_name: String,
        sort_field: String,
    },

    #[error(
        "Sort field '{sort_field}' in collection '{collection_name}' must be numeric, got a \
         {kind} field instead"
    )]
    SortFieldNotNumeric {
        collection_name: String,
        sort_field: String,
        kind: FieldKind,
    },

    #[error("Sort field '{sort_field}' cannot be optional in collection '{collection_name}'")]
    SortFieldOptional {
        collection_name: String,
        sort_field: String,
    },
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
