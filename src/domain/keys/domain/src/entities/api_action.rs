// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Permission that can be granted to a Typesense API key
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
pub enum ApiAction {
    #[serde(rename = "documents:get")]
    #[strum(serialize = "documents:get")]
    DocumentsGet,
    #[serde(rename = "documents:search")]
    #[strum(serialize = "documents:search")]
    DocumentsSearch,
    #[serde(rename = "documents:create")]
    #[strum(serialize = "documents:create")]
    DocumentsCreate,
    #[serde(rename = "documents:upsert")]
    #[strum(serialize = "documents:upsert")]
    DocumentsUpsert,
    #[serde(rename = "documents:update")]
    #[strum(serialize = "documents:update")]
    DocumentsUpdate,
    #[serde(rename = "documents:delete")]
    #[strum(serialize = "documents:delete")]
    DocumentsDelete,
    #[serde(rename = "documents:import")]
    #[strum(serialize = "documents:import")]
    DocumentsImport,

    #[serde(rename = "collections:get")]
    #[strum(serialize = "collections:get")]
    CollectionsGet,
    #[serde(rename = "collections:list")]
    #[strum(serialize = "collections:list")]
    CollectionsList,
    #[serde(rename = "collections:create")]
    #[strum(serialize = "collections:create")]
    CollectionsCreate,
    #[serde(rename = "collections:delete")]
    #[strum(serialize = "collections:delete")]
    CollectionsDelete,

    #[serde(rename = "aliases:get")]
    #[strum(serialize = "aliases:get")]
    AliasesGet,
    #[serde(rename = "aliases:list")]
    #[strum(serialize = "aliases:list")]
    AliasesList,
    #[serde(rename = "aliases:create")]
    #[strum(serialize = "aliases:create")]
    AliasesCreate,
    #[serde(rename = "aliases:delete")]
    #[strum(serialize = "aliases:delete")]
    AliasesDelete,

    #[serde(rename = "synonyms:get")]
    #[strum(serialize = "synonyms:get")]
    SynonymsGet,
    #[serde(rename = "synonyms:list")]
    #[strum(serialize = "synonyms:list")]
    SynonymsList,
    #[serde(rename = "synonyms:create")]
    #[strum(serialize = "synonyms:create")]
    SynonymsCreate,
    #[serde(rename = "synonyms:delete")]
    #[strum(serialize = "synonyms:delete")]
    SynonymsDelete,

    #[serde(rename = "keys:get")]
    #[strum(serialize = "keys:get")]
    KeysGet,
    #[serde(rename = "keys:list")]
    #[strum(serialize = "keys:list")]
    KeysList,
    #[serde(rename = "keys:create")]
    #[strum(serialize = "keys:create")]
    KeysCreate,
    #[serde(rename = "keys:delete")]
    #[strum(serialize = "keys:delete")]
    KeysDelete,

    #[serde(rename = "debug:list")]
    #[strum(serialize = "debug:list")]
    DebugList,
    #[serde(rename = "metrics.json:list")]
    #[strum(serialize = "metrics.json:list")]
    MetricsList,
}

impl ApiAction {
    /// Actions that together make a key read-only
    pub const READ_ONLY: [ApiAction; 2] = [Self::DocumentsGet, Self::DocumentsSearch];

    pub fn as_str(self) -> &'static str {
        self.into()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::DocumentsGet => "Get Documents",
            Self::DocumentsSearch => "Search Documents",
            Self::DocumentsCreate => "Create Documents",
            Self::DocumentsUpsert => "Upsert Documents",
            Self::DocumentsUpdate => "Update Documents",
            Self::DocumentsDelete => "Delete Documents",
            Self::DocumentsImport => "Import Documents",
            Self::CollectionsGet => "Get Collections",
            Self::CollectionsList => "List Collections",
            Self::CollectionsCreate => "Create Collections",
            Self::CollectionsDelete => "Delete Collections",
            Self::AliasesGet => "Get Aliases",
            Self::AliasesList => "List Aliases",
            Self::AliasesCreate => "Create Aliases",
            Self::AliasesDelete => "Delete Aliases",
            Self::SynonymsGet => "Get Synonyms",
            Self::SynonymsList => "List Synonyms",
            Self::SynonymsCreate => "Create Synonyms",
            Self::SynonymsDelete => "Delete Synonyms",
            Self::KeysGet => "Get Keys",
            Self::KeysList => "List Keys",
            Self::KeysCreate => "Create Keys",
            Self::KeysDelete => "Delete Keys",
            Self::DebugList => "Debug Access",
            Self::MetricsList => "Metrics Access",
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
