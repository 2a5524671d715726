// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::ApiAction;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type ApiKeyId = i64;

/// Length of the key prefix the search server reports for its keys
pub const API_KEY_PREFIX_LENGTH: usize = 4;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Local mirror of a Typesense API key.
///
/// `secret_value` is only ever assigned by the server; it stays `None` until
/// the first successful synchronization.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKeyRecord {
    pub id: Option<ApiKeyId>,
    pub created_on: Option<DateTime<Utc>>,
    pub secret_value: Option<String>,
    pub description: String,
    pub actions: BTreeSet<ApiAction>,
    /// Comma-separated collection names
    pub collections: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ApiKeyRecord {
    pub fn new(
        collections: impl Into<String>,
        actions: impl IntoIterator<Item = ApiAction>,
    ) -> Self {
        Self {
            collections: collections.into(),
            actions: actions.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Neither stored locally nor known to the server yet
    pub fn is_new(&self) -> bool {
        self.id.is_none() && self.secret_value.is_none()
    }

    pub fn expires_at_unix(&self) -> Option<i64> {
        self.expires_at.map(|dt| dt.timestamp())
    }

    pub fn collection_names(&self) -> Vec<String> {
        self.collections
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string)
            .collect()
    }

    /// Exactly the document read actions are granted
    pub fn read_only(&self) -> bool {
        self.actions.len() == ApiAction::READ_ONLY.len()
            && ApiAction::READ_ONLY
                .iter()
                .all(|action| self.actions.contains(action))
    }

    /// Leading characters of the secret, safe to log and display
    pub fn secret_prefix(&self) -> Option<&str> {
        self.secret_value.as_deref().map(|secret| {
            let end = secret
                .char_indices()
                .nth(API_KEY_PREFIX_LENGTH)
                .map_or(secret.len(), |(i, _)| i);
            &secret[..end]
        })
    }
}

impl std::fmt::Debug for ApiKeyRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiKeyRecord")
            .field("id", &self.id)
            .field("created_on", &self.created_on)
            .field("secret_prefix", &self.secret_prefix())
            .field("description", &self.description)
            .field("actions", &self.actions)
            .field("collections", &self.collections)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
