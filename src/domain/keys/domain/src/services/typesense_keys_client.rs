// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ApiAction;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub type RemoteApiKeyId = u64;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Key management endpoints of the search server
#[cfg_attr(any(feature = "testing", test), mockall::automock)]
#[async_trait::async_trait]
pub trait TypesenseKeysClient: Send + Sync {
    async fn create_key(
        &self,
        request: &CreateApiKeyRequest,
    ) -> Result<CreatedApiKey, TypesenseClientError>;

    /// Lists keys known to the server. Only value prefixes are returned.
    async fn retrieve_keys(&self) -> Result<ApiKeysListing, TypesenseClientError>;

    async fn delete_key(&self, id: RemoteApiKeyId) -> Result<(), TypesenseClientError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Wire documents
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateApiKeyRequest {
    pub actions: Vec<ApiAction>,
    pub description: String,
    pub collections: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// The only response that carries the full key value
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedApiKey {
    pub id: RemoteApiKeyId,
    pub value: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

impl std::fmt::Debug for CreatedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedApiKey")
            .field("id", &self.id)
            .field("value", &"<redacted>")
            .field("description", &self.description)
            .field("actions", &self.actions)
            .field("collections", &self.collections)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteApiKey {
    pub id: RemoteApiKeyId,
    pub value_prefix: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actions: Vec<String>,
    #[serde(default)]
    pub collections: Vec<String>,
    #[serde(default)]
    pub expires_at: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKeysListing {
    pub keys: Vec<RemoteApiKey>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum TypesenseClientError {
    #[error(transparent)]
    Api(TypesenseApiError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

/// Non-success response of the server
#[derive(Error, Debug, PartialEq, Eq)]
#[error("Typesense responded with status {status}: {message}")]
pub struct TypesenseApiError {
    pub status: u16,
    pub message: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
