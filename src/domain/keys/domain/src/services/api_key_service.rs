// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;
use thiserror::Error;

use crate::{
    ApiKeyDuplicateSecretError,
    ApiKeyId,
    ApiKeyRecord,
    DeleteApiKeyError,
    GetApiKeyError,
    SyncApiKeyError,
};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_API_KEY_LIFETIME_DAYS: i64 = 365;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ApiKeyService: Send + Sync {
    /// Synchronizes the record with the search server, then stores it.
    /// Nothing is stored if synchronization fails.
    async fn save_api_key(&self, record: ApiKeyRecord) -> Result<ApiKeyRecord, SaveApiKeyError>;

    async fn get_api_key(&self, id: ApiKeyId) -> Result<ApiKeyRecord, GetApiKeyError>;

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, InternalError>;

    /// Removes the local record only; the remote key is left in place
    async fn delete_api_key(&self, id: ApiKeyId) -> Result<(), DeleteApiKeyError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveApiKeyError {
    #[error(transparent)]
    Sync(#[from] SyncApiKeyError),

    #[error(transparent)]
    Duplicate(ApiKeyDuplicateSecretError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
