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

use crate::{ApiKeyId, ApiKeyRecord};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait ApiKeyRepository: Send + Sync {
    /// Inserts a record without an id under a freshly assigned one, or
    /// replaces the record stored under its id. Returns the stored record.
    async fn save_api_key(
        &self,
        record: &ApiKeyRecord,
    ) -> Result<ApiKeyRecord, SaveApiKeyRecordError>;

    async fn get_api_key(&self, id: ApiKeyId) -> Result<ApiKeyRecord, GetApiKeyError>;

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, InternalError>;

    async fn delete_api_key(&self, id: ApiKeyId) -> Result<(), DeleteApiKeyError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveApiKeyRecordError {
    #[error(transparent)]
    Duplicate(ApiKeyDuplicateSecretError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("API key not saved, another key already holds the secret starting with '{secret_prefix}'")]
pub struct ApiKeyDuplicateSecretError {
    pub secret_prefix: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetApiKeyError {
    #[error(transparent)]
    NotFound(ApiKeyNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("API key with id '{id}' not found")]
pub struct ApiKeyNotFoundError {
    pub id: ApiKeyId,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum DeleteApiKeyError {
    #[error(transparent)]
    NotFound(ApiKeyNotFoundError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
