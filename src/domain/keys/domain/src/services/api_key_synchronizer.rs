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

use crate::{ApiKeyId, ApiKeyRecord, TypesenseClientError};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Pre-save hook that mirrors a key record on the search server.
///
/// New records get a freshly created remote key. Records that were saved
/// before have their remote key rotated: the old key is deleted and a new one
/// created. Either way the record leaves with the new secret.
///
/// The list, delete and create calls are not guarded by any lock: two
/// concurrent saves of the same record race, and may delete each other's
/// fresh key or leave an orphan behind.
#[async_trait::async_trait]
pub trait ApiKeySynchronizer: Send + Sync {
    async fn sync_before_save(&self, record: &mut ApiKeyRecord) -> Result<(), SyncApiKeyError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SyncApiKeyError {
    #[error(transparent)]
    Remote(RemoteSyncError),

    #[error(transparent)]
    Consistency(ConsistencyError),

    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum RemoteKeyOperation {
    Create,
    Retrieve,
    Delete,
}

#[derive(Error, Debug)]
#[error("Failed to {operation} API key on the Typesense server")]
pub struct RemoteSyncError {
    pub operation: RemoteKeyOperation,
    #[source]
    pub source: TypesenseClientError,
}

/// The stored key is unknown to the server: it was removed by hand, or the
/// server was reset to a fresh state.
#[derive(Error, Debug, PartialEq, Eq)]
#[error(
    "The Typesense API key with prefix '{secret_prefix}' was not found in the Typesense server. \
     It has either been deleted manually or Typesense was restarted from a fresh state. Please \
     delete the key from the primary database and create a new one."
)]
pub struct ConsistencyError {
    pub key_id: Option<ApiKeyId>,
    pub secret_prefix: String,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
