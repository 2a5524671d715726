// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::*;
use typesense_keys::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ApiKeySynchronizerImpl {
    keys_client: Arc<dyn TypesenseKeysClient>,
    sync_config: Arc<ApiKeySyncConfig>,
}

#[component(pub)]
#[interface(dyn ApiKeySynchronizer)]
impl ApiKeySynchronizerImpl {
    pub fn new(
        keys_client: Arc<dyn TypesenseKeysClient>,
        sync_config: Arc<ApiKeySyncConfig>,
    ) -> Self {
        Self {
            keys_client,
            sync_config,
        }
    }

    /// Deletes the remote key the record currently holds. A key the server
    /// does not know fails the sync in strict mode, and is otherwise forgotten.
    async fn revoke_current_key(&self, record: &mut ApiKeyRecord) -> Result<(), SyncApiKeyError> {
        let listing = self
            .keys_client
            .retrieve_keys()
            .await
            .map_err(|e| remote_error(RemoteKeyOperation::Retrieve, e))?;

        let current_key = record.secret_value.as_deref().and_then(|secret| {
            listing
                .keys
                .iter()
                .find(|key| secret.starts_with(key.value_prefix.as_str()))
        });

        match current_key {
            Some(key) => {
                self.keys_client
                    .delete_key(key.id)
                    .await
                    .map_err(|e| remote_error(RemoteKeyOperation::Delete, e))?;

                tracing::info!(
                    remote_key_id = key.id,
                    secret_prefix = %key.value_prefix,
                    "Deleted previous API key on the Typesense server",
                );
            }
            None if self.sync_config.strict => {
                let err = ConsistencyError {
                    key_id: record.id,
                    secret_prefix: record.secret_prefix().unwrap_or_default().to_string(),
                };
                tracing::error!(
                    key_id = ?err.key_id,
                    secret_prefix = %err.secret_prefix,
                    remote_keys_count = listing.keys.len(),
                    "API key is unknown to the Typesense server",
                );
                return Err(SyncApiKeyError::Consistency(err));
            }
            None => {
                tracing::warn!(
                    key_id = ?record.id,
                    secret_prefix = ?record.secret_prefix(),
                    remote_keys_count = listing.keys.len(),
                    "API key is unknown to the Typesense server, a new one will be issued",
                );
                record.secret_value = None;
            }
        }

        Ok(())
    }

    async fn issue_new_key(&self, record: &mut ApiKeyRecord) -> Result<(), SyncApiKeyError> {
        let request = CreateApiKeyRequest {
            actions: record.actions.iter().copied().collect(),
            description: record.description.clone(),
            collections: record.collection_names(),
            expires_at: record.expires_at_unix(),
        };

        let created = self
            .keys_client
            .create_key(&request)
            .await
            .map_err(|e| remote_error(RemoteKeyOperation::Create, e))?;

        record.secret_value = Some(created.value);

        tracing::info!(
            remote_key_id = created.id,
            secret_prefix = ?record.secret_prefix(),
            collections = %record.collections,
            "Created API key on the Typesense server",
        );

        Ok(())
    }
}

#[async_trait::async_trait]
impl ApiKeySynchronizer for ApiKeySynchronizerImpl {
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(key_id = ?record.id, is_new = record.is_new())
    )]
    async fn sync_before_save(&self, record: &mut ApiKeyRecord) -> Result<(), SyncApiKeyError> {
        if !record.is_new() {
            self.revoke_current_key(record).await?;
        }

        self.issue_new_key(record).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

fn remote_error(operation: RemoteKeyOperation, source: TypesenseClientError) -> SyncApiKeyError {
    tracing::error!(
        %operation,
        error = ?source,
        error_msg = %source,
        "Typesense key request failed",
    );

    SyncApiKeyError::Remote(RemoteSyncError { operation, source })
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
