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
use internal_error::InternalError;
use time_source::SystemTimeSource;
use typesense_keys::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct ApiKeyServiceImpl {
    api_key_synchronizer: Arc<dyn ApiKeySynchronizer>,
    api_key_repo: Arc<dyn ApiKeyRepository>,
    time_source: Arc<dyn SystemTimeSource>,
}

#[component(pub)]
#[interface(dyn ApiKeyService)]
impl ApiKeyServiceImpl {
    pub fn new(
        api_key_synchronizer: Arc<dyn ApiKeySynchronizer>,
        api_key_repo: Arc<dyn ApiKeyRepository>,
        time_source: Arc<dyn SystemTimeSource>,
    ) -> Self {
        Self {
            api_key_synchronizer,
            api_key_repo,
            time_source,
        }
    }

    fn apply_first_save_defaults(&self, record: &mut ApiKeyRecord) {
        let now = self.time_source.now();

        record.created_on.get_or_insert(now);
        record
            .expires_at
            .get_or_insert_with(|| now + chrono::Duration::days(DEFAULT_API_KEY_LIFETIME_DAYS));
    }
}

#[async_trait::async_trait]
impl ApiKeyService for ApiKeyServiceImpl {
    #[tracing::instrument(level = "info", skip_all, fields(key_id = ?record.id))]
    async fn save_api_key(
        &self,
        mut record: ApiKeyRecord,
    ) -> Result<ApiKeyRecord, SaveApiKeyError> {
        if record.id.is_none() {
            self.apply_first_save_defaults(&mut record);
        }

        self.api_key_synchronizer
            .sync_before_save(&mut record)
            .await?;

        let saved = self
            .api_key_repo
            .save_api_key(&record)
            .await
            .map_err(|e| match e {
                SaveApiKeyRecordError::Duplicate(e) => SaveApiKeyError::Duplicate(e),
                SaveApiKeyRecordError::Internal(e) => SaveApiKeyError::Internal(e),
            })?;

        tracing::info!(
            key_id = ?saved.id,
            secret_prefix = ?saved.secret_prefix(),
            read_only = saved.read_only(),
            "Saved API key",
        );

        Ok(saved)
    }

    async fn get_api_key(&self, id: ApiKeyId) -> Result<ApiKeyRecord, GetApiKeyError> {
        self.api_key_repo.get_api_key(id).await
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, InternalError> {
        self.api_key_repo.list_api_keys().await
    }

    #[tracing::instrument(level = "info", skip_all, fields(id = %id))]
    async fn delete_api_key(&self, id: ApiKeyId) -> Result<(), DeleteApiKeyError> {
        self.api_key_repo.delete_api_key(id).await
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
