// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use dill::*;
use internal_error::InternalError;
use typesense_keys::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryApiKeyRepository {
    state: Arc<Mutex<State>>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Default)]
struct State {
    last_id: ApiKeyId,
    api_keys_by_id: BTreeMap<ApiKeyId, ApiKeyRecord>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[component(pub)]
#[interface(dyn ApiKeyRepository)]
#[scope(Singleton)]
impl InMemoryApiKeyRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(State::default())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ApiKeyRepository for InMemoryApiKeyRepository {
    async fn save_api_key(
        &self,
        record: &ApiKeyRecord,
    ) -> Result<ApiKeyRecord, SaveApiKeyRecordError> {
        let mut guard = self.state.lock().unwrap();

        if let Some(secret_value) = &record.secret_value
            && guard
                .api_keys_by_id
                .values()
                .any(|other| {
                    other.id != record.id && other.secret_value.as_ref() == Some(secret_value)
                })
        {
            return Err(SaveApiKeyRecordError::Duplicate(ApiKeyDuplicateSecretError {
                secret_prefix: record.secret_prefix().unwrap_or_default().to_string(),
            }));
        }

        let id = match record.id {
            Some(id) => {
                guard.last_id = guard.last_id.max(id);
                id
            }
            None => {
                guard.last_id += 1;
                guard.last_id
            }
        };

        let stored = ApiKeyRecord {
            id: Some(id),
            ..record.clone()
        };
        guard.api_keys_by_id.insert(id, stored.clone());

        Ok(stored)
    }

    async fn get_api_key(&self, id: ApiKeyId) -> Result<ApiKeyRecord, GetApiKeyError> {
        let guard = self.state.lock().unwrap();

        guard
            .api_keys_by_id
            .get(&id)
            .cloned()
            .ok_or(GetApiKeyError::NotFound(ApiKeyNotFoundError { id }))
    }

    async fn list_api_keys(&self) -> Result<Vec<ApiKeyRecord>, InternalError> {
        let guard = self.state.lock().unwrap();

        Ok(guard.api_keys_by_id.values().cloned().collect())
    }

    async fn delete_api_key(&self, id: ApiKeyId) -> Result<(), DeleteApiKeyError> {
        let mut guard = self.state.lock().unwrap();

        guard
            .api_keys_by_id
            .remove(&id)
            .map(|_| ())
            .ok_or(DeleteApiKeyError::NotFound(ApiKeyNotFoundError { id }))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
