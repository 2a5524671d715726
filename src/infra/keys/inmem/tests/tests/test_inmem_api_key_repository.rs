// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::{Catalog, CatalogBuilder};
use pretty_assertions::assert_eq;
use typesense_keys::*;
use typesense_keys_inmem::InMemoryApiKeyRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_no_api_keys_initially() {
    let harness = InMemoryApiKeyRepositoryHarness::new();

    assert!(harness.repo().list_api_keys().await.unwrap().is_empty());
    assert!(matches!(
        harness.repo().get_api_key(1).await,
        Err(GetApiKeyError::NotFound(ApiKeyNotFoundError { id: 1 }))
    ));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_save_assigns_ids_and_updates_in_place() {
    let harness = InMemoryApiKeyRepositoryHarness::new();
    let repo = harness.repo();

    let first = repo
        .save_api_key(&synced_record("comments", "aaaa1111"))
        .await
        .unwrap();
    let second = repo
        .save_api_key(&synced_record("posts", "bbbb2222"))
        .await
        .unwrap();

    assert_eq!(first.id, Some(1));
    assert_eq!(second.id, Some(2));

    let rotated = ApiKeyRecord {
        secret_value: Some("cccc3333".to_string()),
        ..first.clone()
    };
    repo.save_api_key(&rotated).await.unwrap();

    assert_eq!(repo.get_api_key(1).await.unwrap(), rotated);
    assert_eq!(repo.list_api_keys().await.unwrap(), vec![rotated, second]);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_secret_values_are_unique() {
    let harness = InMemoryApiKeyRepositoryHarness::new();
    let repo = harness.repo();

    let saved = repo
        .save_api_key(&synced_record("comments", "aaaa1111"))
        .await
        .unwrap();

    // Re-saving the same record with its own secret is fine
    repo.save_api_key(&saved).await.unwrap();

    let res = repo
        .save_api_key(&synced_record("posts", "aaaa1111"))
        .await;
    assert!(
        matches!(
            &res,
            Err(SaveApiKeyRecordError::Duplicate(ApiKeyDuplicateSecretError { secret_prefix }))
                if secret_prefix == "aaaa"
        ),
        "{res:?}"
    );
    assert_eq!(repo.list_api_keys().await.unwrap().len(), 1);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_delete_api_key() {
    let harness = InMemoryApiKeyRepositoryHarness::new();
    let repo = harness.repo();

    let saved = repo
        .save_api_key(&synced_record("comments", "aaaa1111"))
        .await
        .unwrap();
    let id = saved.id.unwrap();

    repo.delete_api_key(id).await.unwrap();

    assert!(matches!(
        repo.get_api_key(id).await,
        Err(GetApiKeyError::NotFound(_))
    ));
    assert!(matches!(
        repo.delete_api_key(id).await,
        Err(DeleteApiKeyError::NotFound(ApiKeyNotFoundError { .. }))
    ));

    // Ids are never reused
    let next = repo
        .save_api_key(&synced_record("posts", "bbbb2222"))
        .await
        .unwrap();
    assert_eq!(next.id, Some(id + 1));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct InMemoryApiKeyRepositoryHarness {
    catalog: Catalog,
}

impl InMemoryApiKeyRepositoryHarness {
    fn new() -> Self {
        let mut b = CatalogBuilder::new();
        b.add::<InMemoryApiKeyRepository>();

        Self { catalog: b.build() }
    }

    fn repo(&self) -> Arc<dyn ApiKeyRepository> {
        self.catalog.get_one().unwrap()
    }
}

fn synced_record(collections: &str, secret_value: &str) -> ApiKeyRecord {
    ApiKeyRecord {
        secret_value: Some(secret_value.to_string()),
        ..ApiKeyRecord::new(collections, [ApiAction::DocumentsSearch])
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
