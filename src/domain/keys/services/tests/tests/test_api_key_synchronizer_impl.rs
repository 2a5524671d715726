// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use pretty_assertions::assert_eq;
use typesense_keys::*;
use typesense_keys_services::ApiKeySynchronizerImpl;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_new_key_is_created_once() {
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_create_key()
        .times(1)
        .withf(|request| {
            *request
                == CreateApiKeyRequest {
                    actions: vec![ApiAction::DocumentsGet, ApiAction::DocumentsSearch],
                    description: "Search-only key".to_string(),
                    collections: vec!["comments".to_string()],
                    expires_at: Some(EXPIRES_AT_UNIX),
                }
        })
        .returning(|_| Ok(created_key(11, "nEw1secret")));
    keys_client.expect_retrieve_keys().never();
    keys_client.expect_delete_key().never();

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::strict());

    let mut record = search_only_record();
    harness
        .synchronizer
        .sync_before_save(&mut record)
        .await
        .unwrap();

    assert_eq!(record.secret_value.as_deref(), Some("nEw1secret"));
    assert!(record.read_only());
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_existing_key_is_rotated() {
    let mut seq = mockall::Sequence::new();
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_retrieve_keys()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(listing(&[(3, "zzzz"), (5, "oLd1"), (8, "othe")])));
    keys_client
        .expect_delete_key()
        .with(eq(5))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    keys_client
        .expect_create_key()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(created_key(12, "nEw2secret")));

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::strict());

    let mut record = ApiKeyRecord {
        id: Some(1),
        secret_value: Some("oLd1secret".to_string()),
        ..search_only_record()
    };
    harness
        .synchronizer
        .sync_before_save(&mut record)
        .await
        .unwrap();

    assert_eq!(record.id, Some(1));
    assert_eq!(record.secret_value.as_deref(), Some("nEw2secret"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_key_fails_in_strict_mode() {
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_retrieve_keys()
        .times(1)
        .returning(|| Ok(listing(&[(3, "zzzz")])));
    keys_client.expect_delete_key().never();
    keys_client.expect_create_key().never();

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::strict());

    let mut record = ApiKeyRecord {
        id: Some(4),
        secret_value: Some("gOne1secret".to_string()),
        ..search_only_record()
    };
    let res = harness.synchronizer.sync_before_save(&mut record).await;

    assert!(
        matches!(
            &res,
            Err(SyncApiKeyError::Consistency(ConsistencyError {
                key_id: Some(4),
                secret_prefix,
            })) if secret_prefix == "gOne"
        ),
        "{res:?}"
    );
    assert_eq!(record.secret_value.as_deref(), Some("gOne1secret"));

    let message = res.unwrap_err().to_string();
    assert!(message.contains("was not found in the Typesense server"), "{message}");
    assert!(!message.contains("gOne1secret"), "{message}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_unknown_key_is_replaced_in_lenient_mode() {
    let mut seq = mockall::Sequence::new();
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_retrieve_keys()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(ApiKeysListing::default()));
    keys_client.expect_delete_key().never();
    keys_client
        .expect_create_key()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(created_key(13, "nEw3secret")));

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::lenient());

    let mut record = ApiKeyRecord {
        id: Some(4),
        secret_value: Some("gOne1secret".to_string()),
        ..search_only_record()
    };
    harness
        .synchronizer
        .sync_before_save(&mut record)
        .await
        .unwrap();

    assert_eq!(record.secret_value.as_deref(), Some("nEw3secret"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_saved_key_without_secret_follows_not_found_policy() {
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_retrieve_keys()
        .times(1)
        .returning(|| Ok(listing(&[(3, "zzzz")])));
    keys_client.expect_create_key().never();

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::strict());

    let mut record = ApiKeyRecord {
        id: Some(9),
        ..search_only_record()
    };
    let res = harness.synchronizer.sync_before_save(&mut record).await;

    assert!(
        matches!(
            &res,
            Err(SyncApiKeyError::Consistency(ConsistencyError {
                key_id: Some(9),
                secret_prefix,
            })) if secret_prefix.is_empty()
        ),
        "{res:?}"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_remote_failure_is_reported_with_operation() {
    let mut keys_client = MockTypesenseKeysClient::new();
    keys_client
        .expect_retrieve_keys()
        .times(1)
        .returning(|| Ok(listing(&[(5, "oLd1")])));
    keys_client.expect_delete_key().times(1).returning(|_| {
        Err(TypesenseClientError::Api(TypesenseApiError {
            status: 503,
            message: "Not Ready or Lagging".to_string(),
        }))
    });
    keys_client.expect_create_key().never();

    let harness = SynchronizerHarness::new(keys_client, ApiKeySyncConfig::strict());

    let mut record = ApiKeyRecord {
        id: Some(1),
        secret_value: Some("oLd1secret".to_string()),
        ..search_only_record()
    };
    let res = harness.synchronizer.sync_before_save(&mut record).await;

    assert!(
        matches!(
            &res,
            Err(SyncApiKeyError::Remote(RemoteSyncError {
                operation: RemoteKeyOperation::Delete,
                source: TypesenseClientError::Api(TypesenseApiError { status: 503, .. }),
            }))
        ),
        "{res:?}"
    );
    assert_eq!(
        res.unwrap_err().to_string(),
        "Failed to delete API key on the Typesense server"
    );
    assert_eq!(record.secret_value.as_deref(), Some("oLd1secret"));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Harness
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const EXPIRES_AT_UNIX: i64 = 1_893_456_000;

struct SynchronizerHarness {
    synchronizer: ApiKeySynchronizerImpl,
}

impl SynchronizerHarness {
    fn new(keys_client: MockTypesenseKeysClient, sync_config: ApiKeySyncConfig) -> Self {
        Self {
            synchronizer: ApiKeySynchronizerImpl::new(
                Arc::new(keys_client),
                Arc::new(sync_config),
            ),
        }
    }
}

fn search_only_record() -> ApiKeyRecord {
    ApiKeyRecord::new(
        "comments",
        [ApiAction::DocumentsSearch, ApiAction::DocumentsGet],
    )
    .with_description("Search-only key")
    .with_expires_at(Utc.timestamp_opt(EXPIRES_AT_UNIX, 0).unwrap())
}

fn created_key(id: RemoteApiKeyId, value: &str) -> CreatedApiKey {
    CreatedApiKey {
        id,
        value: value.to_string(),
        description: String::new(),
        actions: Vec::new(),
        collections: Vec::new(),
        expires_at: None,
    }
}

fn listing(keys: &[(RemoteApiKeyId, &str)]) -> ApiKeysListing {
    ApiKeysListing {
        keys: keys
            .iter()
            .map(|(id, value_prefix)| RemoteApiKey {
                id: *id,
                value_prefix: (*value_prefix).to_string(),
                description: String::new(),
                actions: Vec::new(),
                collections: Vec::new(),
                expires_at: None,
            })
            .collect(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
