// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use dill::CatalogBuilder;
use pretty_assertions::assert_eq;
use typesense_keys::ApiActionRepository;
use typesense_keys_inmem::InMemoryApiActionRepository;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_ensure_action_inserts_once() {
    let catalog = CatalogBuilder::new()
        .add::<InMemoryApiActionRepository>()
        .build();
    let repo: Arc<dyn ApiActionRepository> = catalog.get_one().unwrap();

    assert!(repo.ensure_action("documents:get").await.unwrap());
    assert!(repo.ensure_action("documents:search").await.unwrap());
    assert!(!repo.ensure_action("documents:get").await.unwrap());

    assert_eq!(
        repo.list_actions().await.unwrap(),
        vec!["documents:get", "documents:search"]
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
