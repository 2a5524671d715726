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
use init_on_startup::{StartupJobsError, run_startup_jobs};
use pretty_assertions::assert_eq;
use typesense_search::*;
use typesense_search_services::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_self_check_compiles_all_definitions() {
    let harness = SelfCheckHarness::new(vec![
        TestSchemaProvider::new("blog", vec![comments(), posts()]),
        TestSchemaProvider::new("people", vec![people()]),
    ]);

    let names = harness
        .self_check
        .compile_all()
        .unwrap()
        .into_iter()
        .map(|s| s.name)
        .collect::<Vec<_>>();

    assert_eq!(names, vec!["comments", "posts", "people"]);

    let catalog = SelfCheckHarness::startup_catalog(TestSchemaProvider::new(
        "blog",
        vec![comments(), posts()],
    ));
    run_startup_jobs(&catalog).await.unwrap();
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_self_check_fails_on_invalid_definition() {
    let broken = SchemaDefinition::new("broken")
        .backed_by::<Post>()
        .field("title", FieldDescriptor::of(FieldKind::String))
        .sort_by("title");

    let harness = SelfCheckHarness::new(vec![TestSchemaProvider::new(
        "blog",
        vec![comments(), broken.clone()],
    )]);

    let err = harness.self_check.compile_all().unwrap_err();
    assert!(
        matches!(
            &err,
            CollectionSchemaCheckError::Configuration(InvalidCollectionDefinitionError {
                provider_name: "blog",
                source: ConfigurationError::SortFieldNotNumeric { .. },
            })
        ),
        "{err:?}"
    );

    let catalog =
        SelfCheckHarness::startup_catalog(TestSchemaProvider::new("blog", vec![broken]));
    let res = run_startup_jobs(&catalog).await;
    assert!(matches!(res, Err(StartupJobsError::Internal(_))), "{res:?}");
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[test_log::test(tokio::test)]
async fn test_self_check_rejects_duplicate_collections() {
    let harness = SelfCheckHarness::new(vec![
        TestSchemaProvider::new("blog", vec![comments()]),
        TestSchemaProvider::new("moderation", vec![comments()]),
    ]);

    let err = harness.self_check.compile_all().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Collection 'comments' is declared by both 'blog' and 'moderation'"
    );
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct SelfCheckHarness {
    self_check: CollectionSchemaSelfCheck,
}

impl SelfCheckHarness {
    fn new(providers: Vec<TestSchemaProvider>) -> Self {
        let providers = providers
            .into_iter()
            .map(|p| Arc::new(p) as Arc<dyn CollectionSchemaProvider>)
            .collect();

        Self {
            self_check: CollectionSchemaSelfCheck::new(providers),
        }
    }

    fn startup_catalog(provider: TestSchemaProvider) -> dill::Catalog {
        let mut b = CatalogBuilder::new();
        b.add_value(provider)
            .bind::<dyn CollectionSchemaProvider, TestSchemaProvider>();
        register_dependencies(&mut b);
        b.build()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct TestSchemaProvider {
    name: &'static str,
    definitions: Vec<SchemaDefinition>,
}

impl TestSchemaProvider {
    fn new(name: &'static str, definitions: Vec<SchemaDefinition>) -> Self {
        Self { name, definitions }
    }
}

impl CollectionSchemaProvider for TestSchemaProvider {
    fn provider_name(&self) -> &'static str {
        self.name
    }

    fn provide_definitions(&self) -> &[SchemaDefinition] {
        &self.definitions
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

struct Post;

impl SearchEntity for Post {
    const ENTITY_NAME: &'static str = "Post";
}

fn comments() -> SchemaDefinition {
    SchemaDefinition::new("comments")
        .backed_by::<Post>()
        .field("content", FieldDescriptor::of(FieldKind::String))
        .field("created_at", FieldDescriptor::of(FieldKind::DateTime))
        .sort_by("created_at")
}

fn posts() -> SchemaDefinition {
    SchemaDefinition::new("posts")
        .backed_by::<Post>()
        .field("title", FieldDescriptor::of(FieldKind::String))
        .field("votes", FieldDescriptor::of(FieldKind::Integer))
        .sort_by("votes")
}

fn people() -> SchemaDefinition {
    SchemaDefinition::new("people")
        .backed_by::<Post>()
        .field("email", FieldDescriptor::of(FieldKind::Email))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
