// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashMap;
use std::sync::Arc;

use dill::*;
use init_on_startup::{InitOnStartup, InitOnStartupMeta};
use internal_error::{ErrorIntoInternal, InternalError};
use thiserror::Error;
use typesense_search::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Compiles every provided collection definition once on startup, so that a
/// broken declaration stops the process before any collection is created
pub struct CollectionSchemaSelfCheck {
    schema_providers: Vec<Arc<dyn CollectionSchemaProvider>>,
}

#[component(pub)]
#[interface(dyn InitOnStartup)]
#[meta(InitOnStartupMeta {
    job_name: JOB_TYPESENSE_SEARCH_COLLECTION_SCHEMA_SELF_CHECK,
    depends_on: &[],
})]
impl CollectionSchemaSelfCheck {
    pub fn new(schema_providers: Vec<Arc<dyn CollectionSchemaProvider>>) -> Self {
        Self { schema_providers }
    }

    /// Compiled schemas of all providers, in provider registration order
    pub fn compile_all(&self) -> Result<Vec<CompiledSchema>, CollectionSchemaCheckError> {
        let mut owners: HashMap<String, &'static str> = HashMap::new();
        let mut compiled_schemas = Vec::new();

        for provider in &self.schema_providers {
            let provider_name = provider.provider_name();

            tracing::debug!(
                provider_name,
                definitions_count = provider.provide_definitions().len(),
                "Checking collection definitions from provider",
            );

            for definition in provider.provide_definitions() {
                let compiled = definition.compile().map_err(|source| {
                    CollectionSchemaCheckError::Configuration(InvalidCollectionDefinitionError {
                        provider_name,
                        source,
                    })
                })?;

                if let Some(first_provider_name) =
                    owners.insert(compiled.name.clone(), provider_name)
                {
                    return Err(CollectionSchemaCheckError::DuplicateCollection(
                        DuplicateCollectionError {
                            collection_name: compiled.name,
                            first_provider_name,
                            second_provider_name: provider_name,
                        },
                    ));
                }

                compiled_schemas.push(compiled);
            }
        }

        Ok(compiled_schemas)
    }
}

#[async_trait::async_trait]
impl InitOnStartup for CollectionSchemaSelfCheck {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn run_initialization(&self) -> Result<(), InternalError> {
        let compiled_schemas = self.compile_all().map_err(|e| {
            tracing::error!(error = ?e, error_msg = %e, "Collection schema self-check failed");
            e.int_err()
        })?;

        for schema in &compiled_schemas {
            tracing::info!(
                collection_name = %schema.name,
                fields_count = schema.fields.len(),
                default_sorting_field = ?schema.default_sorting_field,
                "Collection schema is valid",
            );
        }

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum CollectionSchemaCheckError {
    #[error(transparent)]
    Configuration(InvalidCollectionDefinitionError),

    #[error(transparent)]
    DuplicateCollection(DuplicateCollectionError),
}

#[derive(Error, Debug)]
#[error("Provider '{provider_name}' declares an invalid collection: {source}")]
pub struct InvalidCollectionDefinitionError {
    pub provider_name: &'static str,
    pub source: ConfigurationError,
}

#[derive(Error, Debug)]
#[error(
    "Collection '{collection_name}' is declared by both '{first_provider_name}' and \
     '{second_provider_name}'"
)]
pub struct DuplicateCollectionError {
    pub collection_name: String,
    pub first_provider_name: &'static str,
    pub second_provider_name: &'static str,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
