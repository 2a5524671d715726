// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::collections::HashSet;
use std::sync::OnceLock;

use crate::{CompiledSchema, ConfigurationError, FieldDescriptor};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Implemented by persisted entity types that can back a search collection
pub trait SearchEntity {
    const ENTITY_NAME: &'static str;
    const IS_ABSTRACT: bool = false;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityModel {
    pub name: &'static str,
    pub is_abstract: bool,
}

impl EntityModel {
    pub fn of<E: SearchEntity>() -> Self {
        Self {
            name: E::ENTITY_NAME,
            is_abstract: E::IS_ABSTRACT,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Declarative description of one search collection.
///
/// Fields keep their registration order, which is also the order of the
/// compiled `fields` list. The attribute identifier a descriptor is
/// registered under doubles as its document name unless the descriptor
/// carries an explicit one.
#[derive(Debug, Clone)]
pub struct SchemaDefinition {
    collection_name: String,
    backing_entity: Option<EntityModel>,
    sort_field: Option<String>,
    fields: Vec<(String, FieldDescriptor)>,
    compiled: OnceLock<CompiledSchema>,
}

impl SchemaDefinition {
    pub fn new(collection_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            backing_entity: None,
            sort_field: None,
            fields: Vec::new(),
            compiled: OnceLock::new(),
        }
    }

    pub fn backed_by<E: SearchEntity>(self) -> Self {
        self.backed_by_model(EntityModel::of::<E>())
    }

    pub fn backed_by_model(mut self, model: EntityModel) -> Self {
        self.backing_entity = Some(model);
        self
    }

    pub fn field(mut self, attribute: impl Into<String>, descriptor: FieldDescriptor) -> Self {
        self.fields.push((attribute.into(), descriptor));
        self
    }

    pub fn sort_by(mut self, sort_field: impl Into<String>) -> Self {
        self.sort_field = Some(sort_field.into());
        self
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn backing_entity(&self) -> Option<EntityModel> {
        self.backing_entity
    }

    pub fn sort_field(&self) -> Option<&str> {
        self.sort_field.as_deref()
    }

    /// Registered `(attribute, descriptor)` pairs in declaration order
    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldDescriptor)> {
        self.fields.iter().map(|(a, d)| (a.as_str(), d))
    }

    /// Looks a descriptor up by its resolved document name
    pub fn field_by_name(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields()
            .find(|(attribute, d)| d.resolved_name(Some(*attribute)).is_ok_and(|n| n == name))
            .map(|(_, d)| d)
    }

    /// Produces the collection-creation document.
    ///
    /// The first successful result is cached, so repeated calls return the
    /// same schema without revalidating. Failures are not cached.
    #[tracing::instrument(level = "debug", skip_all, fields(collection_name = %self.collection_name))]
    pub fn compile(&self) -> Result<CompiledSchema, ConfigurationError> {
        if let Some(compiled) = self.compiled.get() {
            return Ok(compiled.clone());
        }

        let compiled = self.compile_uncached()?;

        tracing::debug!(
            num_fields = compiled.fields.len(),
            default_sorting_field = ?compiled.default_sorting_field,
            "Compiled collection schema",
        );

        Ok(self.compiled.get_or_init(|| compiled).clone())
    }

    fn compile_uncached(&self) -> Result<CompiledSchema, ConfigurationError> {
        if self.collection_name.is_empty() {
            return Err(ConfigurationError::MissingCollectionName);
        }
        let collection_name = self.collection_name.clone();

        let Some(entity) = self.backing_entity else {
            return Err(ConfigurationError::MissingBackingEntity { collection_name });
        };
        if entity.is_abstract {
            return Err(ConfigurationError::AbstractBackingEntity {
                collection_name,
                entity_name: entity.name,
            });
        }

        let mut fields = Vec::new();
        for (attribute, descriptor) in &self.fields {
            fields.extend(descriptor.to_field_documents(Some(attribute.as_str()))?);
        }

        if fields.is_empty() {
            return Err(ConfigurationError::NoFields { collection_name });
        }

        let duplicate = {
            let mut seen = HashSet::new();
            fields
                .iter()
                .find(|f| !seen.insert(f.name.as_str()))
                .map(|f| f.name.clone())
        };
        if let Some(field_name) = duplicate {
            return Err(ConfigurationError::DuplicateFieldName {
                collection_name,
                field_name,
            });
        }

        let default_sorting_field = match &self.sort_field {
            None => None,
            Some(sort_field) => {
                let Some(descriptor) = self.field_by_name(sort_field) else {
                    return Err(ConfigurationError::SortFieldNotFound {
                        collection_name,
                        sort_field: sort_field.clone(),
                    });
                };
                if !descriptor.kind().is_numeric() {
                    return Err(ConfigurationError::SortFieldNotNumeric {
                        collection_name,
                        sort_field: sort_field.clone(),
                        kind: descriptor.kind(),
                    });
                }
                if descriptor.optional() {
                    return Err(ConfigurationError::SortFieldOptional {
                        collection_name,
                        sort_field: sort_field.clone(),
                    });
                }
                Some(sort_field.clone())
            }
        };

        Ok(CompiledSchema {
            name: collection_name,
            fields,
            default_sorting_field,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////


////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
