// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use dill::*;
use internal_error::InternalError;
use typesense_keys::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemoryApiActionRepository {
    permissions: Arc<Mutex<Vec<String>>>,
}

#[component(pub)]
#[interface(dyn ApiActionRepository)]
#[scope(Singleton)]
impl InMemoryApiActionRepository {
    pub fn new() -> Self {
        Self {
            permissions: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl ApiActionRepository for InMemoryApiActionRepository {
    async fn ensure_action(&self, permission: &str) -> Result<bool, InternalError> {
        let mut permissions = self.permissions.lock().unwrap();

        if permissions.iter().any(|p| p == permission) {
            return Ok(false);
        }

        permissions.push(permission.to_string());
        Ok(true)
    }

    async fn list_actions(&self) -> Result<Vec<String>, InternalError> {
        Ok(self.permissions.lock().unwrap().clone())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
