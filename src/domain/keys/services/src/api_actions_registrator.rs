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
use init_on_startup::{InitOnStartup, InitOnStartupMeta};
use internal_error::InternalError;
use strum::IntoEnumIterator;
use typesense_keys::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Makes sure every grantable action has its reference row. Rows of actions
/// that are no longer known are kept.
pub struct ApiActionsRegistrator {
    api_action_repo: Arc<dyn ApiActionRepository>,
}

#[component(pub)]
#[interface(dyn InitOnStartup)]
#[meta(InitOnStartupMeta {
    job_name: JOB_TYPESENSE_KEYS_API_ACTIONS_REGISTRATOR,
    depends_on: &[],
})]
impl ApiActionsRegistrator {
    pub fn new(api_action_repo: Arc<dyn ApiActionRepository>) -> Self {
        Self { api_action_repo }
    }
}

#[async_trait::async_trait]
impl InitOnStartup for ApiActionsRegistrator {
    #[tracing::instrument(level = "debug", skip_all)]
    async fn run_initialization(&self) -> Result<(), InternalError> {
        let mut added_count = 0;

        for action in ApiAction::iter() {
            if self.api_action_repo.ensure_action(action.as_str()).await? {
                tracing::info!(%action, label = action.label(), "Adding Typesense action");
                added_count += 1;
            }
        }

        tracing::debug!(added_count, "Typesense actions registered");

        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
