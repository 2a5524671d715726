// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Reference rows of grantable permissions.
///
/// Rows are plain permission strings, so rows written by older releases
/// survive even when the action no longer exists.
#[async_trait::async_trait]
pub trait ApiActionRepository: Send + Sync {
    /// Inserts the row unless it exists. Returns `true` if it was inserted.
    async fn ensure_action(&self, permission: &str) -> Result<bool, InternalError>;

    /// All stored permissions in insertion order
    async fn list_actions(&self) -> Result<Vec<String>, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
