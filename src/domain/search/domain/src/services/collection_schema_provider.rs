// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use crate::SchemaDefinition;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Contributes collection definitions owned by one part of the application
pub trait CollectionSchemaProvider: Send + Sync {
    fn provider_name(&self) -> &'static str;

    fn provide_definitions(&self) -> &[SchemaDefinition];
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
