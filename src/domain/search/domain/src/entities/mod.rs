// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod compiled_schema;
mod configuration_error;
mod document;
mod field_descriptor;
mod field_kind;
mod field_value;
mod schema_definition;

pub use compiled_schema::*;
pub use configuration_error::*;
pub use document::*;
pub use field_descriptor::*;
pub use field_kind::*;
pub use field_value::*;
pub use schema_definition::*;
