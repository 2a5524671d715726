// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

mod api_action;
mod api_key_record;
mod typesense_config;

pub use api_action::*;
pub use api_key_record::*;
pub use typesense_config::*;
