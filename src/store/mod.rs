// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Routeview-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Routeview and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Saved location sets on disk.

pub mod plan_folder;

pub use plan_folder::{
    load_plan_file, validate_plan_name, PlanFolder, StoreError, WriteDurability, PLAN_FILE_SUFFIX,
};
