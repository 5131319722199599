// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod codec;
pub mod dashboard;
pub mod upload;

pub use dashboard::build_dashboard;
pub use upload::UploadStore;
