// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Coordination primitives for serializing remote operations
//!
//! This module provides:
//! - **KeyedMutex** - Exclusive access scoped to an arbitrary key (an SDDC id)
//! - **KeyGuard** - Scoped release capability for one acquisition

pub mod keyed_mutex;

pub use keyed_mutex::{KeyGuard, KeyedMutex};
