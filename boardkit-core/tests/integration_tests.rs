//! Integration tests for `Boardkit` core library
//!
//! These tests drive a full editing session: settings, store mutations,
//! drag/drop, rendering and persistence through the file repository.

#![allow(clippy::redundant_clone)]
#![allow(clippy::too_many_lines)]

mod integration;
