//! Test utilities for gameforge_narrative tests.
//!
//! This module provides mock collaborators and canned service responses.

pub mod mock_services;

#[allow(unused_imports)]
pub use mock_services::{MockImageService, MockResponse, MockTextService, png_bytes};
