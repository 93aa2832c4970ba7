//! Integration test modules

mod editing_session_tests;
mod repository_tests;
