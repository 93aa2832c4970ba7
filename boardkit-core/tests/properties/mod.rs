//! Property test modules

mod document_tests;
mod drag_tests;
mod layout_tests;
