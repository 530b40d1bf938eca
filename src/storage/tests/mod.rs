//! Unit tests for the storage context.

mod domain_tests;
