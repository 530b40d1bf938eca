//! Unit tests for the presentation context.
