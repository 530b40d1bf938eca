//! Unit tests for configuration and the front-end loops.
