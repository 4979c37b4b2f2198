//! Shared test utilities for tk-db unit tests.
