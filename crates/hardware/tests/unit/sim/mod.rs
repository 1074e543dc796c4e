//! Composition tests.
