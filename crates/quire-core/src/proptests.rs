//! Property-based tests for the tab pipeline.
