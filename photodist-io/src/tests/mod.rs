//! Cross-format export tests
