//! End-to-end tests for the quillpost API live in `tests/`.
