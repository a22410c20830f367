//! End-to-end tests for Invoice Chat. All code lives under `tests/`.
