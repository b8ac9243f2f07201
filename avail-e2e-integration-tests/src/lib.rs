//! End to end tests of the harness against in-process nodes. See `tests/`.
