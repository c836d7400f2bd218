//! Public library API for deep-copying dynamically typed values.

/// Dynamic values over a runtime type table, and the deep copier built on them.
pub mod reflect;
