//! Public library API for sum-type registries and the tagged-union wire codec.

/// Variant registry, wire layout, value model, and tagged record codec.
pub mod sum;
