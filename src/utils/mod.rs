/*!
# Utilities

Provides shared helpers used across the crate, currently the
[`Sampler`](self::sampler::Sampler): Walker/Vose alias tables for O(1)
draws from a fixed discrete distribution.
*/

pub mod sampler;

pub use sampler::Sampler;
