mod full;
mod mobility;
mod positional;

pub use full::FullEvaluation;
pub use mobility::MobilityEvaluation;
pub use positional::PositionalEvaluation;
