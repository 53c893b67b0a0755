mod stability;

pub use stability::{stability_score, StabilityAssessment};
