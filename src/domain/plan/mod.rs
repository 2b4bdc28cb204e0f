pub mod builder;
pub mod model;

pub use builder::{PlanPattern, SegmentPlanBuilder};
pub use model::{Segment, SegmentPlan};
