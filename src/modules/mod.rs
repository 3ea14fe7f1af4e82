pub mod purger;
pub mod wiper;
