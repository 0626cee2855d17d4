mod calculator;

pub use calculator::{accrue, accrue_to_latest, Compounding, InterestConfig, InterestPeriod, InterestSchedule};
