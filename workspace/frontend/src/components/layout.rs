pub mod dashboard;
pub mod right_side;
