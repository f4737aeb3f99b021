pub mod day;
pub mod goals;
pub mod review;
