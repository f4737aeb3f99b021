pub mod assign;
pub mod calendar;
pub mod clock;
pub mod goal;
pub mod id;
pub mod key;
pub mod summary;
pub mod task;
