pub mod course;
pub mod inmate;
pub mod progress;
