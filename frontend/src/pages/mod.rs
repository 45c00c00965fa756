pub mod dashboard;
pub mod games;
