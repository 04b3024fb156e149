pub mod campaign;
pub mod dashboard;
pub mod goal;
pub mod segment;
