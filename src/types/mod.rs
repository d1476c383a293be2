pub mod audit;
pub mod constant;
pub mod datetime;
pub mod jobs;
pub mod offers;
pub mod params;
