pub mod candidate;
pub mod comparison;
pub mod job_description;
