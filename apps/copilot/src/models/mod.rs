pub mod candidate;
pub mod meeting;
pub mod resume;
