pub mod domain;
pub mod error;
pub mod outreach;
pub mod protocol;
