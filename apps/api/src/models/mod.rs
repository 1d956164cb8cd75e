pub mod curriculum;
pub mod profile;
pub mod statement;
pub mod user;
