//! Value Object Module

pub mod account_id;
pub mod identifier;
pub mod password;
pub mod person_name;
