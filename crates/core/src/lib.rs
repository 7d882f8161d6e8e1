//! educa core: learner identifiers, account provisioning, credential policy and course catalog.

pub mod accounts;
pub mod config;
pub mod error;
pub mod identity;
pub mod models;
pub mod passwords;
pub mod roster;
