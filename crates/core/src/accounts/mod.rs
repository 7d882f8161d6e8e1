//! Learner account lifecycle: provisioning, password changes and route access.

pub mod access;
pub mod provision;

use crate::identity::{MatriculaCounter, UsernameLookup};

/// Everything account creation needs to know about accounts that already exist.
pub trait AccountDirectory: UsernameLookup + MatriculaCounter {
    fn matricula_exists(&self, matricula: &str) -> bool;
}

pub use access::{authorize, change_password, RouteAccess};
pub use provision::{AccountProvisioner, ProvisionRequest, Provisioned};
