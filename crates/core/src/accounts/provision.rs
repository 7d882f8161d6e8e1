use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::AccountDirectory;
use crate::config::{EducaConfig, LoginHandle};
use crate::error::{EducaError, Result};
use crate::identity::matricula::current_year;
use crate::identity::{MatriculaGenerator, UsernameGenerator};
use crate::models::inmate::{clean_full_name, clean_matricula, InmateAccount};
use crate::passwords::{generate_temporary_password, hash_password, PasswordPolicy};

/// Input for creating one learner account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProvisionRequest {
    pub full_name: String,
    /// Use this code instead of generating one.
    pub matricula: Option<String>,
    /// Use this password instead of generating a temporary one.
    pub password: Option<String>,
}

impl ProvisionRequest {
    pub fn new(full_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            ..Default::default()
        }
    }
}

/// A freshly built account, not yet stored anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct Provisioned {
    pub account: InmateAccount,
    /// Set only when the password was generated, so it can be handed over once.
    pub temporary_password: Option<String>,
}

/// Builds learner accounts: identifiers, credential and first-login flag.
#[derive(Debug, Clone)]
pub struct AccountProvisioner {
    usernames: UsernameGenerator,
    matriculas: MatriculaGenerator,
    login_handle: LoginHandle,
    email_domain: Option<String>,
    policy: PasswordPolicy,
    temporary_length: usize,
}

impl Default for AccountProvisioner {
    fn default() -> Self {
        Self::from_config(&EducaConfig::generate_default())
    }
}

impl AccountProvisioner {
    pub fn from_config(config: &EducaConfig) -> Self {
        Self {
            usernames: UsernameGenerator::new(config.accounts.username_max_attempts),
            matriculas: MatriculaGenerator::new(config.accounts.matricula_prefix.clone()),
            login_handle: config.accounts.login_handle,
            email_domain: config.accounts.email_domain.clone(),
            policy: PasswordPolicy::from(&config.passwords),
            temporary_length: config.passwords.temporary_length,
        }
    }

    pub fn policy(&self) -> &PasswordPolicy {
        &self.policy
    }

    /// Provision an account, generating any matricula for the current UTC year.
    pub fn provision<D>(&self, request: &ProvisionRequest, directory: &D) -> Result<Provisioned>
    where
        D: AccountDirectory + ?Sized,
    {
        self.provision_for_year(request, directory, &current_year())
    }

    /// Provision an account, generating any matricula for `year`.
    ///
    /// Nothing is written: the caller stores the returned account. Two
    /// provisions that run before either is stored may pick the same
    /// identifiers.
    pub fn provision_for_year<D>(
        &self,
        request: &ProvisionRequest,
        directory: &D,
        year: &str,
    ) -> Result<Provisioned>
    where
        D: AccountDirectory + ?Sized,
    {
        let full_name = clean_full_name(&request.full_name)?;

        let matricula = match request.matricula.as_deref() {
            Some(supplied) => {
                let matricula = clean_matricula(supplied)?;
                if directory.matricula_exists(&matricula) {
                    return Err(EducaError::Conflict(format!(
                        "matricula {matricula} is already in use"
                    )));
                }
                matricula
            }
            None => self.matriculas.generate(year, directory),
        };

        let username = match self.login_handle {
            LoginHandle::Username => self.usernames.generate(&full_name, directory)?,
            LoginHandle::Matricula => {
                if directory.username_exists(&matricula) {
                    return Err(EducaError::Conflict(format!(
                        "login handle {matricula} is already in use"
                    )));
                }
                matricula.clone()
            }
        };

        let (password, temporary_password) = match request.password.as_deref() {
            Some(supplied) => (supplied.to_string(), None),
            None => {
                let generated = generate_temporary_password(self.temporary_length);
                (generated.clone(), Some(generated))
            }
        };

        let mut attributes = vec![username.as_str(), matricula.as_str()];
        attributes.extend(full_name.split_whitespace());
        self.policy.validate(&password, &attributes)?;

        let email = self
            .email_domain
            .as_ref()
            .map(|domain| format!("{username}@{domain}"));

        let account = InmateAccount {
            id: Uuid::new_v4(),
            full_name,
            username,
            matricula,
            email,
            password_hash: hash_password(&password)?,
            must_change_password: true,
            is_active: true,
            created_at: Utc::now(),
        };

        info!(
            username = %account.username,
            matricula = %account.matricula,
            "Provisioned account"
        );

        Ok(Provisioned {
            account,
            temporary_password,
        })
    }
}
