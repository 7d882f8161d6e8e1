use tracing::info;

use crate::error::{EducaError, Result};
use crate::models::inmate::InmateAccount;
use crate::passwords::{hash_password, verify_password, PasswordPolicy};

/// How a route treats accounts still holding a temporary password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteAccess {
    /// Only accounts that already chose their own password.
    Standard,
    /// Also open to accounts that must change their password (e.g. the
    /// change-password route itself).
    AllowsTemporaryPassword,
}

/// Decide whether `account` may use a route with the given access level.
pub fn authorize(account: &InmateAccount, route: RouteAccess) -> Result<()> {
    if !account.is_active {
        return Err(EducaError::Auth(format!(
            "account {} is inactive",
            account.username
        )));
    }
    if account.must_change_password && route != RouteAccess::AllowsTemporaryPassword {
        return Err(EducaError::PasswordChangeRequired);
    }
    Ok(())
}

/// Replace the account's password after checking the current one.
///
/// On success the account no longer needs a password change.
pub fn change_password(
    account: &mut InmateAccount,
    old_password: &str,
    new_password: &str,
    policy: &PasswordPolicy,
) -> Result<()> {
    if !verify_password(&account.password_hash, old_password)? {
        return Err(EducaError::Auth("current password is incorrect".into()));
    }

    let mut attributes = vec![account.username.as_str(), account.matricula.as_str()];
    attributes.extend(account.full_name.split_whitespace());
    policy.validate(new_password, &attributes)?;

    account.password_hash = hash_password(new_password)?;
    account.must_change_password = false;
    info!(username = %account.username, "Password changed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn account_with_password(password: &str) -> InmateAccount {
        InmateAccount {
            id: Uuid::new_v4(),
            full_name: "Ana Silva".to_string(),
            username: "ana.silva".to_string(),
            matricula: "DL-2024-0001".to_string(),
            email: None,
            password_hash: hash_password(password).unwrap(),
            must_change_password: true,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn temporary_password_blocks_standard_routes() {
        let account = account_with_password("provisoria1");
        let err = authorize(&account, RouteAccess::Standard).unwrap_err();
        assert!(matches!(err, EducaError::PasswordChangeRequired));
    }

    #[test]
    fn temporary_password_allows_flagged_routes() {
        let account = account_with_password("provisoria1");
        authorize(&account, RouteAccess::AllowsTemporaryPassword).unwrap();
    }

    #[test]
    fn changed_password_allows_everything() {
        let mut account = account_with_password("provisoria1");
        account.must_change_password = false;
        authorize(&account, RouteAccess::Standard).unwrap();
        authorize(&account, RouteAccess::AllowsTemporaryPassword).unwrap();
    }

    #[test]
    fn inactive_account_is_rejected() {
        let mut account = account_with_password("provisoria1");
        account.is_active = false;
        account.must_change_password = false;
        let err = authorize(&account, RouteAccess::Standard).unwrap_err();
        assert!(matches!(err, EducaError::Auth(_)));
    }

    #[test]
    fn change_password_clears_flag() {
        let mut account = account_with_password("provisoria1");
        change_password(
            &mut account,
            "provisoria1",
            "minha-senha-nova",
            &PasswordPolicy::default(),
        )
        .unwrap();
        assert!(!account.must_change_password);
        assert!(verify_password(&account.password_hash, "minha-senha-nova").unwrap());
        assert!(!verify_password(&account.password_hash, "provisoria1").unwrap());
        authorize(&account, RouteAccess::Standard).unwrap();
    }

    #[test]
    fn change_password_requires_current_password() {
        let mut account = account_with_password("provisoria1");
        let original_hash = account.password_hash.clone();
        let err = change_password(
            &mut account,
            "errada",
            "minha-senha-nova",
            &PasswordPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EducaError::Auth(_)));
        assert!(account.must_change_password);
        assert_eq!(account.password_hash, original_hash);
    }

    #[test]
    fn change_password_validates_new_password() {
        let mut account = account_with_password("provisoria1");
        let err = change_password(
            &mut account,
            "provisoria1",
            "ana.silva",
            &PasswordPolicy::default(),
        )
        .unwrap_err();
        assert!(matches!(err, EducaError::Validation(_)));
        assert!(account.must_change_password);
    }
}
