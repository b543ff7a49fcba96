//! Declarative authorization.
//!
//! Every protected operation is an [`Action`], and the table in [`rule`]
//! is the single place stating which roles may perform it and whether the
//! caller must own the targeted resource. Handlers call [`authorize`] or
//! [`authorize_owned`] and never encode role logic themselves.
//!
//! Admin passes every row. Ownership is the same predicate everywhere:
//! the caller's id must equal the resource owner's id.

use anyhow::anyhow;
use tracing::warn;
use uuid::Uuid;

use crate::modules::users::model::{User, UserRole};
use crate::utils::errors::AppError;

/// Protected operations, one per policy row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    QuestionList,
    QuestionCreate,
    QuestionUpdate,
    QuestionDelete,
    QuestionListUnresolved,
    AnswerCreate,
    AnswerUpdate,
    AnswerDelete,
    AnswerAccept,
    ListingListOwn,
    ListingCreate,
    ListingUpdate,
    ListingDelete,
    ListingApprove,
    CropManage,
    MarketPriceManage,
    SchemeManage,
    SchemeListAll,
    UserList,
    UserApprove,
}

/// One row of the policy table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Roles allowed besides Admin. Empty means Admin only.
    pub allowed_roles: &'static [UserRole],
    /// Whether the caller must own the targeted resource.
    pub ownership_required: bool,
}

/// The authorization table.
pub const fn rule(action: Action) -> Rule {
    use Action::*;
    use UserRole::{Expert, Farmer};

    match action {
        QuestionList => Rule {
            allowed_roles: &[Farmer, Expert],
            ownership_required: false,
        },
        QuestionCreate => Rule {
            allowed_roles: &[Farmer],
            ownership_required: false,
        },
        QuestionUpdate | QuestionDelete => Rule {
            allowed_roles: &[Farmer],
            ownership_required: true,
        },
        QuestionListUnresolved => Rule {
            allowed_roles: &[Expert],
            ownership_required: false,
        },
        AnswerCreate => Rule {
            allowed_roles: &[Expert],
            ownership_required: false,
        },
        AnswerUpdate | AnswerDelete => Rule {
            allowed_roles: &[Expert],
            ownership_required: true,
        },
        // Accepting is owned by the question's farmer, not the answer's expert.
        AnswerAccept => Rule {
            allowed_roles: &[Farmer],
            ownership_required: true,
        },
        ListingListOwn | ListingCreate => Rule {
            allowed_roles: &[Farmer],
            ownership_required: false,
        },
        ListingUpdate | ListingDelete => Rule {
            allowed_roles: &[Farmer],
            ownership_required: true,
        },
        ListingApprove | CropManage | MarketPriceManage | SchemeManage | SchemeListAll
        | UserList | UserApprove => Rule {
            allowed_roles: &[],
            ownership_required: false,
        },
    }
}

fn role_allowed(user: &User, rule: &Rule) -> bool {
    user.role == UserRole::Admin || rule.allowed_roles.contains(&user.role)
}

/// Role gate for actions without an ownership dimension.
pub fn authorize(user: &User, action: Action) -> Result<(), AppError> {
    let rule = rule(action);
    debug_assert!(
        !rule.ownership_required,
        "ownership-checked actions go through authorize_owned"
    );

    if !role_allowed(user, &rule) {
        warn!(
            user.id = %user.id,
            role = ?user.role,
            action = ?action,
            "Denied by role policy"
        );
        return Err(AppError::forbidden(anyhow!("Access denied")));
    }

    Ok(())
}

/// Role and ownership gate. `owner_id` is the id of the account owning
/// the targeted resource.
pub fn authorize_owned(user: &User, action: Action, owner_id: Uuid) -> Result<(), AppError> {
    let rule = rule(action);

    if !role_allowed(user, &rule) {
        warn!(
            user.id = %user.id,
            role = ?user.role,
            action = ?action,
            "Denied by role policy"
        );
        return Err(AppError::forbidden(anyhow!("Access denied")));
    }

    if rule.ownership_required && user.id != owner_id && !user.is_admin() {
        warn!(
            user.id = %user.id,
            owner.id = %owner_id,
            action = ?action,
            "Denied by ownership policy"
        );
        return Err(AppError::forbidden(anyhow!("You do not own this resource")));
    }

    Ok(())
}
