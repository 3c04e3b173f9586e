use crate::{
    error::{ClientError, ClientResult},
    models::{Role, User},
};

pub fn ensure_role(user: &User, role: Role) -> ClientResult<()> {
    if user.role != role {
        return Err(ClientError::Forbidden);
    }
    Ok(())
}

pub fn ensure_any_role(user: &User, roles: &[Role]) -> ClientResult<()> {
    if !roles.contains(&user.role) {
        return Err(ClientError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(user: &User) -> ClientResult<()> {
    ensure_role(user, Role::Admin)
}

pub fn ensure_staff(user: &User) -> ClientResult<()> {
    ensure_role(user, Role::Staff)
}

/// Order status and payment changes are open to staff and admins.
pub fn ensure_order_manager(user: &User) -> ClientResult<()> {
    ensure_any_role(user, &[Role::Staff, Role::Admin])
}

/// The store a staff member works at.
pub fn staff_store_code(user: &User) -> ClientResult<&str> {
    ensure_staff(user)?;
    user.staff_of_store_code
        .as_deref()
        .filter(|code| !code.is_empty())
        .ok_or_else(|| ClientError::BadRequest("Staff member is not assigned to a store".into()))
}
