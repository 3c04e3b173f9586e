mod guard;
mod session;

pub use guard::{
    ensure_admin, ensure_any_role, ensure_order_manager, ensure_role, ensure_staff,
    staff_store_code,
};
pub use session::{AuthSession, MY_INFO_KEY, TOKEN_KEY, token_expiry};
