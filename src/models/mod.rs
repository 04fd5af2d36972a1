mod account;
mod role;

pub use account::Account;
pub use role::{Role, RoleName};
