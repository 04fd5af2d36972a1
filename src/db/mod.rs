pub mod accounts;
pub mod memberships;
pub mod roles;
pub mod seed;
