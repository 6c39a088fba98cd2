mod session;
mod token;

#[rustfmt::skip]
pub use {
    session::{decide, GuardDecision, SessionGuard, SessionGuardMiddleware, SessionUser},
    token::{Claims, IssuedToken, SessionKeys},
};
