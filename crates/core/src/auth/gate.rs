//! Role gate - the access-control decision function
//!
//! Consulted before rendering any protected view; the sole place role
//! semantics are encoded. The decision is total: every session state maps
//! to exactly one outcome. The profile is authoritative over the
//! principal — a principal alone never grants access.

use hubgate_domain::{Role, Session};

/// Where a denied navigation should send the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    /// The sign-in view
    SignIn,
    /// The member self-service landing view
    MemberHome,
}

/// Outcome of a gate evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Session still loading; render a neutral waiting state, no redirect
    Pending,
    /// Render the protected content
    Allow,
    /// Nobody is signed in (or the principal has no profile)
    DenyUnauthenticated { redirect: Redirect },
    /// Profile exists but access is revoked. Terminal notice, no redirect
    /// (deliberately a dead end rather than a redirect loop).
    DenySuspended,
    /// Signed in with the wrong role for this view
    DenyWrongRole { redirect: Redirect },
}

/// Decide whether `session` may see a view requiring one of `required`.
///
/// An empty `required` set means any provisioned, active profile is
/// allowed. Role comparison is exact membership — there is no hierarchy,
/// so `Admin` is not implicitly a superset of `Lead`.
#[must_use]
pub fn evaluate(session: &Session, required: &[Role]) -> GateDecision {
    if session.loading {
        return GateDecision::Pending;
    }

    let Some(profile) = &session.profile else {
        // Covers both the fully signed-out case and an authenticated
        // principal that was never provisioned.
        return GateDecision::DenyUnauthenticated { redirect: Redirect::SignIn };
    };

    if !profile.active {
        return GateDecision::DenySuspended;
    }

    if required.is_empty() || required.contains(&profile.role) {
        return GateDecision::Allow;
    }

    let redirect =
        if profile.role == Role::Member { Redirect::MemberHome } else { Redirect::SignIn };
    GateDecision::DenyWrongRole { redirect }
}
