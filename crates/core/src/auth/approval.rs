//! Registration approval workflow
//!
//! The one multi-step state transition in the system. Approval converts a
//! pending registration request into a live identity and profile:
//!
//! 1. Create the principal in the identity provider (switches the active
//!    session to the new principal — a documented side effect of the
//!    provider's account-creation call).
//! 2. Create the profile record keyed by the new principal's uid.
//! 3. Delete the registration request (its deletion is the mutual
//!    exclusion between concurrent approvers).
//! 4. Re-authenticate the approver with the step-up credential captured
//!    before the workflow started, reversing the session switch.
//!
//! Step 1 failing aborts with no partial state. A failure in steps 2–3
//! triggers compensation in reverse order (delete the profile if it was
//! written, delete the created principal, restore the approver session)
//! before the error is surfaced; the error records whether compensation
//! succeeded. A step-4 failure leaves the data consistent but the
//! approver's session switched, which callers must surface distinctly.

use std::sync::Arc;

use chrono::Utc;
use hubgate_domain::{ApprovalMetadata, HubgateError, Principal, Profile, RegistrationRequest};
use thiserror::Error;
use tracing::{error, info, warn};

use super::ports::IdentityProvider;
use crate::iam::ports::{ProfileRepository, RegistrationRepository};

/// Step-distinct failure of the approval workflow.
///
/// Every variant after `IdentityCreation` means a new identity exists in
/// the provider; the messages make that explicit so operators know what
/// state the system is in.
#[derive(Debug, Error)]
pub enum ApprovalError {
    /// Step 1 failed; nothing was created
    #[error("could not create the identity (no changes were made): {source}")]
    IdentityCreation { source: HubgateError },

    /// Step 2 failed after the identity was created
    #[error(
        "identity was created but writing the profile failed \
         (rolled back: {rolled_back}): {source}"
    )]
    ProfileWrite { source: HubgateError, rolled_back: bool },

    /// Step 3 failed after identity and profile were created
    #[error(
        "identity and profile were created but the request could not be \
         removed (rolled back: {rolled_back}): {source}"
    )]
    RequestCleanup { source: HubgateError, rolled_back: bool },

    /// Step 4 failed; data is consistent but the approver session is
    /// still switched to the new identity
    #[error(
        "approval completed (identity and profile exist, request removed) \
         but restoring the administrator session failed: {source}"
    )]
    SessionRestore { source: HubgateError },
}

/// Orchestrates approval and rejection of registration requests
pub struct ApprovalService {
    identity: Arc<dyn IdentityProvider>,
    profiles: Arc<dyn ProfileRepository>,
    requests: Arc<dyn RegistrationRepository>,
}

impl ApprovalService {
    /// Create a new approval service
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        profiles: Arc<dyn ProfileRepository>,
        requests: Arc<dyn RegistrationRepository>,
    ) -> Self {
        Self { identity, profiles, requests }
    }

    /// Approve a pending request, creating the identity and profile.
    ///
    /// `approver_secret` is the step-up credential confirmed immediately
    /// before the transition, independent of the approver's existing
    /// session; it is required to restore that session after the
    /// account-creation side effect.
    ///
    /// # Errors
    /// Returns an [`ApprovalError`] identifying the failed step and
    /// whether earlier steps were rolled back.
    pub async fn approve(
        &self,
        request: &RegistrationRequest,
        approver_email: &str,
        approver_secret: &str,
    ) -> Result<Profile, ApprovalError> {
        // Step 1: the step most likely to fail (duplicate email, weak
        // credential); must abort the whole workflow with no partial state.
        let principal = self
            .identity
            .create_principal(&request.email, &request.secret)
            .await
            .map_err(|source| ApprovalError::IdentityCreation { source })?;

        info!(email = %request.email, uid = %principal.uid, "identity created for approval");

        // Step 2: the profile is the authorization record; without it the
        // new principal stays unauthorized.
        let profile = Profile {
            uid: principal.uid.clone(),
            full_name: request.full_name.clone(),
            email: request.email.to_lowercase(),
            organization: request.organization.clone(),
            role: request.requested_role,
            active: true,
            metadata: ApprovalMetadata {
                approved_by: approver_email.to_string(),
                approved_at: Utc::now(),
                requested_at: request.requested_at,
                last_status_change: None,
            },
        };

        if let Err(source) = self.profiles.create(profile.clone()).await {
            let rolled_back =
                self.compensate(&principal, false, approver_email, approver_secret).await;
            return Err(ApprovalError::ProfileWrite { source, rolled_back });
        }

        // Step 3: the request must not stay pending once a profile exists;
        // the pending queue is also the administrators' work list.
        if let Err(source) = self.requests.delete(&request.id).await {
            let rolled_back =
                self.compensate(&principal, true, approver_email, approver_secret).await;
            return Err(ApprovalError::RequestCleanup { source, rolled_back });
        }

        // Step 4: reverse the session switch from step 1.
        self.identity
            .authenticate(approver_email, approver_secret)
            .await
            .map_err(|source| ApprovalError::SessionRestore { source })?;

        info!(
            email = %profile.email,
            role = %profile.role,
            approved_by = %approver_email,
            "registration approved"
        );

        Ok(profile)
    }

    /// Reject a pending request: delete it, nothing else.
    ///
    /// Irreversible; callers are expected to have confirmed with the
    /// operator. Never creates a principal or profile.
    ///
    /// # Errors
    /// Returns an error if the request no longer exists or the delete
    /// fails.
    pub async fn reject(&self, request_id: &str) -> hubgate_domain::Result<()> {
        self.requests.delete(request_id).await?;
        info!(request_id, "registration rejected");
        Ok(())
    }

    /// Undo steps 1..N-1 after a failure, in reverse order.
    ///
    /// Returns true only if every compensation step succeeded. Individual
    /// failures are logged and do not stop the remaining steps: a
    /// best-effort rollback that restores the approver session is better
    /// than none.
    async fn compensate(
        &self,
        principal: &Principal,
        profile_written: bool,
        approver_email: &str,
        approver_secret: &str,
    ) -> bool {
        let mut clean = true;

        if profile_written {
            if let Err(err) = self.profiles.delete(&principal.uid).await {
                error!(uid = %principal.uid, error = %err, "compensation: profile delete failed");
                clean = false;
            }
        }

        if let Err(err) = self.identity.delete_principal(principal).await {
            error!(uid = %principal.uid, error = %err, "compensation: principal delete failed");
            clean = false;
        }

        if let Err(err) = self.identity.authenticate(approver_email, approver_secret).await {
            warn!(error = %err, "compensation: approver session restore failed");
            clean = false;
        }

        clean
    }
}
