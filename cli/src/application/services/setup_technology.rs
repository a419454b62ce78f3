//! Application service: setup technology controller.
//!
//! Owns the agent-based / agentless selection for one integration form and
//! drives the form's callbacks as the user toggles it. Imports only from
//! `crate::domain` and `crate::application::ports`; all I/O is routed through
//! the injected ports.
//!
//! The controller lives on a single logical thread. The only background work
//! is the one-shot lookup of the shared agentless policy, spawned on the
//! current tokio runtime by [`SetupTechnologyController::mount`]. Its result
//! comes back over a oneshot channel and is applied by the owner through
//! [`SetupTechnologyController::poll_lookup`] or
//! [`SetupTechnologyController::settle`], and only if the lifecycle token it
//! was started under is still current.

use std::collections::HashSet;
use std::sync::Arc;

use fleet_common::{
    AGENTLESS_POLICY_ID, AgentPolicyDraft, AgentPolicyItem, AgentPolicyRef, PackageInfo,
    PackagePolicy,
};
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::task::AbortHandle;

use crate::application::ports::{AgentPolicyLookup, PolicyDraftGenerator, SetupCallbacks};
use crate::domain::agent_policy::{agentless_global_data_tags, agentless_policy_name};
use crate::domain::capability::CapabilityFlags;
use crate::domain::error::LookupError;
use crate::domain::setup_technology::{SelectedPolicyTab, SetupTechnology, initial_setup_technology};

type LookupOutcome = Result<AgentPolicyItem, LookupError>;

/// Inputs supplied by the owning form when the controller mounts.
#[derive(Debug, Clone, Default)]
pub struct SetupTechnologyParams {
    /// Resolved agentless capability.
    pub capabilities: CapabilityFlags,
    /// The caller's agent-based draft, restored when switching back.
    pub new_agent_policy: AgentPolicyDraft,
    /// The package policy being authored.
    pub package_policy: PackagePolicy,
    pub package_info: Option<PackageInfo>,
    pub is_edit_page: bool,
    /// Agent policies the package policy is linked to (edit page only).
    pub agent_policies: Vec<AgentPolicyRef>,
}

/// The contract exposed to the owning form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetupTechnologyState {
    pub is_agentless_enabled: bool,
    pub is_agentless_api_enabled: bool,
    pub is_default_agentless_policy_enabled: bool,
    pub selected_setup_technology: SetupTechnology,
}

struct PendingLookup {
    token: u64,
    rx: oneshot::Receiver<LookupOutcome>,
    abort: AbortHandle,
}

/// Stateful setup technology controller.
pub struct SetupTechnologyController<G, C> {
    capabilities: CapabilityFlags,
    new_agent_policy: AgentPolicyDraft,
    package_policy_name: String,
    package_info: Option<PackageInfo>,
    is_edit_page: bool,
    agent_policies: Vec<AgentPolicyRef>,
    selected: SetupTechnology,
    agentless_draft: AgentPolicyDraft,
    agentless_policy: Option<AgentPolicyRef>,
    /// Bumped whenever the edit context changes; lookups started under an
    /// older token are discarded.
    lifecycle_token: u64,
    lookup_started: bool,
    pending: Option<PendingLookup>,
    generator: G,
    lookup: Arc<dyn AgentPolicyLookup>,
    callbacks: C,
}

impl<G, C> SetupTechnologyController<G, C>
where
    G: PolicyDraftGenerator,
    C: SetupCallbacks,
{
    /// Create the controller and compute the initial selection. No callbacks
    /// fire and no lookup starts until [`mount`](Self::mount).
    pub fn new(
        params: SetupTechnologyParams,
        generator: G,
        lookup: Arc<dyn AgentPolicyLookup>,
        callbacks: C,
    ) -> Self {
        let selected = initial_setup_technology(
            &params.capabilities,
            params.is_edit_page,
            &params.agent_policies,
            params.package_info.as_ref(),
        );
        let agentless_draft = synthesize_agentless_draft(&generator, &params.package_policy.name);

        tracing::debug!(
            package_policy = %params.package_policy.name,
            edit = params.is_edit_page,
            selected = %selected,
            "initial setup technology",
        );

        Self {
            capabilities: params.capabilities,
            new_agent_policy: params.new_agent_policy,
            package_policy_name: params.package_policy.name,
            package_info: params.package_info,
            is_edit_page: params.is_edit_page,
            agent_policies: params.agent_policies,
            selected,
            agentless_draft,
            agentless_policy: None,
            lifecycle_token: 0,
            lookup_started: false,
            pending: None,
            generator,
            lookup,
            callbacks,
        }
    }

    /// Start the one-shot lookup of the shared agentless policy when the
    /// deployment provides one and the form is not editing.
    ///
    /// Runs at most once per controller. Without a tokio runtime the lookup is
    /// skipped and the controller behaves as if it failed.
    pub fn mount(&mut self) {
        if self.lookup_started
            || !self.capabilities.is_default_agentless_policy_enabled
            || self.is_edit_page
        {
            return;
        }
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            tracing::warn!("no async runtime; skipping agentless policy lookup");
            return;
        };
        self.lookup_started = true;

        let (tx, rx) = oneshot::channel();
        let lookup = Arc::clone(&self.lookup);
        let task = runtime.spawn(async move {
            let outcome = lookup.get_one_agent_policy(AGENTLESS_POLICY_ID).await;
            // Receiver gone means the controller was dropped.
            let _ = tx.send(outcome);
        });

        tracing::info!(id = AGENTLESS_POLICY_ID, "looking up agentless policy");
        self.pending = Some(PendingLookup {
            token: self.lifecycle_token,
            rx,
            abort: task.abort_handle(),
        });
    }

    /// Apply the lookup result if it has arrived. Never blocks.
    ///
    /// Returns `true` when a result was consumed (applied or discarded).
    pub fn poll_lookup(&mut self) -> bool {
        let Some(pending) = self.pending.as_mut() else {
            return false;
        };
        let token = pending.token;
        let outcome = match pending.rx.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::error::TryRecvError::Empty) => return false,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                tracing::warn!("agentless policy lookup ended without a result");
                return true;
            }
        };
        self.pending = None;
        self.apply_lookup(token, outcome);
        true
    }

    /// Wait for the pending lookup, if any, and apply its result.
    pub async fn settle(&mut self) {
        let Some(pending) = self.pending.take() else {
            return;
        };
        match pending.rx.await {
            Ok(outcome) => self.apply_lookup(pending.token, outcome),
            Err(_) => tracing::warn!("agentless policy lookup ended without a result"),
        }
    }

    fn apply_lookup(&mut self, token: u64, outcome: LookupOutcome) {
        if token != self.lifecycle_token || self.is_edit_page {
            tracing::debug!("discarding stale agentless policy lookup");
            return;
        }
        match outcome {
            Ok(item) => {
                tracing::info!(id = %item.id, "found existing agentless policy");
                self.agentless_policy = Some(AgentPolicyRef {
                    supports_agentless: true,
                    ..item.to_ref()
                });
            }
            Err(error) => {
                tracing::warn!(%error, "agentless policy lookup failed; a new policy will be used");
            }
        }
    }

    /// Switch between agent-based and agentless setup.
    ///
    /// No-op when `target` is already selected or agentless is unavailable.
    /// `policy_template_name` selects the template whose agentless ownership
    /// labels become the draft's global data tags.
    pub fn handle_setup_technology_change(
        &mut self,
        target: SetupTechnology,
        policy_template_name: Option<&str>,
    ) {
        if !self.capabilities.is_agentless_enabled || target == self.selected {
            return;
        }
        self.poll_lookup();

        match target {
            SetupTechnology::Agentless => {
                let mut draft = synthesize_agentless_draft(&self.generator, &self.package_policy_name);
                draft.global_data_tags =
                    agentless_global_data_tags(self.package_info.as_ref(), policy_template_name);

                self.callbacks.set_new_agent_policy(&draft);
                if let Some(policy) = &self.agentless_policy {
                    self.callbacks
                        .update_agent_policies(std::slice::from_ref(policy));
                }
                self.callbacks
                    .set_selected_policy_tab(SelectedPolicyTab::Existing);
                self.agentless_draft = draft;
            }
            SetupTechnology::AgentBased => {
                self.callbacks.set_new_agent_policy(&self.new_agent_policy);
                self.callbacks.set_selected_policy_tab(SelectedPolicyTab::New);
            }
        }

        tracing::info!(from = %self.selected, to = %target, "setup technology changed");
        self.selected = target;
    }

    /// Track a rename of the package policy. While agentless is selected on a
    /// new integration, the agentless draft follows the new name and keeps its
    /// data tags.
    pub fn set_package_policy_name(&mut self, name: &str) {
        if self.package_policy_name == name {
            return;
        }
        self.package_policy_name = name.to_string();

        // Editing keeps the existing policy, so there is no draft to rename.
        if self.is_edit_page || self.selected != SetupTechnology::Agentless {
            return;
        }
        let next = agentless_policy_name(name);
        if self.agentless_draft.name == next {
            return;
        }
        self.agentless_draft.name = next;
        self.callbacks.set_new_agent_policy(&self.agentless_draft);
    }

    /// Update the edit context. When it changes meaningfully the selection is
    /// recomputed and any pending lookup becomes stale. No callbacks fire.
    ///
    /// Linked policies only drive the selection while editing, so a policy
    /// change on a new integration is recorded without invalidating anything.
    pub fn set_edit_context(&mut self, is_edit_page: bool, agent_policies: Vec<AgentPolicyRef>) {
        let same_policies = self.agent_policies.iter().collect::<HashSet<_>>()
            == agent_policies.iter().collect::<HashSet<_>>();
        if is_edit_page == self.is_edit_page && same_policies {
            return;
        }
        if !is_edit_page && !self.is_edit_page {
            self.agent_policies = agent_policies;
            return;
        }

        self.is_edit_page = is_edit_page;
        self.agent_policies = agent_policies;
        self.lifecycle_token += 1;
        self.selected = initial_setup_technology(
            &self.capabilities,
            self.is_edit_page,
            &self.agent_policies,
            self.package_info.as_ref(),
        );
        tracing::debug!(edit = is_edit_page, selected = %self.selected, "edit context changed");
    }

    #[must_use]
    pub fn selected_setup_technology(&self) -> SetupTechnology {
        self.selected
    }

    #[must_use]
    pub fn capabilities(&self) -> CapabilityFlags {
        self.capabilities
    }

    /// Id of the shared agentless policy, once the lookup has found it.
    #[must_use]
    pub fn agentless_policy_id(&self) -> Option<&str> {
        self.agentless_policy.as_ref().map(|p| p.id.as_str())
    }

    /// Returns `true` while the mount-time lookup has not been applied.
    #[must_use]
    pub fn is_lookup_pending(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn state(&self) -> SetupTechnologyState {
        SetupTechnologyState {
            is_agentless_enabled: self.capabilities.is_agentless_enabled,
            is_agentless_api_enabled: self.capabilities.is_agentless_api_enabled,
            is_default_agentless_policy_enabled: self
                .capabilities
                .is_default_agentless_policy_enabled,
            selected_setup_technology: self.selected,
        }
    }

    /// The callbacks handle, e.g. to inspect what a recorder captured.
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }
}

impl<G, C> Drop for SetupTechnologyController<G, C> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort.abort();
        }
    }
}

fn synthesize_agentless_draft(
    generator: &impl PolicyDraftGenerator,
    package_policy_name: &str,
) -> AgentPolicyDraft {
    let mut draft = generator.generate_defaults(&agentless_policy_name(package_policy_name));
    draft.supports_agentless = true;
    draft
}
