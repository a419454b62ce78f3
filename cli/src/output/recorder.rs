//! `RecordingCallbacks`: Presentation-layer implementation of `SetupCallbacks`.
//!
//! The CLI has no form to update, so callback invocations are captured in
//! order and rendered afterwards.

use std::cell::RefCell;

use fleet_common::{AgentPolicyDraft, AgentPolicyRef, SelectedPolicyTab};
use serde::Serialize;

use crate::application::ports::SetupCallbacks;
use crate::application::services::setup_technology::SetupTechnologyState;

/// One callback invocation made by the setup controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "callback", rename_all = "snake_case")]
pub enum SetupEvent {
    SetNewAgentPolicy { policy: AgentPolicyDraft },
    UpdateAgentPolicies { policies: Vec<AgentPolicyRef> },
    SetSelectedPolicyTab { tab: SelectedPolicyTab },
}

/// Records every callback in invocation order.
#[derive(Debug, Default)]
pub struct RecordingCallbacks {
    events: RefCell<Vec<SetupEvent>>,
}

impl RecordingCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the events recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<SetupEvent> {
        self.events.borrow().clone()
    }

    /// The most recent draft passed to `set_new_agent_policy`.
    #[must_use]
    pub fn latest_policy(&self) -> Option<AgentPolicyDraft> {
        self.events.borrow().iter().rev().find_map(|e| match e {
            SetupEvent::SetNewAgentPolicy { policy } => Some(policy.clone()),
            _ => None,
        })
    }
}

impl SetupCallbacks for RecordingCallbacks {
    fn set_new_agent_policy(&self, policy: &AgentPolicyDraft) {
        self.events.borrow_mut().push(SetupEvent::SetNewAgentPolicy {
            policy: policy.clone(),
        });
    }

    fn update_agent_policies(&self, policies: &[AgentPolicyRef]) {
        self.events.borrow_mut().push(SetupEvent::UpdateAgentPolicies {
            policies: policies.to_vec(),
        });
    }

    fn set_selected_policy_tab(&self, tab: SelectedPolicyTab) {
        self.events
            .borrow_mut()
            .push(SetupEvent::SetSelectedPolicyTab { tab });
    }
}

/// Outcome of a `setup` run: selection before and after, what the controller
/// asked the form to do, and the draft it last handed over.
#[derive(Debug, Clone, Serialize)]
pub struct SetupReport {
    pub initial: SetupTechnologyState,
    #[serde(rename = "final")]
    pub final_state: SetupTechnologyState,
    pub agentless_policy_id: Option<String>,
    pub events: Vec<SetupEvent>,
    pub agent_policy: Option<AgentPolicyDraft>,
}
