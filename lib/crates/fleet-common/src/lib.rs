pub mod agent_policy;
pub mod package;
pub mod types;

pub use agent_policy::{
    AGENTLESS_POLICY_ID, AgentPolicyDraft, AgentPolicyItem, AgentPolicyRef, GlobalDataTag,
    MonitoringType,
};
pub use package::{
    AgentlessDeploymentMode, DeploymentMode, DeploymentModes, PackageInfo, PackagePolicy,
    PackagePolicyPackage, PolicyTemplate,
};
pub use types::*;
