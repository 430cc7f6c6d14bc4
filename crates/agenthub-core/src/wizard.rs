//! The "Host an Agent" deployment wizard.
//!
//! The wizard owns an ordered list of steps and the agent configurations being
//! edited. Step statuses are derived from `current_index` alone: everything
//! before it is completed, everything after it is pending, so they can never
//! disagree with the index.

use serde::{Deserialize, Serialize};

use crate::deployment::DeploymentRequest;
use crate::error::WizardError;

/// Identity of a wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStepId {
    Registry,
    Tools,
    Server,
    Testing,
    TestCases,
    Orchestration,
}

impl WizardStepId {
    pub fn as_str(self) -> &'static str {
        match self {
            WizardStepId::Registry => "registry",
            WizardStepId::Tools => "tools",
            WizardStepId::Server => "server",
            WizardStepId::Testing => "testing",
            WizardStepId::TestCases => "testcases",
            WizardStepId::Orchestration => "orchestration",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStepId::Registry => "Agent Registry",
            WizardStepId::Tools => "Tool Registry",
            WizardStepId::Server => "Server Registry",
            WizardStepId::Testing => "Testing",
            WizardStepId::TestCases => "Test Cases",
            WizardStepId::Orchestration => "Orchestration",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WizardStepId::Registry => "Register and configure your AI agent",
            WizardStepId::Tools => "Configure tools and integrations",
            WizardStepId::Server => "Configure hosting and deployment",
            WizardStepId::Testing => "Run validation and performance tests",
            WizardStepId::TestCases => "Define and execute test scenarios",
            WizardStepId::Orchestration => "Configure multi-agent coordination",
        }
    }
}

const SINGLE_AGENT_STEPS: [WizardStepId; 5] = [
    WizardStepId::Registry,
    WizardStepId::Tools,
    WizardStepId::Server,
    WizardStepId::Testing,
    WizardStepId::TestCases,
];

const MULTI_AGENT_STEPS: [WizardStepId; 6] = [
    WizardStepId::Registry,
    WizardStepId::Tools,
    WizardStepId::Server,
    WizardStepId::Testing,
    WizardStepId::TestCases,
    WizardStepId::Orchestration,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Pending,
    Current,
    Completed,
}

/// A step as rendered in the step indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardStep {
    pub id: WizardStepId,
    pub title: &'static str,
    pub description: &'static str,
    pub status: StepStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAllocation {
    pub cpu: String,
    pub memory: String,
    pub storage: String,
}

impl Default for ResourceAllocation {
    fn default() -> Self {
        Self {
            cpu: "1 vCPU".to_string(),
            memory: "2GB".to_string(),
            storage: "10GB".to_string(),
        }
    }
}

/// Reference to a file the user attached to a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub file_name: String,
    pub size_bytes: u64,
}

/// One agent being configured by the wizard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfiguration {
    pub name: String,
    pub description: String,
    pub file: Option<UploadedFile>,
    pub model: String,
    pub tools: Vec<String>,
    pub environment: String,
    pub resources: ResourceAllocation,
}

impl Default for AgentConfiguration {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            file: None,
            model: "gpt-4".to_string(),
            tools: Vec::new(),
            environment: "development".to_string(),
            resources: ResourceAllocation::default(),
        }
    }
}

/// Partial update of an [`AgentConfiguration`]; absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AgentConfigPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub file: Option<UploadedFile>,
    /// Detach the current file. Applied before `file`.
    pub remove_file: bool,
    pub model: Option<String>,
    pub tools: Option<Vec<String>>,
    pub environment: Option<String>,
    pub resources: Option<ResourceAllocation>,
}

impl AgentConfigPatch {
    fn apply(self, config: &mut AgentConfiguration) {
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(description) = self.description {
            config.description = description;
        }
        if self.remove_file {
            config.file = None;
        }
        if let Some(file) = self.file {
            config.file = Some(file);
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(tools) = self.tools {
            config.tools = tools;
        }
        if let Some(environment) = self.environment {
            config.environment = environment;
        }
        if let Some(resources) = self.resources {
            config.resources = resources;
        }
    }
}

/// How agents coordinate in multi-agent mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrchestrationPattern {
    #[default]
    Sequential,
    Parallel,
    Hierarchical,
    PeerToPeer,
}

/// Gate consulted by [`DeploymentWizard::next`] before leaving a step.
pub trait StepValidator: Send + Sync {
    /// `Err(reason)` keeps the wizard on `step`.
    fn validate(&self, step: WizardStepId, configs: &[AgentConfiguration]) -> Result<(), String>;
}

/// Lets every step through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl StepValidator for AcceptAll {
    fn validate(&self, _step: WizardStepId, _configs: &[AgentConfiguration]) -> Result<(), String> {
        Ok(())
    }
}

/// Requires every configuration to be named before leaving the registry step.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequiredFields;

impl StepValidator for RequiredFields {
    fn validate(&self, step: WizardStepId, configs: &[AgentConfiguration]) -> Result<(), String> {
        if step != WizardStepId::Registry {
            return Ok(());
        }
        match configs.iter().position(|c| c.name.trim().is_empty()) {
            Some(index) => Err(format!("agent {} has no name", index + 1)),
            None => Ok(()),
        }
    }
}

/// Result of a successful [`DeploymentWizard::next`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAdvance {
    Moved { from: usize, to: usize },
    /// `next()` on the last step: the configuration is final.
    Completed(DeploymentRequest),
}

/// Serializable snapshot for the wizard page.
#[derive(Debug, Clone, Serialize)]
pub struct WizardView {
    pub multi_agent: bool,
    pub current_index: usize,
    pub total_steps: usize,
    pub progress_percent: f64,
    pub on_last_step: bool,
    pub steps: Vec<WizardStep>,
    pub configurations: Vec<AgentConfiguration>,
    pub orchestration: Option<OrchestrationPattern>,
}

pub struct DeploymentWizard {
    multi_agent: bool,
    current_index: usize,
    configurations: Vec<AgentConfiguration>,
    orchestration: OrchestrationPattern,
    validator: Box<dyn StepValidator>,
}

impl Default for DeploymentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl DeploymentWizard {
    /// A single-agent wizard on the first step that accepts every step.
    pub fn new() -> Self {
        Self::with_validator(Box::new(AcceptAll))
    }

    pub fn with_validator(validator: Box<dyn StepValidator>) -> Self {
        Self {
            multi_agent: false,
            current_index: 0,
            configurations: vec![AgentConfiguration::default()],
            orchestration: OrchestrationPattern::default(),
            validator,
        }
    }

    /// Back to the initial state, keeping the validator.
    pub fn reset(&mut self) {
        self.multi_agent = false;
        self.current_index = 0;
        self.configurations = vec![AgentConfiguration::default()];
        self.orchestration = OrchestrationPattern::default();
    }

    fn step_ids(&self) -> &'static [WizardStepId] {
        if self.multi_agent {
            &MULTI_AGENT_STEPS
        } else {
            &SINGLE_AGENT_STEPS
        }
    }

    pub fn is_multi_agent(&self) -> bool {
        self.multi_agent
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_steps(&self) -> usize {
        self.step_ids().len()
    }

    pub fn current_step(&self) -> WizardStepId {
        self.step_ids()[self.current_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_index + 1 == self.total_steps()
    }

    pub fn configurations(&self) -> &[AgentConfiguration] {
        &self.configurations
    }

    pub fn orchestration(&self) -> Option<OrchestrationPattern> {
        self.multi_agent.then_some(self.orchestration)
    }

    pub fn status_of(&self, index: usize) -> StepStatus {
        match index.cmp(&self.current_index) {
            std::cmp::Ordering::Less => StepStatus::Completed,
            std::cmp::Ordering::Equal => StepStatus::Current,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    pub fn steps(&self) -> Vec<WizardStep> {
        self.step_ids()
            .iter()
            .enumerate()
            .map(|(index, &id)| WizardStep {
                id,
                title: id.title(),
                description: id.description(),
                status: self.status_of(index),
            })
            .collect()
    }

    /// `(current + 1) / total` as a percentage.
    pub fn progress_percent(&self) -> f64 {
        (self.current_index + 1) as f64 / self.total_steps() as f64 * 100.0
    }

    /// Validate the current step, then move forward or complete.
    pub fn next(&mut self) -> Result<WizardAdvance, WizardError> {
        let step = self.current_step();
        self.validator
            .validate(step, &self.configurations)
            .map_err(|reason| WizardError::Validation { step, reason })?;

        if self.is_last_step() {
            tracing::info!(
                agents = self.configurations.len(),
                multi_agent = self.multi_agent,
                "deployment wizard completed"
            );
            return Ok(WizardAdvance::Completed(self.deployment_request()));
        }
        let from = self.current_index;
        self.current_index += 1;
        Ok(WizardAdvance::Moved {
            from,
            to: self.current_index,
        })
    }

    /// Step back. Returns false at the first step.
    pub fn prev(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Jump straight to `index` without validation, clamped into range.
    /// Returns the index actually selected.
    pub fn go_to_step(&mut self, index: usize) -> usize {
        self.current_index = index.min(self.total_steps() - 1);
        self.current_index
    }

    /// Switch between single- and multi-agent mode.
    ///
    /// The index is clamped if the step it pointed at no longer exists.
    /// Single-agent mode keeps only the first configuration.
    pub fn set_multi_agent(&mut self, multi_agent: bool) {
        if self.multi_agent == multi_agent {
            return;
        }
        self.multi_agent = multi_agent;
        self.current_index = self.current_index.min(self.total_steps() - 1);
        if !multi_agent {
            self.configurations.truncate(1);
        }
    }

    /// Append a default configuration. Multi-agent mode only.
    pub fn add_configuration(&mut self) -> Result<usize, WizardError> {
        if !self.multi_agent {
            return Err(WizardError::MultiAgentOnly);
        }
        self.configurations.push(AgentConfiguration::default());
        Ok(self.configurations.len() - 1)
    }

    /// Remove the configuration at `index`. Multi-agent mode only, and never
    /// the last remaining one.
    pub fn remove_configuration(
        &mut self,
        index: usize,
    ) -> Result<AgentConfiguration, WizardError> {
        if !self.multi_agent {
            return Err(WizardError::MultiAgentOnly);
        }
        if index >= self.configurations.len() {
            return Err(WizardError::NoSuchConfiguration(index));
        }
        if self.configurations.len() == 1 {
            return Err(WizardError::LastConfiguration);
        }
        Ok(self.configurations.remove(index))
    }

    pub fn update_configuration(
        &mut self,
        index: usize,
        patch: AgentConfigPatch,
    ) -> Result<&AgentConfiguration, WizardError> {
        let config = self
            .configurations
            .get_mut(index)
            .ok_or(WizardError::NoSuchConfiguration(index))?;
        patch.apply(config);
        Ok(config)
    }

    pub fn set_orchestration(&mut self, pattern: OrchestrationPattern) -> Result<(), WizardError> {
        if !self.multi_agent {
            return Err(WizardError::MultiAgentOnly);
        }
        self.orchestration = pattern;
        Ok(())
    }

    pub fn deployment_request(&self) -> DeploymentRequest {
        DeploymentRequest {
            multi_agent: self.multi_agent,
            configurations: self.configurations.clone(),
            orchestration: self.orchestration(),
        }
    }

    pub fn snapshot(&self) -> WizardView {
        WizardView {
            multi_agent: self.multi_agent,
            current_index: self.current_index,
            total_steps: self.total_steps(),
            progress_percent: self.progress_percent(),
            on_last_step: self.is_last_step(),
            steps: self.steps(),
            configurations: self.configurations.clone(),
            orchestration: self.orchestration(),
        }
    }
}
