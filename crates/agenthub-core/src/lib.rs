pub mod agent;
pub mod cost;
pub mod deployment;
pub mod error;
pub mod events;
pub mod incident;
pub mod metrics;
pub mod notification;
pub mod onboarding;
pub mod playground;
pub mod seed;
pub mod time;
pub mod view_model;
pub mod wizard;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::agent::{Agent, AgentStatus, Performance, Sessions, TokenUsage};
    use crate::events::{DashboardEvent, EventKind};
    use crate::notification::NotificationLevel;
    use crate::wizard::{AgentConfigPatch, DeploymentWizard};

    /// An active agent with the given name, success rate and per-session cost.
    pub fn make_agent(id: &str, name: &str, success_rate: f64, cost_per_session: f64) -> Agent {
        Agent {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("Test agent {id}"),
            status: AgentStatus::Active,
            version: "v1.0.0".to_string(),
            model: "GPT-4".to_string(),
            last_activity: "1 minute ago".to_string(),
            performance: Performance {
                success_rate,
                response_time: 100.0,
                uptime: 99.0,
                error_rate: 100.0 - success_rate,
            },
            sessions: Sessions {
                total: 100,
                cost_per_session,
            },
            tokens: TokenUsage {
                input: 1000,
                output: 500,
                total: 1500,
            },
            tags: vec!["test".to_string()],
        }
    }

    /// A generic test event with the given title.
    pub fn make_test_event(title: &str) -> DashboardEvent {
        DashboardEvent::new(EventKind::Custom, NotificationLevel::Info, title)
    }

    /// A patch that names the agent and fills in a description and tools.
    pub fn complete_patch(name: &str) -> AgentConfigPatch {
        AgentConfigPatch {
            name: Some(name.to_string()),
            description: Some(format!("{name} description")),
            tools: Some(vec!["web-search".to_string()]),
            ..AgentConfigPatch::default()
        }
    }

    /// Walk a wizard forward until it reports completion or `max` steps pass.
    pub fn drive_to_end(wizard: &mut DeploymentWizard, max: usize) -> bool {
        for _ in 0..max {
            if let Ok(crate::wizard::WizardAdvance::Completed(_)) = wizard.next() {
                return true;
            }
        }
        false
    }
}
