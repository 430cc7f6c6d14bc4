use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use agenthub_core::agent::AgentCollection;
use agenthub_core::cost::CostEntry;
use agenthub_core::deployment::{DeploymentTarget, LoggedDeployment};
use agenthub_core::events::DashboardEvent;
use agenthub_core::incident::IncidentBoard;
use agenthub_core::notification::NotificationQueue;
use agenthub_core::onboarding::{FlagStore, MemoryFlagStore, OnboardingTour};
use agenthub_core::playground::PlaygroundSession;
use agenthub_core::seed;
use agenthub_core::wizard::{DeploymentWizard, RequiredFields};

use crate::config::ServerConfig;
use crate::event_store::EventStore;
use crate::flag_store::JsonFileFlagStore;
use crate::playground::RunHandle;

pub type SharedEventStore = Arc<RwLock<EventStore>>;

/// Tour cursor plus the store its completion flag lives in.
pub struct OnboardingState {
    pub tour: OnboardingTour,
    pub flags: Box<dyn FlagStore + Send + Sync>,
}

#[derive(Clone)]
pub struct AppState {
    pub agents: Arc<RwLock<AgentCollection>>,
    pub wizard: Arc<RwLock<DeploymentWizard>>,
    pub playgrounds: Arc<RwLock<HashMap<String, PlaygroundSession>>>,
    pub runs: Arc<RwLock<HashMap<Uuid, RunHandle>>>,
    pub notifications: Arc<RwLock<NotificationQueue>>,
    pub onboarding: Arc<RwLock<OnboardingState>>,
    pub incidents: Arc<RwLock<IncidentBoard>>,
    pub costs: Arc<Vec<CostEntry>>,
    pub event_store: SharedEventStore,
    pub deployments: Arc<dyn DeploymentTarget>,
    pub sse_subscriber_count: Arc<AtomicUsize>,
    /// Cancelled on shutdown; background tasks derive child tokens from it.
    pub shutdown: CancellationToken,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let flags: Box<dyn FlagStore + Send + Sync> = match &config.onboarding.flag_path {
            Some(path) => Box::new(JsonFileFlagStore::open(path)),
            None => Box::new(MemoryFlagStore::default()),
        };
        let wizard = if config.wizard.strict_validation {
            DeploymentWizard::with_validator(Box::new(RequiredFields))
        } else {
            DeploymentWizard::new()
        };
        Self {
            agents: Arc::new(RwLock::new(AgentCollection::new(seed::seed_agents()))),
            wizard: Arc::new(RwLock::new(wizard)),
            playgrounds: Arc::new(RwLock::new(HashMap::new())),
            runs: Arc::new(RwLock::new(HashMap::new())),
            notifications: Arc::new(RwLock::new(NotificationQueue::with_capacity(
                config.limits.max_pending_notifications,
            ))),
            onboarding: Arc::new(RwLock::new(OnboardingState {
                tour: OnboardingTour::new(),
                flags,
            })),
            incidents: Arc::new(RwLock::new(IncidentBoard::seeded())),
            costs: Arc::new(seed::seed_cost_entries()),
            event_store: Arc::new(RwLock::new(EventStore::with_capacity(
                config.limits.max_stored_events,
                config.limits.broadcast_capacity,
            ))),
            deployments: Arc::new(LoggedDeployment),
            sse_subscriber_count: Arc::new(AtomicUsize::new(0)),
            shutdown: CancellationToken::new(),
            config: Arc::new(config),
        }
    }

    /// Replace the deployment service wizard completions are handed to.
    pub fn with_deployment_target(mut self, target: Arc<dyn DeploymentTarget>) -> Self {
        self.deployments = target;
        self
    }

    /// Record an event, broadcast it to SSE subscribers and queue it as a toast.
    pub async fn emit(&self, event: DashboardEvent) {
        tracing::debug!(kind = ?event.kind, title = %event.title, "dashboard event");
        self.notifications.write().await.push_event(&event);
        self.event_store.write().await.insert(event);
    }
}

/// Counts a live connection for as long as it is held.
pub struct ConnectionGuard {
    counter: Arc<AtomicUsize>,
}

impl ConnectionGuard {
    pub fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::Relaxed);
    }
}
