//! Explicit client context owning connection, registry, and scheduler.
//!
//! All mutable client state lives in [`ClientContext`]: the socket,
//! receive buffer, agent registry, and animation clocks are threaded
//! through every operation, with no hidden globals. One
//! [`ClientContext::step`] call per tick runs the fixed pipeline:
//! network poll → registry mutation → animation tick. External
//! collaborators (renderer, audio) read the registry and scheduler
//! between steps and never mutate them.

use crate::anim::{AnimationScheduler, SchedulerEvent};
use crate::config::ClientConfig;
use crate::domain::{AgentRegistry, MAX_AGENTS};
use crate::error::ClientError;
use crate::net::{Connection, ConnectionState};
use crate::protocol::{apply_status, ActionKind, IngestOutcome, OutboundMessage};

/// Owns every piece of mutable client state and drives the tick pipeline.
#[derive(Debug)]
pub struct ClientContext {
    config: ClientConfig,
    connection: Connection,
    registry: AgentRegistry,
    scheduler: AnimationScheduler,
    /// Ticks spent not-open since the last connect attempt.
    reconnect_ticks: u32,
}

impl ClientContext {
    /// Creates a disconnected context for `config`.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            connection: Connection::new(),
            registry: AgentRegistry::new(),
            scheduler: AnimationScheduler::new(),
            reconnect_ticks: 0,
        }
    }

    /// Read access to the agent registry for external collaborators.
    #[must_use]
    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    /// Read access to the animation scheduler for the external renderer.
    #[must_use]
    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Current connection lifecycle state.
    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    /// Attempts a connection immediately, outside the countdown.
    ///
    /// Resolution and connect block the tick loop; callers should draw at
    /// least one frame before the first attempt so a slow or absent
    /// network cannot freeze an empty display.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Resolution`] or [`ClientError::Connect`] on
    /// failure, leaving the state disconnected for the countdown to retry.
    pub async fn connect(&mut self) -> Result<(), ClientError> {
        self.reconnect_ticks = 0;
        self.connection
            .connect(&self.config.server_host, self.config.server_port)
            .await
    }

    /// Runs one tick: reconnect countdown, poll, ingest, animate.
    ///
    /// Returns the slots whose agents just entered the waiting state; the
    /// caller plays the one-shot prompt-attention cue for each. Status
    /// updates are fully applied before animations advance, so
    /// presentation never lags the registry by more than one tick.
    ///
    /// The reconnect countdown is a fixed interval, not a backoff: every
    /// `reconnect_interval_ticks` ticks spent not-open trigger one
    /// connect attempt, indefinitely. Connect is the single blocking
    /// point in the loop; first call therefore happens a full interval
    /// after startup, safely past the first rendered frame.
    pub async fn step(&mut self) -> Vec<usize> {
        self.run_reconnect_countdown().await;

        for payload in self.connection.poll() {
            match apply_status(&payload, &mut self.registry) {
                IngestOutcome::Applied { slot } => {
                    tracing::debug!(slot, "status applied");
                }
                IngestOutcome::Dropped(reason) => {
                    tracing::debug!(?reason, "status dropped");
                }
            }
        }

        let mut cues = Vec::new();
        for event in self.scheduler.advance(&self.registry) {
            match event {
                SchedulerEvent::PromptCue { slot } => cues.push(slot),
                SchedulerEvent::SpawnComplete { slot } => {
                    if let Some(record) = self.registry.get_mut(slot) {
                        record.spawning = false;
                    }
                    tracing::debug!(slot, "spawn animation complete");
                }
            }
        }
        cues
    }

    /// Replies to a pending permission prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] while the handshake is not
    /// confirmed, or a send failure from the connection.
    pub async fn send_action(&mut self, agent: &str, action: ActionKind) -> Result<(), ClientError> {
        self.send(&OutboundMessage::Action {
            agent: agent.to_string(),
            action,
        })
        .await
    }

    /// Pushes the auto-edit switch to the server.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConnected`] while the handshake is not
    /// confirmed, or a send failure from the connection.
    pub async fn send_auto_edit(&mut self, auto_edit: bool) -> Result<(), ClientError> {
        self.send(&OutboundMessage::Config { auto_edit }).await
    }

    /// Requests a new agent session and reserves its slot locally.
    ///
    /// Sends `{"type":"command","command":"spawn"}` for `name`, creates
    /// the record with the spawn animation running, and returns the slot.
    /// A name that already has a slot is returned as-is without
    /// re-spawning.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::RegistryFull`] when no slot is free,
    /// [`ClientError::NotConnected`] while the handshake is not
    /// confirmed, or a send failure from the connection.
    pub async fn spawn_agent(&mut self, name: &str) -> Result<usize, ClientError> {
        if let Some(slot) = self.registry.lookup(name) {
            return Ok(slot);
        }
        if self.registry.len() >= MAX_AGENTS {
            return Err(ClientError::RegistryFull);
        }

        self.send(&OutboundMessage::Command {
            agent: name.to_string(),
            command: "spawn".to_string(),
        })
        .await?;

        let slot = self.registry.upsert(name)?;
        if let Some(record) = self.registry.get_mut(slot) {
            record.spawning = true;
        }
        self.scheduler.begin_spawn(slot);
        tracing::info!(slot, name, "spawn requested");
        Ok(slot)
    }

    async fn send(&mut self, message: &OutboundMessage) -> Result<(), ClientError> {
        let json = serde_json::to_string(message)?;
        self.connection.send_text(&json).await
    }

    async fn run_reconnect_countdown(&mut self) {
        if self.connection.is_open() {
            self.reconnect_ticks = 0;
            return;
        }
        self.reconnect_ticks += 1;
        if self.reconnect_ticks < self.config.reconnect_interval_ticks {
            return;
        }
        self.reconnect_ticks = 0;
        if let Err(err) = self
            .connection
            .connect(&self.config.server_host, self.config.server_port)
            .await
        {
            tracing::debug!(error = %err, "connect attempt failed");
        }
    }
}
