//! Shared connection state

use core::cell::RefCell;
use core::net::Ipv4Addr;

use alloc::string::ToString;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use log::{info, warn};
use marquee_protocol::StatusRecord;

/// Network link state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkState {
    #[default]
    Disconnected,
    /// Network up, broker session not yet confirmed
    LinkUp,
    /// Broker session open
    Operational,
}

/// Reasons to publish a status record right away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusTrigger {
    /// Broker (re)connection confirmed
    Connected,
    /// A message arrived on `<prefix>/ping`
    Ping,
}

/// Counters since boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectionStats {
    pub link_ups: u32,
    pub broker_connections: u32,
    pub messages: u32,
    pub uptime_minutes: u32,
}

impl ConnectionStats {
    pub const fn new() -> Self {
        Self {
            link_ups: 0,
            broker_connections: 0,
            messages: 0,
            uptime_minutes: 0,
        }
    }
}

struct Shared {
    stats: ConnectionStats,
    link: LinkState,
    address: Ipv4Addr,
    resubscribe_pending: bool,
    pending: PendingTriggers,
}

/// Triggers not yet taken by the publisher, counted per kind
#[derive(Debug, Clone, Copy, Default)]
struct PendingTriggers {
    connected: u32,
    pings: u32,
}

impl PendingTriggers {
    const fn new() -> Self {
        Self {
            connected: 0,
            pings: 0,
        }
    }

    fn push(&mut self, trigger: StatusTrigger) {
        let count = match trigger {
            StatusTrigger::Connected => &mut self.connected,
            StatusTrigger::Ping => &mut self.pings,
        };
        *count = count.saturating_add(1);
    }

    /// Connections are reported before pings
    fn pop(&mut self) -> Option<StatusTrigger> {
        if self.connected > 0 {
            self.connected -= 1;
            Some(StatusTrigger::Connected)
        } else if self.pings > 0 {
            self.pings -= 1;
            Some(StatusTrigger::Ping)
        } else {
            None
        }
    }
}

/// Connection state shared by the transport glue and the connectivity tasks
pub struct ConnectionContext<M: RawMutex> {
    shared: Mutex<M, RefCell<Shared>>,
    wake: Signal<M, ()>,
}

impl<M: RawMutex> ConnectionContext<M> {
    pub const fn new() -> Self {
        Self {
            shared: Mutex::new(RefCell::new(Shared {
                stats: ConnectionStats::new(),
                link: LinkState::Disconnected,
                address: Ipv4Addr::UNSPECIFIED,
                resubscribe_pending: false,
                pending: PendingTriggers::new(),
            })),
            wake: Signal::new(),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Shared) -> R) -> R {
        self.shared.lock(|shared| f(&mut shared.borrow_mut()))
    }

    /// Network link came up with `address`
    pub fn link_up(&self, address: Ipv4Addr) {
        let count = self.with(|s| {
            s.stats.link_ups = s.stats.link_ups.wrapping_add(1);
            s.link = LinkState::LinkUp;
            s.address = address;
            s.stats.link_ups
        });
        info!("link up as {} ({} total)", address, count);
    }

    /// Network link lost
    pub fn link_down(&self) {
        self.with(|s| {
            s.link = LinkState::Disconnected;
            s.address = Ipv4Addr::UNSPECIFIED;
        });
        warn!("link down");
    }

    /// Broker session (re)established
    ///
    /// Subscriptions are renewed by the status publisher before its next
    /// publish.
    pub fn broker_connected(&self) {
        let count = self.with(|s| {
            s.stats.broker_connections = s.stats.broker_connections.wrapping_add(1);
            s.link = LinkState::Operational;
            s.resubscribe_pending = true;
            s.stats.broker_connections
        });
        info!("broker connected ({} total)", count);
        self.trigger(StatusTrigger::Connected);
    }

    /// Request an immediate status publish
    pub fn ping(&self) {
        self.trigger(StatusTrigger::Ping);
    }

    fn trigger(&self, trigger: StatusTrigger) {
        self.with(|s| s.pending.push(trigger));
        self.wake.signal(());
    }

    /// Count one inbound message
    pub fn count_message(&self) {
        self.with(|s| s.stats.messages = s.stats.messages.wrapping_add(1));
    }

    /// Add one minute of uptime
    pub fn tick_uptime(&self) {
        self.with(|s| s.stats.uptime_minutes = s.stats.uptime_minutes.wrapping_add(1));
    }

    pub fn stats(&self) -> ConnectionStats {
        self.with(|s| s.stats)
    }

    pub fn link_state(&self) -> LinkState {
        self.with(|s| s.link)
    }

    /// Current address, unspecified while the link is down
    pub fn address(&self) -> Ipv4Addr {
        self.with(|s| s.address)
    }

    /// Whether subscriptions must be renewed; clears the flag
    pub fn take_resubscribe(&self) -> bool {
        self.with(|s| core::mem::take(&mut s.resubscribe_pending))
    }

    /// Wait for the next status trigger
    ///
    /// Every trigger is returned exactly once, however many arrive before
    /// the publisher gets to them. Cancelling the wait loses nothing.
    pub async fn next_trigger(&self) -> StatusTrigger {
        loop {
            if let Some(trigger) = self.with(|s| s.pending.pop()) {
                return trigger;
            }
            self.wake.wait().await;
        }
    }

    /// Snapshot for publishing
    pub fn status_record(&self, repub_count: u32) -> StatusRecord {
        let (stats, address) = self.with(|s| (s.stats, s.address));
        StatusRecord {
            repub_count,
            ip_address: address.to_string(),
            mqtt_connection_count: stats.broker_connections,
            wifi_connection_count: stats.link_ups,
            msg_cb_count: stats.messages,
            uptime_minutes: stats.uptime_minutes,
        }
    }
}

impl<M: RawMutex> Default for ConnectionContext<M> {
    fn default() -> Self {
        Self::new()
    }
}
