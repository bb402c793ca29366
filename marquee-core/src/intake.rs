//! Message intake
//!
//! The transport pushes every inbound publish into the [`Inbox`]. The
//! intake loop routes it by topic suffix: pings trigger a status publish,
//! banner and progress directives are decoded and handed to the display
//! supervisor, and our own echoed status records are ignored.

use alloc::vec::Vec;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Channel;
use log::{debug, info, trace};
use marquee_protocol::{TopicKind, TopicName};

use crate::connectivity::ConnectionContext;
use crate::directive::PayloadDecoder;
use crate::render::RenderMode;
use crate::supervisor::DisplaySupervisor;
use crate::traits::RandomSource;

/// Messages that may wait in the inbox; the transport blocks beyond this
pub const INBOX_DEPTH: usize = 1;

/// One inbound publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub topic: TopicName,
    pub payload: Vec<u8>,
}

/// Queue between the transport and the intake loop
pub type Inbox<M> = Channel<M, Inbound, INBOX_DEPTH>;

/// Routes inbound messages
pub struct MessageIntake<'a, M: RawMutex> {
    inbox: &'a Inbox<M>,
    ctx: &'a ConnectionContext<M>,
    supervisor: &'a DisplaySupervisor<'a, M>,
    decoder: PayloadDecoder,
}

impl<'a, M: RawMutex> MessageIntake<'a, M> {
    pub fn new(
        inbox: &'a Inbox<M>,
        ctx: &'a ConnectionContext<M>,
        supervisor: &'a DisplaySupervisor<'a, M>,
    ) -> Self {
        Self {
            inbox,
            ctx,
            supervisor,
            decoder: PayloadDecoder::default(),
        }
    }

    /// Handle one message
    pub async fn handle<R: RandomSource>(&self, msg: Inbound, rng: &mut R) {
        let kind = TopicKind::classify(&msg.topic);
        debug!("inbound {} ({} bytes)", msg.topic.as_str(), msg.payload.len());

        let mode = match kind {
            TopicKind::Status => {
                trace!("ignoring status echo");
                return;
            }
            TopicKind::Ping => {
                self.ctx.ping();
                return;
            }
            TopicKind::Banner => Some(RenderMode::Banner),
            TopicKind::Progress => Some(RenderMode::Progress),
            TopicKind::Other => None,
        };

        self.ctx.count_message();

        let Some(mode) = mode else {
            debug!("no handler for {}", msg.topic.as_str());
            return;
        };

        let directive = self.decoder.decode(&msg.payload, rng);
        info!("showing {:?}: {}", mode, directive.text.as_str());
        if let Some(outcome) = self.supervisor.on_directive(directive, mode).await {
            debug!("previous session ended: {:?}", outcome);
        }
    }

    /// Intake task
    pub async fn run<R: RandomSource>(&self, rng: &mut R) -> ! {
        loop {
            let msg = self.inbox.receive().await;
            self.handle(msg, rng).await;
        }
    }
}
