//! Topic layout
//!
//! Every topic is `<prefix>/<suffix>`. Inbound topics are classified by
//! suffix only, so a broker-side prefix rewrite does not break routing.

use heapless::String;

/// Maximum length of a full topic name
pub const MAX_TOPIC_LEN: usize = 64;

/// Longest suffix appended to the prefix, including the separator
const LONGEST_SUFFIX: usize = "/progress".len();

/// Owned topic name
pub type TopicName = String<MAX_TOPIC_LEN>;

/// MQTT delivery guarantee
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum QoS {
    AtMostOnce = 0,
    AtLeastOnce = 1,
}

/// Role of a topic under the device prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicKind {
    /// Scrolling banner directive
    Banner,
    /// Progress bar directive
    Progress,
    /// Status request
    Ping,
    /// Our own status record (echoed back by wildcard subscriptions)
    Status,
    /// Anything else
    Other,
}

/// Topics subscribed after every broker connection
pub const SUBSCRIPTIONS: [TopicKind; 3] = [TopicKind::Banner, TopicKind::Progress, TopicKind::Ping];

impl TopicKind {
    /// Suffix including the leading separator
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            TopicKind::Banner => Some("/msg"),
            TopicKind::Progress => Some("/progress"),
            TopicKind::Ping => Some("/ping"),
            TopicKind::Status => Some("/status"),
            TopicKind::Other => None,
        }
    }

    /// QoS used when subscribing to or publishing on this topic
    pub const fn qos(self) -> QoS {
        match self {
            TopicKind::Status | TopicKind::Other => QoS::AtMostOnce,
            _ => QoS::AtLeastOnce,
        }
    }

    /// Classify an inbound topic by its suffix (ASCII case-insensitive)
    pub fn classify(topic: &str) -> Self {
        const KINDS: [TopicKind; 4] = [
            TopicKind::Banner,
            TopicKind::Progress,
            TopicKind::Ping,
            TopicKind::Status,
        ];

        KINDS
            .into_iter()
            .find(|kind| kind.suffix().is_some_and(|suffix| ends_with_ignore_case(topic, suffix)))
            .unwrap_or(TopicKind::Other)
    }
}

fn ends_with_ignore_case(haystack: &str, suffix: &str) -> bool {
    let (haystack, suffix) = (haystack.as_bytes(), suffix.as_bytes());
    haystack.len() >= suffix.len()
        && haystack[haystack.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

/// Topic naming errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TopicError {
    /// Prefix is empty
    Empty,
    /// Prefix plus the longest suffix does not fit in a topic name
    TooLong,
    /// Prefix contains an MQTT wildcard (`+` or `#`)
    Wildcard,
}

/// Topic names for one device prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topics {
    prefix: String<{ MAX_TOPIC_LEN - LONGEST_SUFFIX }>,
}

impl Topics {
    /// Validate a device prefix such as `home/unicorn`
    pub fn new(prefix: &str) -> Result<Self, TopicError> {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            return Err(TopicError::Empty);
        }
        if prefix.contains(['+', '#']) {
            return Err(TopicError::Wildcard);
        }

        let mut owned = String::new();
        owned.push_str(prefix).map_err(|_| TopicError::TooLong)?;
        Ok(Self { prefix: owned })
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Full topic name for `kind`, or `None` for [`TopicKind::Other`]
    pub fn topic(&self, kind: TopicKind) -> Option<TopicName> {
        let suffix = kind.suffix()?;
        let mut name = TopicName::new();
        // Cannot overflow: the prefix capacity leaves room for the longest suffix
        name.push_str(&self.prefix).ok()?;
        name.push_str(suffix).ok()?;
        Some(name)
    }
}
