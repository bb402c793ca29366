//! Board-agnostic core logic for the Marquee message board
//!
//! This crate contains all application logic that does not depend on
//! specific hardware or network stacks:
//!
//! - Collaborator traits (transport, synth, buttons, status LEDs, clock)
//! - Colour resolution from names, phrases and numeric triples
//! - Payload decoding into display directives
//! - Render engine (scroll state machine, progress bar layout)
//! - Display task supervision (one render session at a time)
//! - Message intake, connectivity loop, heartbeat and uptime tasks
//! - Button intents and the notification chirp
//! - Configuration type definitions
//!
//! Long-running tasks are plain `async fn`s generic over their
//! collaborators, so a board crate spawns them on its executor and host
//! tests drive them with `embassy_futures::block_on`.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

pub mod chirp;
pub mod colour;
pub mod config;
pub mod connectivity;
pub mod directive;
pub mod input;
pub mod intake;
pub mod render;
pub mod supervisor;
pub mod traits;

#[cfg(test)]
pub(crate) mod sim;
