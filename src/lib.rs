//! Parley library exports for testing

use clap::ValueEnum;

pub mod api;
pub mod core;
pub mod platform;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Which sheet a long-press opens: the one for a message body or the one
/// for a conversation header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MenuTarget {
    #[default]
    Message,
    Header,
}
