//! Progress reporting capability.
//!
//! The synthesizer narrates its phases and the solved costs through a
//! one-method sink so that presentation stays decoupled: interactive use
//! prints to the console, embedded use forwards to an external listener.

use std::sync::mpsc::Sender;

/// A sink accepting human-readable progress messages.
pub trait ProgressSink {
    /// Emit one progress message.
    fn emit(&self, text: &str);
}

/// Prints progress messages to stdout.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl ProgressSink for ConsoleSink {
    fn emit(&self, text: &str) {
        println!("{}", text);
    }
}

/// Forwards progress messages to an external listener over a channel.
///
/// Messages are dropped silently once the listener has gone away.
#[derive(Debug)]
pub struct ChannelSink {
    tx: Sender<String>,
}

impl ChannelSink {
    /// Create a sink forwarding to the given channel.
    pub fn new(tx: Sender<String>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelSink {
    fn emit(&self, text: &str) {
        let _ = self.tx.send(text.to_string());
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_channel_sink_forwards() {
        let (tx, rx) = channel();
        let sink = ChannelSink::new(tx);
        sink.emit("phase one");
        sink.emit("phase two");
        assert_eq!(rx.recv().unwrap(), "phase one");
        assert_eq!(rx.recv().unwrap(), "phase two");
    }

    #[test]
    fn test_channel_sink_listener_gone() {
        let (tx, rx) = channel();
        drop(rx);
        let sink = ChannelSink::new(tx);
        // must not panic
        sink.emit("nobody is listening");
    }
}
