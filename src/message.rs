use std::fmt;
use std::time::Duration;

use rosc::{OscMessage, OscPacket, OscType};

use crate::error::{Error, Result};

/// Host and port every message of a run is sent to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Destination {
    pub host: String,
    pub port: u16,
}

impl Destination {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Destination { host: host.into(), port }
    }
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Bracket bare IPv6 literals so the result parses as a socket address
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

/// A single OSC argument.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Double(f64),
    String(String),
    Blob(Vec<u8>),
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl From<Value> for OscType {
    fn from(value: Value) -> Self {
        match value {
            Value::Int(v) => OscType::Int(v),
            Value::Float(v) => OscType::Float(v),
            Value::Double(v) => OscType::Double(v),
            Value::String(v) => OscType::String(v),
            Value::Blob(v) => OscType::Blob(v),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub address: String,
    pub args: Vec<Value>,
}

impl Message {
    pub fn new(address: impl Into<String>, args: Vec<Value>) -> Self {
        Message { address: address.into(), args }
    }

    /// Shorthand for a message carrying exactly one argument.
    pub fn single(address: impl Into<String>, value: impl Into<Value>) -> Self {
        Message::new(address, vec![value.into()])
    }

    pub fn validate(&self) -> Result<()> {
        if self.address.is_empty() || !self.address.starts_with('/') {
            return Err(Error::InvalidAddress(self.address.clone()));
        }
        Ok(())
    }

    pub fn to_packet(&self) -> OscPacket {
        OscPacket::Message(OscMessage {
            addr: self.address.clone(),
            args: self.args.iter().cloned().map(OscType::from).collect(),
        })
    }

    /// Encode into the bytes of one OSC datagram. The address is not
    /// checked here; callers run `validate` first.
    pub fn encode(&self) -> Result<Vec<u8>> {
        rosc::encoder::encode(&self.to_packet()).map_err(|source| Error::Encode {
            address: self.address.clone(),
            source,
        })
    }
}

/// A message followed by a pause before the next step runs.
#[derive(Clone, Debug, PartialEq)]
pub struct ScheduledStep {
    pub message: Message,
    pub delay: Duration,
}

impl ScheduledStep {
    pub fn new(message: Message, delay: Duration) -> Self {
        ScheduledStep { message, delay }
    }
}

#[derive(Clone, Debug)]
pub struct Batch {
    pub name: &'static str,
    pub steps: Vec<ScheduledStep>,
    /// Report sent count and elapsed time once the batch finishes.
    pub timed: bool,
}

impl Batch {
    pub fn new(name: &'static str, steps: Vec<ScheduledStep>) -> Self {
        Batch { name, steps, timed: false }
    }

    pub fn timed(mut self) -> Self {
        self.timed = true;
        self
    }
}

/// Duration-bounded stream of random values sent to random addresses.
#[derive(Clone, Debug)]
pub struct Session {
    pub addresses: Vec<String>,
    pub interval: Duration,
    pub duration: Duration,
}

#[cfg(test)]
mod test {
    use super::*;
    use rosc::decoder;

    #[test]
    fn rejects_empty_and_relative_addresses() {
        assert!(matches!(
            Message::new("", vec![]).validate(),
            Err(Error::InvalidAddress(_))
        ));
        assert!(matches!(
            Message::single("synth/freq", 440.0f32).validate(),
            Err(Error::InvalidAddress(addr)) if addr == "synth/freq"
        ));
        assert!(Message::new("/transport/play", vec![]).validate().is_ok());
    }

    #[test]
    fn encodes_mixed_arguments() {
        let msg = Message::new(
            "/test/mixed",
            vec![440i32.into(), 0.5f32.into(), "note".into(), vec![1u8, 2, 3].into()],
        );
        let buf = msg.encode().unwrap();
        assert_eq!(buf.len() % 4, 0);

        let (_, packet) = decoder::decode_udp(&buf).unwrap();
        match packet {
            OscPacket::Message(decoded) => {
                assert_eq!(decoded.addr, "/test/mixed");
                assert_eq!(
                    decoded.args,
                    vec![
                        OscType::Int(440),
                        OscType::Float(0.5),
                        OscType::String("note".to_string()),
                        OscType::Blob(vec![1, 2, 3]),
                    ]
                );
            }
            other => panic!("expected a message, got {:?}", other),
        }
    }

    #[test]
    fn double_maps_to_64_bit_float() {
        assert_eq!(OscType::from(Value::Double(0.25)), OscType::Double(0.25));
    }

    #[test]
    fn destination_display() {
        assert_eq!(Destination::new("127.0.0.1", 8000).to_string(), "127.0.0.1:8000");
        assert_eq!(Destination::new("::1", 9000).to_string(), "[::1]:9000");
    }
}
