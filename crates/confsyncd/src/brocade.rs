//! Brocade device-config parsing.
//!
//! A config dump is an unordered bag of per-interface directives bounded by
//! `interface` markers. The parser runs single-pass over the lines:
//! directives mutate the current accumulator, boundary directives flush it.
//! `router-id` is a second, implicit boundary — it denotes a
//! pseudo-interface that no ordinary marker delimits, so discovering one
//! finalizes whatever was accumulating before it.

use topo_log::{debug, Logger};

use crate::types::InterfaceRecord;

/// Vendor tag recorded on endpoints created from these dumps.
pub const VENDOR: &str = "brocade";

/// One recognized configuration directive.
///
/// Device exports carry plenty of directives irrelevant to topology;
/// anything not expressible here is ignored rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// `interface ...` — flush boundary.
    Interface,
    /// `port-name <text...>` — description for the current record.
    PortName(String),
    /// `ip router-id <addr>` or `ipv6 router-id <addr>` — implicit flush
    /// boundary opening a router-id pseudo-interface.
    RouterId(String),
    /// `ip address <addr>`.
    Ipv4Address(String),
    /// `ipv6 address <addr>`, unless the line marks it link-local.
    Ipv6Address(String),
}

impl Directive {
    /// Classifies one raw line.
    ///
    /// Returns `None` for everything the parser ignores: lines with fewer
    /// than two tokens, unknown keywords, `ip`/`ipv6` directives with the
    /// wrong token count, and link-local IPv6 addresses.
    pub fn classify(line: &str) -> Option<Directive> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 2 {
            return None;
        }

        match fields[0] {
            "interface" => Some(Directive::Interface),
            "port-name" => Some(Directive::PortName(fields[1..].join(" "))),
            "ip" | "ipv6" => {
                if fields.len() != 3 {
                    return None;
                }
                match fields[1] {
                    // Both address families declare the router-id; it is
                    // registered as an IPv4 host route either way.
                    "router-id" => Some(Directive::RouterId(fields[2].to_string())),
                    "address" if fields[0] == "ip" => {
                        Some(Directive::Ipv4Address(fields[2].to_string()))
                    }
                    // The link-local exclusion keys off the raw line, not
                    // the address token: exports tag such addresses with a
                    // link-local marker.
                    "address" if !line.contains("link-local") => {
                        Some(Directive::Ipv6Address(fields[2].to_string()))
                    }
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// Single-pass state machine turning dump lines into interface records.
///
/// [`feed`](Self::feed) returns a record whenever a boundary directive
/// finalizes the current accumulator; [`finish`](Self::finish) flushes the
/// remainder at end-of-input. Every boundary produces exactly one record,
/// including an all-empty one: downstream flush cardinality is part of the
/// contract.
#[derive(Debug)]
pub struct ConfigParser {
    current: InterfaceRecord,
    logger: Logger,
}

impl ConfigParser {
    pub fn new(logger: Logger) -> Self {
        Self {
            current: InterfaceRecord::default(),
            logger,
        }
    }

    /// Processes one line, returning the record it flushed, if any.
    pub fn feed(&mut self, line: &str) -> Option<InterfaceRecord> {
        let directive = Directive::classify(line)?;
        debug!(self.logger, "processing line: {}", line);

        match directive {
            Directive::Interface => Some(self.flush()),
            Directive::PortName(text) => {
                self.current.description = text;
                None
            }
            Directive::RouterId(addr) => {
                let flushed = self.flush();
                self.current.description = "router-id".to_string();
                self.current.ipv4 = format!("{addr}/32");
                debug!(self.logger, "got router-id: {}", self.current.ipv4);
                Some(flushed)
            }
            Directive::Ipv4Address(addr) => {
                debug!(self.logger, "got ip address: {}", addr);
                self.current.ipv4 = addr;
                None
            }
            Directive::Ipv6Address(addr) => {
                debug!(self.logger, "got ipv6 address: {}", addr);
                self.current.ipv6 = addr;
                None
            }
        }
    }

    /// Flushes the trailing accumulator at end-of-input.
    pub fn finish(self) -> InterfaceRecord {
        self.current
    }

    fn flush(&mut self) -> InterfaceRecord {
        std::mem::take(&mut self.current)
    }
}
