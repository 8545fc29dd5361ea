//! Shared test helpers

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Read, Write};
use std::rc::Rc;

use jrpc::Config;

/// In-memory stream that plays back one scripted reply per read
/// and records everything written to it.
pub struct ScriptedStream {
    replies: VecDeque<Vec<u8>>,
    written: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedStream {
    pub fn new(replies: &[&[u8]]) -> (Self, Rc<RefCell<Vec<u8>>>) {
        let written = Rc::new(RefCell::new(Vec::new()));
        let stream = Self {
            replies: replies.iter().map(|r| r.to_vec()).collect(),
            written: Rc::clone(&written),
        };
        (stream, written)
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.replies.pop_front() {
            Some(reply) => {
                let n = reply.len().min(buf.len());
                buf[..n].copy_from_slice(&reply[..n]);
                Ok(n)
            }
            None => Ok(0),
        }
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stream whose every operation fails
pub struct BrokenStream;

impl Read for BrokenStream {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset by peer"))
    }
}

impl Write for BrokenStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Config with pacing disabled so tests don't sleep
pub fn test_config() -> Config {
    Config::builder().settle_delay_ms(0).build()
}

/// Everything written so far, as text
pub fn sent(written: &Rc<RefCell<Vec<u8>>>) -> String {
    String::from_utf8(written.borrow().clone()).unwrap()
}
