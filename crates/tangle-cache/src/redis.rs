//! Reference backend: a RESP2 client over one blocking TCP connection.
//!
//! The connection is created once at init and shared by every request
//! handler; a mutex serializes command/reply exchanges so interleaved calls
//! from concurrent tasks stay well-formed. Calls block on network I/O with no
//! internal timeout; deadlines belong to the caller.

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpStream;

use parking_lot::Mutex;

use tangle_types::{Error, Result};

use crate::backend::CacheBackend;

/// One RESP2 reply, restricted to the shapes GET/SETNX/DEL can produce.
#[derive(Debug)]
enum Reply {
    Simple(String),
    Integer(i64),
    Bulk(String),
    Null,
}

struct Connection {
    reader: BufReader<TcpStream>,
}

fn backend_err(e: impl std::fmt::Display) -> Error {
    Error::BackendError(e.to_string())
}

impl Connection {
    /// Send one command as a RESP array and read its reply.
    fn command(&mut self, args: &[&str]) -> Result<Reply> {
        let mut buf = format!("*{}\r\n", args.len());
        for arg in args {
            buf.push('$');
            buf.push_str(&arg.len().to_string());
            buf.push_str("\r\n");
            buf.push_str(arg);
            buf.push_str("\r\n");
        }
        self.reader
            .get_mut()
            .write_all(buf.as_bytes())
            .map_err(backend_err)?;
        self.read_reply()
    }

    /// Read one line, stripping the CRLF terminator.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let n = self.reader.read_line(&mut line).map_err(backend_err)?;
        if n == 0 {
            return Err(Error::BackendError("connection closed".to_string()));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn read_reply(&mut self) -> Result<Reply> {
        let line = self.read_line()?;
        let Some(rest) = line.get(1..) else {
            return Err(Error::BackendError("empty reply".to_string()));
        };
        match line.as_bytes()[0] {
            b'+' => Ok(Reply::Simple(rest.to_string())),
            b'-' => Err(Error::BackendError(rest.to_string())),
            b':' => rest
                .parse::<i64>()
                .map(Reply::Integer)
                .map_err(|_| Error::BackendError(format!("invalid integer reply: {rest}"))),
            b'$' => {
                let len: i64 = rest
                    .parse()
                    .map_err(|_| Error::BackendError(format!("invalid bulk length: {rest}")))?;
                if len < 0 {
                    return Ok(Reply::Null);
                }
                // payload plus trailing CRLF
                let mut payload = vec![0u8; len as usize + 2];
                self.reader.read_exact(&mut payload).map_err(backend_err)?;
                payload.truncate(len as usize);
                String::from_utf8(payload)
                    .map(Reply::Bulk)
                    .map_err(|_| Error::BackendError("bulk reply is not utf-8".to_string()))
            }
            other => Err(Error::BackendError(format!(
                "unexpected reply type '{}'",
                other as char
            ))),
        }
    }
}

/// Cache backend speaking RESP2 to a remote key-value server.
pub struct RedisBackend {
    conn: Mutex<Connection>,
}

impl RedisBackend {
    /// Open the single shared connection.
    pub fn connect(host: &str, port: u16) -> Result<Self> {
        let stream = TcpStream::connect((host, port))
            .map_err(|e| Error::BackendError(format!("connect {host}:{port}: {e}")))?;
        Ok(Self {
            conn: Mutex::new(Connection {
                reader: BufReader::new(stream),
            }),
        })
    }
}

impl CacheBackend for RedisBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self.conn.lock().command(&["GET", key])? {
            Reply::Bulk(value) => Ok(Some(value)),
            Reply::Null => Ok(None),
            other => Err(Error::BackendError(format!(
                "unexpected GET reply: {other:?}"
            ))),
        }
    }

    fn set_nx(&self, key: &str, value: &str) -> Result<bool> {
        match self.conn.lock().command(&["SETNX", key, value])? {
            Reply::Integer(n) => Ok(n != 0),
            other => Err(Error::BackendError(format!(
                "unexpected SETNX reply: {other:?}"
            ))),
        }
    }

    fn del(&self, key: &str) -> Result<bool> {
        match self.conn.lock().command(&["DEL", key])? {
            Reply::Integer(n) => Ok(n > 0),
            other => Err(Error::BackendError(format!(
                "unexpected DEL reply: {other:?}"
            ))),
        }
    }
}
