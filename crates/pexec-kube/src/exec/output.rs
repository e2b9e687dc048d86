use std::{
    future::Future,
    io::{self, Write},
};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

#[derive(Debug, Clone, Copy)]
pub(super) enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    /// Write one full line while holding the stream lock, so lines from
    /// different pods never interleave mid-line.
    ///
    /// The write runs on the blocking pool; a slow reader of our stdout
    /// must not stall runtime workers.
    async fn write_line(self, line: String) -> io::Result<()> {
        tokio::task::spawn_blocking(move || match self {
            Stream::Stdout => writeln!(io::stdout().lock(), "{line}"),
            Stream::Stderr => writeln!(io::stderr().lock(), "{line}"),
        })
        .await
        .map_err(io::Error::other)?
    }
}

/// Forward `reader` line by line to `stream`.
pub(super) async fn pump_lines<R>(reader: R, prefix: Option<&str>, stream: Stream) -> io::Result<()>
where
    R: AsyncRead + Unpin,
{
    pump_with(reader, prefix, |line| stream.write_line(line)).await
}

async fn pump_with<R, F, Fut>(reader: R, prefix: Option<&str>, mut emit: F) -> io::Result<()>
where
    R: AsyncRead + Unpin,
    F: FnMut(String) -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            return Ok(());
        }
        let raw = String::from_utf8_lossy(&buf);
        let line = raw.trim_end_matches(['\n', '\r']);
        emit(format_line(prefix, line)).await?;
    }
}

fn format_line(prefix: Option<&str>, line: &str) -> String {
    match prefix {
        Some(name) => format!("[{name}] {line}"),
        None => line.to_string(),
    }
}
