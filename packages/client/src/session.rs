//! Client session: one loop multiplexing keyboard lines and server chunks.

use std::{io::Write, net::SocketAddr};

use hiroba_shared::protocol::{LineBuffer, MAX_CHUNK_SIZE, frame_line};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc,
};

use crate::{
    error::ClientError,
    formatter::MessageFormatter,
    input::spawn_line_reader,
    ui::{clear_previous_line, terminal_width},
};

/// Connect to `addr` and chat on the terminal until the user quits.
///
/// With `name` set, the handshake is sent right away; otherwise the first
/// non-blank line typed becomes the display name.
pub async fn run_client(addr: SocketAddr, name: Option<String>) -> Result<(), ClientError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| ClientError::Connect { addr, source })?;
    tracing::info!("Connected to {}", addr);
    println!(
        "{}",
        MessageFormatter::format_connected(&addr.to_string(), name.as_deref())
    );

    let input = spawn_line_reader();
    let mut session = Session::new(name, std::io::stdout(), terminal_width()).interactive(true);
    session.run(stream, input).await
}

/// State of one chat session over an already connected stream.
pub struct Session<W> {
    name: Option<String>,
    out: W,
    width: usize,
    interactive: bool,
}

impl<W: Write> Session<W> {
    pub fn new(name: Option<String>, out: W, width: usize) -> Self {
        Self {
            name,
            out,
            width,
            interactive: false,
        }
    }

    /// Erase the echoed input line before rendering an own message.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.interactive = interactive;
        self
    }

    /// Run until the input closes (`Ok`) or the server goes away (`Err`).
    pub async fn run<S>(
        &mut self,
        stream: S,
        mut input: mpsc::UnboundedReceiver<String>,
    ) -> Result<(), ClientError>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        let (mut reader, mut writer) = tokio::io::split(stream);
        let mut named = false;

        if let Some(name) = self.name.clone() {
            writer.write_all(frame_line(name.trim()).as_bytes()).await?;
            named = true;
        }

        let mut buf = vec![0u8; MAX_CHUNK_SIZE];
        let mut lines = LineBuffer::new();

        loop {
            tokio::select! {
                read = reader.read(&mut buf) => {
                    let n = read?;
                    if n == 0 {
                        if let Some(rest) = lines.take_partial() {
                            writeln!(self.out, "{}", MessageFormatter::format_incoming(&rest))?;
                            self.out.flush()?;
                        }
                        tracing::info!("Server closed the connection");
                        return Err(ClientError::ServerClosed);
                    }
                    for line in lines.push(&buf[..n]) {
                        writeln!(self.out, "{}", MessageFormatter::format_incoming(&line))?;
                    }
                    self.out.flush()?;
                }
                line = input.recv() => {
                    let Some(line) = line else {
                        tracing::info!("Input closed, leaving the chat");
                        return Ok(());
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    writer.write_all(frame_line(&line).as_bytes()).await?;

                    if self.interactive {
                        clear_previous_line(&mut self.out);
                    }
                    if named {
                        writeln!(self.out, "{}", MessageFormatter::format_own(&line, self.width))?;
                    } else {
                        self.name = Some(line.trim().to_string());
                        named = true;
                    }
                    self.out.flush()?;
                }
            }
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
