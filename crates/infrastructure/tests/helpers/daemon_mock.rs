#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

#[derive(Clone, Debug)]
pub enum DaemonBehavior {
    /// Reads the request line and answers with `body` plus `\n`.
    Respond(String),
    /// Reads the request line and writes `body` with no terminator, then closes.
    RespondUnterminated(String),
    /// Reads the request line and closes without writing.
    CloseWithoutResponse,
    /// Reads the request line and keeps the connection open without answering.
    Silent,
}

pub struct MockDaemon {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDaemon {
    pub async fn start(behavior: DaemonBehavior) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let requests = Arc::new(Mutex::new(Vec::new()));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        let seen = Arc::clone(&requests);
        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => break,
                    accepted = listener.accept() => {
                        let Ok((stream, _)) = accepted else { continue };
                        let behavior = behavior.clone();
                        let seen = Arc::clone(&seen);
                        tokio::spawn(async move {
                            let (read_half, mut write_half) = stream.into_split();
                            let mut reader = BufReader::new(read_half);
                            let mut line = String::new();
                            if reader.read_line(&mut line).await.is_err() {
                                return;
                            }
                            seen.lock().unwrap().push(line);

                            match behavior {
                                DaemonBehavior::Respond(body) => {
                                    let _ = write_half.write_all(body.as_bytes()).await;
                                    let _ = write_half.write_all(b"\n").await;
                                }
                                DaemonBehavior::RespondUnterminated(body) => {
                                    let _ = write_half.write_all(body.as_bytes()).await;
                                }
                                DaemonBehavior::CloseWithoutResponse => {}
                                DaemonBehavior::Silent => {
                                    tokio::time::sleep(std::time::Duration::from_secs(30)).await;
                                }
                            }
                            let _ = write_half.shutdown().await;
                        });
                    }
                }
            }
        });

        Ok(Self {
            addr,
            requests,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockDaemon {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
