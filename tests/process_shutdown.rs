//! Process-level shutdown tests against the `shorturl` binary.
#![cfg(unix)]

use std::net::{SocketAddr, TcpListener as StdTcpListener};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use shorturl::shutdown::SHUTDOWN_GRACE_PERIOD;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

/// Kills the child on drop so a failing assertion never leaks a server.
struct ServerProcess {
    child: Child,
    addr: SocketAddr,
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

fn free_addr() -> SocketAddr {
    StdTcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
}

async fn spawn_server() -> ServerProcess {
    let addr = free_addr();
    let child = Command::new(env!("CARGO_BIN_EXE_shorturl"))
        .env("LISTEN", addr.to_string())
        .env("RUST_LOG", "warn")
        .env_remove("DATABASE_URL")
        .env_remove("DB_NAME")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();

    let server = ServerProcess { child, addr };
    wait_until_healthy(addr).await;
    // Signal handlers are installed right after the listener starts serving.
    tokio::time::sleep(Duration::from_millis(300)).await;
    server
}

async fn wait_until_healthy(addr: SocketAddr) {
    let deadline = Instant::now() + Duration::from_secs(10);
    while Instant::now() < deadline {
        if let Ok(mut stream) = TcpStream::connect(addr).await {
            stream
                .write_all(b"GET /healthcheck HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
                .await
                .unwrap();
            let mut response = String::new();
            if stream.read_to_string(&mut response).await.is_ok() && response.ends_with("OK") {
                return;
            }
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    panic!("server on {addr} did not become healthy");
}

fn send_sigterm(child: &Child) {
    let status = Command::new("kill")
        .args(["-TERM", &child.id().to_string()])
        .status()
        .unwrap();
    assert!(status.success());
}

async fn wait_for_exit(child: &mut Child, timeout: Duration) -> ExitStatus {
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().unwrap() {
            return status;
        }
        assert!(Instant::now() < deadline, "server did not exit in {timeout:?}");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
}

#[tokio::test]
async fn test_sigterm_on_idle_server_exits_cleanly() {
    let mut server = spawn_server().await;

    send_sigterm(&server.child);
    let status = wait_for_exit(&mut server.child, Duration::from_secs(5)).await;

    assert_eq!(status.code(), Some(0));
    assert!(TcpStream::connect(server.addr).await.is_err());
}

#[tokio::test]
async fn test_grace_period_overrun_exits_with_failure() {
    let mut server = spawn_server().await;

    // A request whose body never finishes keeps the connection in flight.
    let mut stalled = TcpStream::connect(server.addr).await.unwrap();
    stalled
        .write_all(
            b"POST /shorturl HTTP/1.1\r\nHost: localhost\r\n\
              Content-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"url\"",
        )
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let started = Instant::now();
    send_sigterm(&server.child);
    let status = wait_for_exit(&mut server.child, SHUTDOWN_GRACE_PERIOD * 3).await;

    assert_eq!(status.code(), Some(1));
    assert!(started.elapsed() >= SHUTDOWN_GRACE_PERIOD - Duration::from_millis(500));

    drop(stalled);
}
