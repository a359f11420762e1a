use std::io::Read;
use std::net::{TcpStream, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

use ssh2::Session;

use crate::domain::ports::RemoteHost;
use crate::utils::error::{OpsError, Result};

/// Password-authenticated SSH session with an SFTP sub-channel for reading
/// remote files. All blocking operations are bounded by `timeout`; the
/// session disconnects when the value is dropped.
pub struct Ssh2Host {
    session: Session,
}

impl Ssh2Host {
    pub fn connect(
        host: &str,
        port: u16,
        username: &str,
        password: &str,
        timeout: Duration,
    ) -> Result<Self> {
        let addr = (host, port)
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| OpsError::ConfigError {
                message: format!("could not resolve host {}:{}", host, port),
            })?;

        let tcp = TcpStream::connect_timeout(&addr, timeout)?;
        let mut session = Session::new()?;
        session.set_tcp_stream(tcp);
        session.handshake()?;
        session.userauth_password(username, password)?;
        session.set_timeout(timeout.as_millis() as u32);

        tracing::info!("Connected to {}@{}:{}", username, host, port);
        Ok(Self { session })
    }
}

impl RemoteHost for Ssh2Host {
    fn exec(&mut self, command: &str) -> Result<String> {
        let mut channel = self.session.channel_session()?;
        channel.exec(command)?;

        let mut output = String::new();
        channel.read_to_string(&mut output)?;
        channel.wait_close()?;

        let status = channel.exit_status()?;
        if status != 0 {
            return Err(OpsError::RemoteError {
                message: format!("remote command exited with status {}", status),
            });
        }

        Ok(output)
    }

    fn read_file(&mut self, path: &str) -> Result<Vec<u8>> {
        let sftp = self.session.sftp()?;
        let mut remote_file = sftp.open(Path::new(path))?;

        let mut content = Vec::new();
        remote_file.read_to_end(&mut content)?;
        Ok(content)
    }
}
