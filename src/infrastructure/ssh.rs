//! Remote executor over ssh/scp
//!
//! Every operation is one `ssh <destination> <command>` invocation. Paths
//! are single-quoted; privileged commands run through `sudo -n`, so the
//! remote account needs passwordless sudo for the deployment commands.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use tracing::debug;

use crate::domain::entities::LinuxTargetConfig;
use crate::domain::ports::{
    RemoteConnector, RemoteError, RemoteExecutor, RemoteResult, ServiceAction,
};

pub struct SshRemote {
    /// SSH destination (user@host or host)
    destination: String,
    /// Identity file passed with `-i`
    identity: Option<PathBuf>,
}

impl SshRemote {
    pub fn new(destination: impl Into<String>, identity: Option<PathBuf>) -> Self {
        Self {
            destination: destination.into(),
            identity,
        }
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    fn base_command(&self, program: &str) -> Command {
        let mut cmd = Command::new(program);
        cmd.arg("-o").arg("BatchMode=yes");
        if let Some(identity) = &self.identity {
            cmd.arg("-i").arg(identity);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    /// Run a remote command, returning exit status and combined output.
    fn run_command(&self, command: &str) -> RemoteResult<(i32, String)> {
        debug!(host = %self.destination, command, "ssh");
        let output = self
            .base_command("ssh")
            .arg(&self.destination)
            .arg(command)
            .output()
            .map_err(|source| RemoteError::Spawn {
                program: "ssh".to_string(),
                source,
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        let combined = format!("{}{}", stdout, stderr).trim().to_string();
        Ok((output.status.code().unwrap_or(-1), combined))
    }

    fn exec(&self, command: &str) -> RemoteResult<String> {
        let (status, output) = self.run_command(command)?;
        if status != 0 {
            return Err(RemoteError::CommandFailed {
                command: command.to_string(),
                status,
                output,
            });
        }
        Ok(output)
    }

    /// Exit 0 is true, exit 1 is false, anything else (ssh uses 255) is an error.
    fn holds(&self, command: &str) -> RemoteResult<bool> {
        match self.run_command(command)? {
            (0, _) => Ok(true),
            (1, _) => Ok(false),
            (status, output) => Err(RemoteError::CommandFailed {
                command: command.to_string(),
                status,
                output,
            }),
        }
    }

    fn scp(&self, from: &str, to: &str) -> RemoteResult<()> {
        debug!(from, to, "scp");
        let output = self
            .base_command("scp")
            .arg("-q")
            .arg(from)
            .arg(to)
            .output()
            .map_err(|source| RemoteError::Spawn {
                program: "scp".to_string(),
                source,
            })?;
        if !output.status.success() {
            return Err(RemoteError::CommandFailed {
                command: format!("scp {} {}", from, to),
                status: output.status.code().unwrap_or(-1),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}

/// Connects to `Linux.Host` with `Linux.RemoteAccessToken` as the identity file.
#[derive(Debug, Clone, Copy, Default)]
pub struct SshConnector;

impl RemoteConnector for SshConnector {
    type Remote = SshRemote;

    fn connect(&self, target: &LinuxTargetConfig) -> SshRemote {
        SshRemote::new(target.host.clone(), target.remote_access_token.clone())
    }
}

/// Quote a path for safe use in shell commands
fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "'\\''"))
}

fn sudo(command: &str) -> String {
    format!("sudo -n {}", command)
}

fn maybe_sudo(command: String, privileged: bool) -> String {
    if privileged {
        sudo(&command)
    } else {
        command
    }
}

fn parent_of(path: &str) -> &str {
    match path.rfind('/') {
        Some(0) => "/",
        Some(i) => &path[..i],
        None => ".",
    }
}

/// Self-signed certificate, only when none exists at `certificate_path`.
fn certificate_script(host_names: &[String], certificate_path: &str, key_path: &str) -> String {
    let common_name = host_names.first().map(String::as_str).unwrap_or("localhost");
    let alt_names = host_names
        .iter()
        .map(|h| format!("DNS:{}", h))
        .collect::<Vec<_>>()
        .join(",");
    format!(
        "test -f {cert} || {{ {mkdir} && {openssl}; }}",
        cert = quote(certificate_path),
        mkdir = sudo(&format!(
            "mkdir -p {} {}",
            quote(parent_of(certificate_path)),
            quote(parent_of(key_path))
        )),
        openssl = sudo(&format!(
            "openssl req -x509 -nodes -days 365 -newkey rsa:2048 -keyout {} -out {} -subj {} -addext {}",
            quote(key_path),
            quote(certificate_path),
            quote(&format!("/CN={}", common_name)),
            quote(&format!("subjectAltName={}", alt_names)),
        )),
    )
}

impl RemoteExecutor for SshRemote {
    fn file_exists(&self, path: &str) -> RemoteResult<bool> {
        let p = quote(path);
        self.holds(&format!("test -e {} || test -L {}", p, p))
    }

    fn dir_exists(&self, path: &str) -> RemoteResult<bool> {
        self.holds(&format!("test -d {}", quote(path)))
    }

    fn create_dir(&self, path: &str, privileged: bool) -> RemoteResult<()> {
        self.exec(&maybe_sudo(format!("mkdir -p {}", quote(path)), privileged))
            .map(drop)
    }

    fn remove_dir(&self, path: &str, privileged: bool) -> RemoteResult<()> {
        self.exec(&maybe_sudo(format!("rm -rf {}", quote(path)), privileged))
            .map(drop)
    }

    fn clear_dir(&self, path: &str) -> RemoteResult<()> {
        self.exec(&sudo(&format!("find {} -mindepth 1 -delete", quote(path))))
            .map(drop)
    }

    fn upload(&self, local: &Path, remote_dir: &str) -> RemoteResult<()> {
        let target = format!("{}:{}/", self.destination, remote_dir.trim_end_matches('/'));
        self.scp(&local.to_string_lossy(), &target)
    }

    fn download(&self, remote: &str, local: &Path) -> RemoteResult<()> {
        let source = format!("{}:{}", self.destination, remote);
        self.scp(&source, &local.to_string_lossy())
    }

    fn move_path(&self, from: &str, to: &str, overwrite: bool) -> RemoteResult<()> {
        let flag = if overwrite { "-f" } else { "-n" };
        self.exec(&sudo(&format!("mv {} {} {}", flag, quote(from), quote(to))))
            .map(drop)
    }

    fn move_contents(&self, from_dir: &str, to_dir: &str) -> RemoteResult<()> {
        self.exec(&sudo(&format!(
            "find {} -mindepth 1 -maxdepth 1 -exec mv -f -t {} {{}} +",
            quote(from_dir),
            quote(to_dir)
        )))
        .map(drop)
    }

    fn copy(&self, from: &str, to: &str, overwrite: bool) -> RemoteResult<()> {
        let flag = if overwrite { "-f" } else { "-n" };
        self.exec(&sudo(&format!("cp {} {} {}", flag, quote(from), quote(to))))
            .map(drop)
    }

    fn unpack(&self, archive: &str, dest_dir: &str) -> RemoteResult<()> {
        self.exec(&format!("tar -xzf {} -C {}", quote(archive), quote(dest_dir)))
            .map(drop)
    }

    fn archive_dir(&self, source_dir: &str, archive: &str) -> RemoteResult<()> {
        self.exec(&sudo(&format!(
            "tar -czf {} -C {} .",
            quote(archive),
            quote(source_dir)
        )))
        .map(drop)
    }

    fn chown(&self, owner: &str, path: &str, recursive: bool) -> RemoteResult<()> {
        let flag = if recursive { " -R" } else { "" };
        self.exec(&sudo(&format!(
            "chown{} {} {}",
            flag,
            quote(&format!("{}:{}", owner, owner)),
            quote(path)
        )))
        .map(drop)
    }

    fn symlink(&self, target: &str, link: &str, overwrite: bool) -> RemoteResult<()> {
        let flag = if overwrite { "-sf" } else { "-s" };
        self.exec(&sudo(&format!("ln {} {} {}", flag, quote(target), quote(link))))
            .map(drop)
    }

    fn service(&self, action: ServiceAction, unit: &str) -> RemoteResult<()> {
        let command = match action {
            ServiceAction::DaemonReload => sudo("systemctl daemon-reload"),
            _ => sudo(&format!("systemctl {} {}", action, quote(unit))),
        };
        self.exec(&command).map(drop)
    }

    fn install_package(&self, package: &str) -> RemoteResult<()> {
        self.exec(&format!(
            "{} && {}",
            sudo("apt-get update"),
            sudo(&format!(
                "env DEBIAN_FRONTEND=noninteractive apt-get install -y {}",
                quote(package)
            ))
        ))
        .map(drop)
    }

    fn run_privileged(&self, working_dir: &str, command: &str) -> RemoteResult<String> {
        self.exec(&format!(
            "cd {} && {}",
            quote(working_dir),
            sudo(&format!("sh -c {}", quote(command)))
        ))
    }

    fn nginx_test(&self) -> RemoteResult<()> {
        self.exec(&sudo("nginx -t")).map(drop)
    }

    fn nginx_reload(&self) -> RemoteResult<()> {
        self.exec(&sudo("systemctl reload nginx")).map(drop)
    }

    fn request_certificate(
        &self,
        host_names: &[String],
        certificate_path: &str,
        key_path: &str,
    ) -> RemoteResult<()> {
        self.exec(&certificate_script(host_names, certificate_path, key_path))
            .map(drop)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_escapes_single_quotes() {
        assert_eq!(quote("/var/www/shop"), "'/var/www/shop'");
        assert_eq!(quote("it's"), "'it'\\''s'");
    }

    #[test]
    fn parent_of_handles_root_and_relative() {
        assert_eq!(parent_of("/etc/ssl/certs/a.crt"), "/etc/ssl/certs");
        assert_eq!(parent_of("/a"), "/");
        assert_eq!(parent_of("a.crt"), ".");
    }

    #[test]
    fn certificate_script_is_guarded_by_existing_certificate() {
        let script = certificate_script(
            &["shop.example.com".into(), "www.shop.example.com".into()],
            "/etc/ssl/certs/Shop.crt",
            "/etc/ssl/private/Shop.key",
        );
        assert!(script.starts_with("test -f '/etc/ssl/certs/Shop.crt' || {"));
        assert!(script.contains("'/CN=shop.example.com'"));
        assert!(script.contains("'subjectAltName=DNS:shop.example.com,DNS:www.shop.example.com'"));
        assert!(script.contains("sudo -n mkdir -p '/etc/ssl/certs' '/etc/ssl/private'"));
    }

    #[test]
    fn maybe_sudo_only_when_privileged() {
        assert_eq!(maybe_sudo("mkdir -p '/tmp/x'".into(), false), "mkdir -p '/tmp/x'");
        assert_eq!(
            maybe_sudo("mkdir -p '/var/www/x'".into(), true),
            "sudo -n mkdir -p '/var/www/x'"
        );
    }
}
