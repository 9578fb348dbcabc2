//! `ImageBuilder` implementation shelling out to the docker CLI.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::adapters::image_builder::ImageBuilder;

pub struct DockerCli {
    program: String,
}

impl DockerCli {
    pub fn new() -> Self {
        Self {
            program: "docker".to_string(),
        }
    }

    /// Runs docker with inherited stdout/stderr so build and push
    /// progress streams straight to the terminal.
    fn run(&self, args: &[&str]) -> Result<(), String> {
        eprintln!("+ {} {}", self.program, args.join(" "));
        let status = Command::new(&self.program)
            .args(args)
            .status()
            .map_err(|error| format!("failed to execute {}: {error}", self.program))?;
        exit_ok(status, args)
    }
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBuilder for DockerCli {
    fn login(&self, registry_host: &str, username: &str, password: &str) -> Result<(), String> {
        // The credential goes over stdin; it must never appear in the
        // echoed command line.
        let args = [
            "login",
            "--username",
            username,
            "--password-stdin",
            registry_host,
        ];
        eprintln!("+ {} {}", self.program, args.join(" "));

        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|error| format!("failed to execute {}: {error}", self.program))?;

        child
            .stdin
            .take()
            .ok_or_else(|| "docker login stdin unavailable".to_string())?
            .write_all(password.as_bytes())
            .map_err(|error| format!("failed to write registry credential: {error}"))?;

        let status = child
            .wait()
            .map_err(|error| format!("failed to wait for docker login: {error}"))?;
        exit_ok(status, &args)
    }

    fn build(&self, context_dir: &Path, tag: &str) -> Result<(), String> {
        let context = context_dir.to_string_lossy();
        self.run(&["build", "-t", tag, &context])
    }

    fn tag(&self, source: &str, dest: &str) -> Result<(), String> {
        self.run(&["tag", source, dest])
    }

    fn push(&self, tag: &str) -> Result<(), String> {
        self.run(&["push", tag])
    }
}

fn exit_ok(status: std::process::ExitStatus, args: &[&str]) -> Result<(), String> {
    if status.success() {
        Ok(())
    } else {
        Err(format!(
            "docker {} exited with status {}",
            args.first().copied().unwrap_or("command"),
            status.code().unwrap_or(1)
        ))
    }
}
