//! Streaming `npm` invocations in a generated project

use super::check::npm_binary;
use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for `npm install`
pub const INSTALL_TIMEOUT: Duration = Duration::from_secs(600);

/// Which child stream a line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stream {
    Stdout,
    Stderr,
}

/// Hand every line of both streams to `on_line` until both are closed
pub async fn forward_output<O, E>(stdout: O, stderr: E, mut on_line: impl FnMut(Stream, String))
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let mut stdout_reader = BufReader::new(stdout).lines();
    let mut stderr_reader = BufReader::new(stderr).lines();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_reader.next_line(), if stdout_open => {
                match line {
                    Ok(Some(line)) => on_line(Stream::Stdout, line),
                    Ok(None) => stdout_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stdout:".red(), e);
                        stdout_open = false;
                    }
                }
            }
            line = stderr_reader.next_line(), if stderr_open => {
                match line {
                    Ok(Some(line)) => on_line(Stream::Stderr, line),
                    Ok(None) => stderr_open = false,
                    Err(e) => {
                        eprintln!("{} {}", "Error reading stderr:".red(), e);
                        stderr_open = false;
                    }
                }
            }
        }
    }
}

/// Run `npm <args>` in `dir`, echoing its output line by line.
///
/// With `limit`, the child is killed once the limit elapses and an error is
/// returned. Without it (dev servers) the call returns when npm exits.
pub async fn run_npm(dir: &Path, args: &[&str], limit: Option<Duration>) -> Result<ExitStatus> {
    let cmd = format!("npm {}", args.join(" "));
    println!();
    println!("{} {}", "Running:".dimmed(), cmd.yellow());
    println!();

    let mut child = TokioCommand::new(npm_binary())
        .args(args)
        .current_dir(dir)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to start `{}` in {}", cmd, dir.display()))?;

    let stdout = child.stdout.take().context("Failed to capture stdout")?;
    let stderr = child.stderr.take().context("Failed to capture stderr")?;

    let output_task = forward_output(stdout, stderr, |stream, line| match stream {
        Stream::Stdout => println!("  {}", line),
        Stream::Stderr => eprintln!("  {}", line.yellow()),
    });

    match limit {
        Some(limit) => {
            if timeout(limit, output_task).await.is_err() {
                let _ = child.kill().await;
                anyhow::bail!(
                    "`{}` timed out after {} seconds. Run it manually in {}",
                    cmd,
                    limit.as_secs(),
                    dir.display()
                );
            }
        }
        None => output_task.await,
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("Failed to wait for `{}`", cmd))?;
    println!();
    Ok(status)
}

/// `npm install` at the project root (installs every workspace)
pub async fn install(root: &Path) -> Result<()> {
    let status = run_npm(root, &["install"], Some(INSTALL_TIMEOUT)).await?;
    if !status.success() {
        anyhow::bail!(
            "npm install failed with exit code: {}\nRun it manually in {}",
            status.code().unwrap_or(-1),
            root.display()
        );
    }
    Ok(())
}

/// `npm run dev` in `dir`; returns npm's exit code
pub async fn run_dev(dir: &Path) -> Result<i32> {
    let status = run_npm(dir, &["run", "dev"], None).await?;
    Ok(status.code().unwrap_or(1))
}
