//! # Process Capture Module / 进程输出捕获模块
//!
//! Runs external tools (such as a partition extractor) and captures their
//! standard output and standard error separately.
//!
//! 运行外部工具（例如分区提取工具）并分别捕获其标准输出和标准错误。

use std::process::{ExitStatus, Stdio};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

/// The captured result of a finished process.
/// 已结束进程的捕获结果。
#[derive(Debug)]
pub struct CapturedOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Spawns a command and captures its stdout and stderr.
/// Both streams are read concurrently line by line so that a chatty stderr
/// cannot block the child on a full pipe.
///
/// # Arguments
/// * `cmd` - The `tokio::process::Command` to execute.
///
/// # Returns
/// The exit status together with the collected output, or the I/O error that
/// prevented the process from running.
///
/// 派生一个命令，捕获其 stdout 和 stderr。
/// 两个输出流被并发逐行读取，避免 stderr 写满管道导致子进程阻塞。
pub async fn spawn_and_capture(
    mut cmd: tokio::process::Command,
) -> std::io::Result<CapturedOutput> {
    let mut child = cmd
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stdout"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| std::io::Error::other("failed to capture stderr"))?;

    // 派生任务逐行读取 stdout 和 stderr。
    let stdout_handle = tokio::spawn(read_lines(stdout));
    let stderr_handle = tokio::spawn(read_lines(stderr));

    // 等待进程退出。
    let status = child.wait().await?;

    // Wait for the readers so that all output is captured.
    // 等待读取任务完成，以确保所有输出都被捕获。
    let stdout = stdout_handle.await.map_err(std::io::Error::other)?;
    let stderr = stderr_handle.await.map_err(std::io::Error::other)?;

    Ok(CapturedOutput {
        status,
        stdout,
        stderr,
    })
}

async fn read_lines<R>(stream: R) -> String
where
    R: AsyncRead + Unpin,
{
    let mut output = String::new();
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        output.push_str(&line);
        output.push('\n');
    }
    output
}
