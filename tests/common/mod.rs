//! A `CommandRunner` that stands in for the java histogram tools.
//!
//! Logs are plain text: the usual 5-line header followed by `Tag=<t>,...`
//! rows. Trim copies, merge concatenates data rows, summarize reports the row
//! count per tag, split keeps the rows of one tag.

#![allow(dead_code)]

use hdr_summarizer::{CommandOutput, CommandRunner, Invocation, Result};
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub const HEADER: &str = "#[Logged with cassandra-stress]\n\
    #[Histogram log format version 1.3]\n\
    #[StartTime: 1700000000.000 (seconds since epoch), Tue Nov 14 22:13:20 UTC 2023]\n\
    #[BaseTime: 0.000 (seconds since epoch)]\n\
    \"StartTimestamp\",\"Interval_Length\",\"Interval_Max\",\"Interval_Compressed_Histogram\"\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub tool: &'static str,
    pub phase: Phase,
    pub invocation: Invocation,
}

#[derive(Default)]
pub struct FakeTools {
    events: Mutex<Vec<Event>>,
    running: AtomicUsize,
    peak: AtomicUsize,
    /// Fail (exit 1) any invocation of this tool whose command line contains
    /// the given text.
    pub fail: Option<(&'static str, String)>,
    pub delay: Duration,
}

impl FakeTools {
    pub fn new() -> Self {
        Self {
            delay: Duration::from_millis(5),
            ..Default::default()
        }
    }

    pub fn failing(tool: &'static str, needle: &str) -> Self {
        Self {
            fail: Some((tool, needle.to_string())),
            ..Self::new()
        }
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn running(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    /// Invocations of `tool` in start order.
    pub fn started(&self, tool: &str) -> Vec<Invocation> {
        self.events()
            .into_iter()
            .filter(|e| e.tool == tool && e.phase == Phase::Start)
            .map(|e| e.invocation)
            .collect()
    }

    fn record(&self, invocation: &Invocation, phase: Phase) {
        self.events.lock().unwrap().push(Event {
            tool: invocation.tool,
            phase,
            invocation: invocation.clone(),
        });
    }

    fn simulate(&self, invocation: &Invocation) -> std::io::Result<Vec<u8>> {
        match invocation.tool {
            "trim" => {
                let input = path(invocation.flag_value("-ifp"));
                let output = path(invocation.flag_value("-of"));
                fs::copy(input, output)?;
                Ok(Vec::new())
            }
            "merge" => {
                let mut text = HEADER.to_string();
                for input in invocation.flag_values("-ifp") {
                    for row in data_rows(&fs::read_to_string(input)?) {
                        text.push_str(&row);
                        text.push('\n');
                    }
                }
                fs::write(path(invocation.flag_value("-of")), text)?;
                Ok(Vec::new())
            }
            "summarize" => {
                let input = path(invocation.flag_value("-ifp"));
                let mut counts: BTreeMap<String, u64> = BTreeMap::new();
                for row in data_rows(&fs::read_to_string(input)?) {
                    *counts.entry(tag_of(&row).to_string()).or_default() += 1;
                }
                let mut report = String::new();
                for (tag, count) in counts {
                    report.push_str(&summary_block(&tag, count));
                }
                Ok(report.into_bytes())
            }
            "split" => {
                let input = path(invocation.flag_value("-i"));
                let output = path(invocation.flag_value("-o"));
                let tag = invocation.flag_value("-tag").unwrap().to_string_lossy();
                let rows: Vec<String> = data_rows(&fs::read_to_string(input)?)
                    .into_iter()
                    .filter(|r| tag_of(r) == tag)
                    .collect();
                fs::write(output, rows.join("\n"))?;
                Ok(Vec::new())
            }
            other => panic!("unexpected tool {}", other),
        }
    }
}

impl CommandRunner for FakeTools {
    async fn run(&self, invocation: &Invocation) -> Result<CommandOutput> {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        self.record(invocation, Phase::Start);

        tokio::time::sleep(self.delay).await;

        let fails = match &self.fail {
            Some((tool, needle)) => {
                *tool == invocation.tool && invocation.to_string().contains(needle.as_str())
            }
            None => false,
        };
        let out = if fails {
            CommandOutput {
                stdout: Vec::new(),
                stderr: b"simulated failure".to_vec(),
                status: Some(1),
            }
        } else {
            match self.simulate(invocation) {
                Ok(stdout) => CommandOutput {
                    stdout,
                    stderr: Vec::new(),
                    status: Some(0),
                },
                Err(e) => CommandOutput {
                    stdout: Vec::new(),
                    stderr: e.to_string().into_bytes(),
                    status: Some(2),
                },
            }
        };

        self.record(invocation, Phase::End);
        self.running.fetch_sub(1, Ordering::SeqCst);
        Ok(out)
    }
}

fn path(value: Option<&OsStr>) -> PathBuf {
    PathBuf::from(value.expect("flag present"))
}

fn data_rows(text: &str) -> Vec<String> {
    text.lines()
        .skip(5)
        .filter(|l| !l.trim().is_empty())
        .map(str::to_string)
        .collect()
}

fn tag_of(row: &str) -> &str {
    row.split(',').next().unwrap_or("").get(4..).unwrap_or("")
}

/// Summary lines for `count` operations over a 60 s window.
pub fn summary_block(tag: &str, count: u64) -> String {
    format!(
        "{tag}.TotalCount={count}\n\
         {tag}.Period(ms)=60000\n\
         {tag}.Throughput(ops/sec)={tput}\n\
         {tag}.Mean=500000\n\
         {tag}.50.000ptile=480000\n\
         {tag}.90.000ptile=900000\n\
         {tag}.99.000ptile=1500000\n\
         {tag}.99.900ptile=2000000\n\
         {tag}.99.990ptile=2500000\n\
         {tag}.99.999ptile=3000000\n",
        tag = tag,
        count = count,
        tput = count as f64 / 60.0,
    )
}

/// Write `{dir}/{client}/{name}.hdr` with `rows` as `(tag, n)` row counts.
pub fn write_client_log(dir: &Path, client: &str, name: &str, rows: &[(&str, usize)]) -> PathBuf {
    let client_dir = dir.join(client);
    fs::create_dir_all(&client_dir).unwrap();
    let mut text = HEADER.to_string();
    let mut t = 0.0f64;
    for (tag, n) in rows {
        for _ in 0..*n {
            text.push_str(&format!("Tag={},{:.3},1.000,8.880,HISTFAAAAB\n", tag, t));
            t += 1.0;
        }
    }
    let path = client_dir.join(format!("{}.hdr", name));
    fs::write(&path, text).unwrap();
    path
}
