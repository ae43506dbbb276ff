#![allow(dead_code)]

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use youpi2_app::{
    Application, Arm, Context, DeviceProvider, ExitStatus, Flow, NoArgs, Panel, PhaseError,
    TermSignal,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    PanelOpened(PathBuf),
    ArmConnected(String),
    Clear,
    Text(String, usize),
    PanelError(String),
    HiZ,
    Setup,
    Loop(u32),
    Teardown(i32),
    RunError(String),
    UnexpectedError(String),
    Terminate(TermSignal),
}

#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<Event>>>);

impl Journal {
    pub fn push(&self, event: Event) {
        self.0.lock().unwrap().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Event) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|e| pred(e)).count()
    }

    pub fn loops(&self) -> usize {
        self.count(|e| matches!(e, Event::Loop(_)))
    }

    pub fn hi_z(&self) -> usize {
        self.count(|e| *e == Event::HiZ)
    }

    pub fn teardowns(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Teardown(code) => Some(code),
                _ => None,
            })
            .collect()
    }
}

pub struct RecordingPanel {
    journal: Journal,
    error_display_fails: bool,
}

impl Panel for RecordingPanel {
    fn clear(&mut self) -> Result<()> {
        self.journal.push(Event::Clear);
        Ok(())
    }

    fn center_text_at(&mut self, text: &str, line: usize) -> Result<()> {
        self.journal.push(Event::Text(text.to_string(), line));
        Ok(())
    }

    fn display_error(&mut self, message: &str) -> Result<()> {
        if self.error_display_fails {
            bail!("panel write failed");
        }
        self.journal.push(Event::PanelError(message.to_string()));
        Ok(())
    }
}

pub struct RecordingArm(Journal);

impl Arm for RecordingArm {
    fn soft_hi_z(&mut self) -> Result<()> {
        self.0.push(Event::HiZ);
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingDevices {
    pub journal: Journal,
    pub panel_missing: bool,
    pub arm_missing: bool,
    pub error_display_fails: bool,
}

impl RecordingDevices {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            ..Default::default()
        }
    }
}

impl DeviceProvider for RecordingDevices {
    fn open_panel(&self, path: &Path) -> Result<Box<dyn Panel>> {
        if self.panel_missing {
            bail!("{} is not mounted", path.display());
        }
        self.journal.push(Event::PanelOpened(path.to_path_buf()));
        Ok(Box::new(RecordingPanel {
            journal: self.journal.clone(),
            error_display_fails: self.error_display_fails,
        }))
    }

    fn connect_arm(&self, node_name: &str) -> Result<Box<dyn Arm>> {
        if self.arm_missing {
            bail!("no such node: {node_name}");
        }
        self.journal.push(Event::ArmConnected(node_name.to_string()));
        Ok(Box::new(RecordingArm(self.journal.clone())))
    }
}

/// Application whose behaviour is chosen per test.
#[derive(Debug, Default)]
pub struct Scripted {
    pub journal: Journal,
    pub setup_fails: bool,
    pub setup_requests_termination: bool,
    pub stop_at: Option<u32>,
    pub fail_at: Option<u32>,
    pub signal_at: Option<u32>,
    pub teardown_fails: bool,
    pub teardown_requests_termination: bool,
    /// Safety net for tests expecting the loop to end by other means.
    pub max_loops: u32,
    pub calls: u32,
}

impl Scripted {
    pub fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            max_loops: 1000,
            ..Default::default()
        }
    }
}

#[async_trait]
impl Application for Scripted {
    type Args = NoArgs;
    const NAME: &'static str = "scripted";
    const TITLE: &'static str = "Scripted";

    async fn setup(&mut self, ctx: &mut Context<'_>, _args: &NoArgs) -> Result<()> {
        self.journal.push(Event::Setup);
        if self.setup_requests_termination {
            ctx.termination().request(TermSignal::Interrupt);
        }
        if self.setup_fails {
            bail!("calibration file missing");
        }
        Ok(())
    }

    async fn loop_once(&mut self, ctx: &mut Context<'_>) -> Result<Flow> {
        self.calls += 1;
        self.journal.push(Event::Loop(self.calls));
        if self.fail_at == Some(self.calls) {
            return Err(anyhow!("joint 2 stalled"));
        }
        if self.signal_at == Some(self.calls) {
            ctx.termination().request(TermSignal::Terminate);
        }
        if self.calls >= self.max_loops {
            bail!("loop ran {} times without stopping", self.calls);
        }
        Ok(Flow::from(self.stop_at == Some(self.calls)))
    }

    async fn teardown(&mut self, ctx: &mut Context<'_>, exit: ExitStatus) -> Result<()> {
        self.journal.push(Event::Teardown(exit.code()));
        if self.teardown_requests_termination {
            ctx.termination().request(TermSignal::Terminate);
        }
        if self.teardown_fails {
            bail!("could not park the arm");
        }
        Ok(())
    }

    fn on_run_error(&mut self, error: &PhaseError) {
        self.journal.push(Event::RunError(error.panel_message()));
    }

    fn on_unexpected_error(&mut self, error: &PhaseError) {
        self.journal.push(Event::UnexpectedError(error.panel_message()));
    }

    fn on_terminate(&mut self, signal: TermSignal) {
        self.journal.push(Event::Terminate(signal));
    }
}
