//! Interactive session: reads prompt commands, sends projection requests and
//! applies their responses as they arrive.
//!
//! Requests run as spawned tasks and report back over a channel, so input
//! keeps flowing while a request is outstanding. The fetcher decides which
//! responses are still current; stale ones are dropped on arrival.

use std::io::{self, Write};
use std::sync::Arc;

use medcalc_core::{
    FetchTicket, PricingService, RawYearRow, RequestToken, Resolution, ServiceError,
    service::ServiceConfig,
};
use medcalc_http::HttpPricingService;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::commands::{Command, help_text, parse_line};
use crate::i18n::Translator;
use crate::logging;
use crate::preferences::PreferenceStore;
use crate::state::AppState;
use crate::views::render_screen;

/// Where `back` sends the user.
pub const DEFAULT_PORTAL_URL: &str = "https://portal.aimarketings.io/tool-list/";

type Outcome = (RequestToken, Result<Vec<RawYearRow>, ServiceError>);

/// Pricing service client for `config`, shared by every request task.
pub fn connect(config: &ServiceConfig) -> Result<Arc<dyn PricingService>, ServiceError> {
    Ok(Arc::new(HttpPricingService::new(config)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Session {
    state: AppState,
    service: Arc<dyn PricingService>,
    prefs: PreferenceStore,
    translator: Translator,
    portal_url: String,
    ansi: bool,
    tx: mpsc::UnboundedSender<Outcome>,
    rx: mpsc::UnboundedReceiver<Outcome>,
}

impl Session {
    pub fn new(
        state: AppState,
        service: Arc<dyn PricingService>,
        prefs: PreferenceStore,
        translator: Translator,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state,
            service,
            prefs,
            translator,
            portal_url: DEFAULT_PORTAL_URL.to_string(),
            ansi: false,
            tx,
            rx,
        }
    }

    pub fn with_portal_url(
        mut self,
        url: impl Into<String>,
    ) -> Self {
        self.portal_url = url.into();
        self
    }

    /// Color the title bar with ANSI escapes.
    pub fn with_ansi(
        mut self,
        ansi: bool,
    ) -> Self {
        self.ansi = ansi;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Send the request for the starting inputs.
    pub fn mount(&mut self) {
        if let Some(ticket) = self.state.mount() {
            self.dispatch(ticket);
        }
    }

    fn dispatch(
        &self,
        ticket: FetchTicket,
    ) {
        debug!(token = %ticket.token, "sending projection request");
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = service.get_data(&ticket.request).await;
            // The session owns the receiver; a closed channel means it is gone.
            let _ = tx.send((ticket.token, result));
        });
    }

    /// Apply one parsed command, writing any output to `out`.
    pub fn handle_command<W: Write>(
        &mut self,
        command: Command,
        out: &mut W,
    ) -> io::Result<Flow> {
        match command {
            Command::Edit(edit) => {
                if let Some(ticket) = self.state.edit(edit) {
                    self.dispatch(ticket);
                }
                self.print_screen(out)?;
            }
            Command::Retry => {
                let ticket = self.state.retry();
                self.dispatch(ticket);
                self.print_screen(out)?;
            }
            Command::Color(color) => {
                self.prefs.set_app_bar_color(color);
                self.print_screen(out)?;
            }
            Command::Show => self.print_screen(out)?,
            Command::LogLevel(filter) => match logging::set_log_level(&filter) {
                Ok(()) => info!(%filter, "log level changed"),
                Err(e) => writeln!(out, "{}: {e}", self.translator.t("Error"))?,
            },
            Command::Help => writeln!(out, "{}", help_text())?,
            Command::Back => {
                writeln!(out, "{} {}", self.translator.t("Back to"), self.portal_url)?;
                return Ok(Flow::Exit);
            }
            Command::Quit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Parse and apply one input line. Parse errors are reported, not fatal.
    pub fn handle_line<W: Write>(
        &mut self,
        line: &str,
        out: &mut W,
    ) -> io::Result<Flow> {
        match parse_line(line) {
            Ok(Some(command)) => self.handle_command(command, out),
            Ok(None) => Ok(Flow::Continue),
            Err(e) if e.is_usage() => {
                writeln!(out, "{}", help_text())?;
                Ok(Flow::Continue)
            }
            Err(e) => {
                warn!(line, "rejected command");
                writeln!(out, "{}: {}", self.translator.t("Unknown command"), e.to_string().trim())?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Wait for the next response and hand it to the fetcher.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        let (token, result) = self.rx.recv().await?;
        Some(self.state.resolve(token, result))
    }

    pub fn render(&self) -> String {
        render_screen(
            &self.state,
            &self.prefs.preferences().app_bar_color,
            &self.translator,
            self.ansi,
        )
    }

    fn print_screen<W: Write>(
        &self,
        out: &mut W,
    ) -> io::Result<()> {
        writeln!(out, "{}", self.render())?;
        out.flush()
    }

    /// Run until `quit`, `back` or end of input.
    pub async fn run<R, W>(
        mut self,
        input: R,
        out: &mut W,
    ) -> io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let mut lines = input.lines();
        self.mount();
        self.print_screen(out)?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("input closed");
                        break;
                    };
                    if self.handle_line(&line, out)? == Flow::Exit {
                        break;
                    }
                }
                Some((token, result)) = self.rx.recv() => {
                    if self.state.resolve(token, result) == Resolution::Applied {
                        self.print_screen(out)?;
                    }
                }
            }
        }
        Ok(())
    }
}
