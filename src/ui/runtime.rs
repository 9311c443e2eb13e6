use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use ratatui::crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind,
};
use ratatui::crossterm::execute;
use tracing::debug;

use super::App;
use super::outcome::SearchOutcome;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const INPUT_POLL: Duration = Duration::from_millis(50);

/// Terminal events read on a helper thread so the frame loop never blocks.
struct InputThread {
    running: Arc<AtomicBool>,
    events: Receiver<Event>,
    handle: JoinHandle<Result<()>>,
}

impl InputThread {
    fn spawn() -> Self {
        let (tx, events) = mpsc::channel();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || read_events(&flag, &tx));
        Self {
            running,
            events,
            handle,
        }
    }

    fn stop(self) -> Result<()> {
        self.running.store(false, Ordering::Relaxed);
        match self.handle.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

fn read_events(running: &AtomicBool, tx: &Sender<Event>) -> Result<()> {
    while running.load(Ordering::Relaxed) {
        if event::poll(INPUT_POLL)? && tx.send(event::read()?).is_err() {
            break;
        }
    }
    Ok(())
}

impl<'a> App<'a> {
    /// Pump the terminal event loop until the user exits with a result.
    pub fn run(&mut self) -> Result<SearchOutcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        execute!(std::io::stdout(), EnableBracketedPaste)?;

        let input = InputThread::spawn();
        let result = self.event_loop(&mut terminal, &input.events);

        if let Err(error) = execute!(std::io::stdout(), DisableBracketedPaste) {
            debug!(%error, "failed to disable bracketed paste");
        }
        ratatui::restore();
        input.stop()?;
        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut ratatui::DefaultTerminal,
        events: &Receiver<Event>,
    ) -> Result<SearchOutcome> {
        loop {
            let now = Instant::now();
            self.pump_results(now);
            self.tick(now);
            self.throbber_state.calc_next();

            loop {
                let event = match events.try_recv() {
                    Ok(event) => event,
                    Err(TryRecvError::Empty) => break,
                    Err(TryRecvError::Disconnected) => {
                        return Err(anyhow!("input event channel disconnected"));
                    }
                };
                match event {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if let Some(outcome) = self.handle_key(key, now) {
                            return Ok(outcome);
                        }
                    }
                    Event::Paste(text) => self.handle_paste(&text, now),
                    _ => {}
                }
            }

            terminal.draw(|frame| self.draw(frame))?;
            if self.report_viewport() {
                debug!("requested the next transcript page");
            }

            thread::sleep(FRAME_INTERVAL);
        }
    }
}
