use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{self, Event as CrosstermEvent},
    execute, queue,
    style::{Attribute, Print, SetAttribute},
    terminal::{self, ClearType},
};

use crate::layout::Frame;

/// Raw-mode terminal on the alternate screen with mouse capture.
///
/// Restores the terminal when dropped.
pub struct Terminal {
    stdout: io::Stdout,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        Ok(Self { stdout })
    }

    pub fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    pub fn poll(&self, timeout: Option<Duration>) -> io::Result<Vec<CrosstermEvent>> {
        let mut events = Vec::new();

        let has_event = match timeout {
            Some(dur) => event::poll(dur)?,
            None => {
                // Block until event
                events.push(event::read()?);
                return Ok(events);
            }
        };

        if has_event {
            events.push(event::read()?);
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.push(event::read()?);
            }
        }

        Ok(events)
    }

    /// Clear the screen and draw every run of `frame`.
    pub fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;
        for run in &frame.runs {
            queue!(self.stdout, cursor::MoveTo(run.x, run.y))?;
            if run.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if run.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            if run.style.reverse {
                queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
            }
            queue!(
                self.stdout,
                Print(&run.text),
                SetAttribute(Attribute::Reset)
            )?;
        }
        self.stdout.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
