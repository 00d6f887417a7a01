use std::io::{self, stdout, Write};
use std::time::Instant;

use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand};
use log::debug;
use phongtracer::RenderObserver;

/// Single line progress bar redrawn in place.
pub struct TerminalProgress {
    start_time: Instant,
}

impl TerminalProgress {
    pub fn start() -> Self {
        if let Err(err) = stdout().execute(cursor::Hide) {
            debug!("couldn't hide cursor: {err}");
        }
        Self {
            start_time: Instant::now(),
        }
    }

    pub fn finish(&self) {
        let mut stdout = stdout();
        let result = stdout
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))
            .and_then(|out| out.execute(cursor::Show))
            .map(|_| ());
        if let Err(err) = result {
            debug!("couldn't restore terminal: {err}");
        }
    }

    fn draw(&self, percent: usize) -> io::Result<()> {
        let elapsed = self.start_time.elapsed().as_secs_f32();
        let total = if percent > 0 {
            elapsed * 100.0 / percent as f32
        } else {
            0.0
        };

        let term_width = terminal::size().map(|(w, _)| w).unwrap_or(32) as usize;
        let msg_time = format!("{percent:>3}% rows in {elapsed:0.2}s / {total:0.2}s");
        let progress_width = term_width.saturating_sub(msg_time.len() + 3).max(8);
        let render_progress = progress_width * percent / 100;

        let msg_progress = (0..progress_width)
            .map(|i| if i < render_progress { '#' } else { ' ' })
            .collect::<String>();

        let mut stdout = stdout().lock();
        stdout.queue(cursor::SavePosition)?;
        write!(stdout, "{msg_time} [{msg_progress}]")?;
        stdout.queue(cursor::RestorePosition)?;
        stdout.flush()
    }
}

impl RenderObserver for TerminalProgress {
    fn progress(&self, percent: usize) {
        if let Err(err) = self.draw(percent) {
            debug!("progress bar: {err}");
        }
    }
}
