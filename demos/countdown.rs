//! Interactive countdown.
//!
//! `space` pauses and resumes, `r` restarts, `+`/`-` move the target by ten
//! seconds, `q` quits.

use bubbletea_countdown::prelude::*;
use bubbletea_rs::{quit, Cmd, KeyMsg, Model, Msg, Program};
use crossterm::event::KeyCode;

struct App {
    countdown: Countdown,
    status: String,
}

impl Model for App {
    fn init() -> (Self, Option<Cmd>) {
        let mut countdown = countdown_new(
            75.0,
            &[with_paused_text("Paused"), with_end_text("Time over")],
        );
        let cmd = countdown.init();
        (
            Self {
                countdown,
                status: "running".to_string(),
            },
            cmd,
        )
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return match key.key {
                KeyCode::Char('q') | KeyCode::Esc => Some(quit()),
                KeyCode::Char(' ') => self.countdown.toggle(),
                KeyCode::Char('r') => {
                    self.status = "running".to_string();
                    self.countdown.restart()
                }
                KeyCode::Char('+') => {
                    let target = self.countdown.target_seconds() + 10.0;
                    self.countdown.set_target_seconds(target)
                }
                KeyCode::Char('-') => {
                    let target = self.countdown.target_seconds() - 10.0;
                    self.countdown.set_target_seconds(target)
                }
                _ => None,
            };
        }

        if let Some(complete) = msg.downcast_ref::<CompleteMsg>() {
            if complete.id == self.countdown.id() {
                self.status = "finished".to_string();
            }
        }

        self.countdown.update(msg)
    }

    fn view(&self) -> String {
        let frame = self.countdown.frame();
        let width = 30;
        let filled = (frame.progress_fraction * width as f64).round() as usize;
        format!(
            "{}\n[{}{}] {:>3.0}%\ntarget {}s, {}\n\nspace pause  r restart  +/- 10s  q quit\n",
            self.countdown.view(),
            "█".repeat(filled),
            "░".repeat(width - filled),
            frame.progress_fraction * 100.0,
            self.countdown.target_seconds(),
            self.status,
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let program = Program::<App>::builder().build()?;
    program.run().await?;
    Ok(())
}
