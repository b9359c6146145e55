// Draws view models. The terminal renderer prints the table as text and
// numbers every choice so it can be picked by typing its number.

use std::io::{self, Write};
use std::time::Duration;

use crate::actions::{choices, ChoiceSource};
use crate::types::{Card, PlayerIndex, SeatMap};
use crate::view::ViewModel;

// How long an animated card takes to appear.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(250);

pub fn animation_duration(animate: bool) -> Duration {
    if animate {
        ANIMATION_DURATION
    } else {
        Duration::ZERO
    }
}

pub trait Renderer {
    fn render(&mut self, view: &ViewModel) -> io::Result<()>;
}

pub struct TextRenderer<W: Write> {
    out: W,
}

impl TextRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        TextRenderer::new(io::stdout())
    }
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer { out }
    }

    fn write_seats(
        &mut self,
        title: &str,
        seats: &SeatMap<Card>,
        duration: impl Fn(PlayerIndex) -> Duration,
    ) -> io::Result<()> {
        write!(self.out, "{}:", title)?;
        for epi in PlayerIndex::values() {
            match seats.get(epi) {
                Some(card) => {
                    write!(self.out, " [{}] {}", epi, card)?;
                    let delay = duration(epi);
                    if !delay.is_zero() {
                        write!(self.out, " (+{}ms)", delay.as_millis())?;
                    }
                }
                None => write!(self.out, " [{}] --", epi)?,
            }
        }
        writeln!(self.out)
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &ViewModel) -> io::Result<()> {
        for (epi, player) in PlayerIndex::values().zip(&view.players) {
            let marker = if player.awaiting_input { "*" } else { " " };
            writeln!(self.out, "{}[{}] {}", marker, epi, player.caption)?;
        }

        if let Some(previous_trick) = &view.previous_trick {
            let entrance = animation_duration(previous_trick.animate_entrance);
            self.write_seats(
                &format!("last trick (won by {})", previous_trick.winner),
                &previous_trick.seats,
                |_| entrance,
            )?;
        }

        let trick = &view.trick;
        self.write_seats("trick", &trick.seats, |epi| {
            animation_duration(trick.animates(epi))
        })?;

        if let Some(info) = &view.info {
            writeln!(self.out, "{}", info)?;
        }
        if let Some(actions) = &view.actions {
            writeln!(self.out, "{}", actions.prompt)?;
        }

        let mut in_hand = false;
        for (number, choice) in choices(view).into_iter().enumerate() {
            if choice.source == ChoiceSource::Hand && !in_hand {
                writeln!(self.out, "hand:")?;
                in_hand = true;
            }
            writeln!(self.out, "  {}) {}", number + 1, choice.label)?;
        }

        self.out.flush()
    }
}
