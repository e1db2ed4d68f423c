//! Sound cues. A terminal has one instrument, the bell, so cues that matter
//! ring it and the rest stay silent.

use std::io::{self, Write};

/// Something worth a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Flap,
    Correct,
    Wrong,
    Crash,
    ChapterDone,
}

pub trait AudioSink {
    fn play(&mut self, cue: Cue) -> io::Result<()>;
}

/// Plays nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Muted;

impl AudioSink for Muted {
    fn play(&mut self, _cue: Cue) -> io::Result<()> {
        Ok(())
    }
}

/// Rings the terminal bell: once for a correct answer or a finished
/// chapter, twice for a crash. Flaps and wrong answers stay quiet; the
/// double ring belongs to crashes alone.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> AudioSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> io::Result<()> {
        let bells: &[u8] = match cue {
            Cue::Correct | Cue::ChapterDone => b"\x07",
            Cue::Crash => b"\x07\x07",
            Cue::Flap | Cue::Wrong => return Ok(()),
        };
        self.out.write_all(bells)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rung(cue: Cue) -> Vec<u8> {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(cue).unwrap();
        bell.out
    }

    #[test]
    fn test_flap_and_wrong_are_silent() {
        assert!(rung(Cue::Flap).is_empty());
        assert!(rung(Cue::Wrong).is_empty());
    }

    #[test]
    fn test_crash_sound_is_reserved_for_crashes() {
        let crash = rung(Cue::Crash);
        assert_eq!(crash, b"\x07\x07");
        assert_ne!(rung(Cue::Wrong), crash);
        assert_ne!(rung(Cue::Correct), crash);
        assert_ne!(rung(Cue::ChapterDone), crash);
    }

    #[test]
    fn test_correct_answer_rings() {
        assert_eq!(rung(Cue::Correct), b"\x07");
    }

    #[test]
    fn test_muted_is_silent() {
        assert!(Muted.play(Cue::ChapterDone).is_ok());
    }
}
