//! Lines of game text produced by each action, tagged with a tone the
//! front end maps to a color.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    /// Hits, healing, level-ups.
    Good,
    /// Damage taken, failed actions.
    Bad,
    /// Gold and items.
    Loot,
    /// Death.
    Danger,
    /// "Not very effective", prompts, warnings.
    Notice,
    /// "Very effective".
    Effective,
    /// Misses.
    Muted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NarrativeLine {
    pub tone: Tone,
    pub text: String,
}

/// Output buffer for one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Narrative {
    lines: Vec<NarrativeLine>,
}

impl Narrative {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tone: Tone, text: impl Into<String>) {
        self.lines.push(NarrativeLine {
            tone,
            text: text.into(),
        });
    }

    pub fn plain(&mut self, text: impl Into<String>) {
        self.push(Tone::Plain, text);
    }

    pub fn lines(&self) -> &[NarrativeLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Hands the buffered lines to the caller, leaving the buffer empty.
    pub fn take(&mut self) -> Vec<NarrativeLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.text.contains(needle))
    }
}
