use serde::Deserialize;

use super::visibility::{ActiveSet, VisibilityDelta};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Dark while any region is in the band.
    pub fn for_active_count(active: usize) -> Self {
        if active == 0 {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThemeState {
    Stable(Theme),
    Pending {
        stable: Theme,
        candidate: Theme,
        deadline: f64,
        generation: u64,
    },
}

impl ThemeState {
    /// The publicly observable theme: always the last committed value.
    pub fn stable(&self) -> Theme {
        match *self {
            Self::Stable(theme) => theme,
            Self::Pending { stable, .. } => stable,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimerCommand {
    /// Start the debounce timer, replacing any running one.
    Arm { delay_ms: f64, generation: u64 },
    Cancel,
}

/// Turns the visibility delta stream into a debounced light/dark value.
#[derive(Debug)]
pub struct ThemeResolver {
    debounce_ms: f64,
    active: ActiveSet,
    state: ThemeState,
    generation: u64,
}

impl ThemeResolver {
    pub fn new(debounce_ms: f64, initial: Theme) -> Self {
        Self {
            debounce_ms,
            active: ActiveSet::default(),
            state: ThemeState::Stable(initial),
            generation: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.state.stable()
    }

    #[cfg(test)]
    pub fn state(&self) -> ThemeState {
        self.state
    }

    #[cfg(test)]
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    pub fn apply(&mut self, delta: &VisibilityDelta, now: f64) -> Option<TimerCommand> {
        self.active.apply(delta);
        self.propose(Theme::for_active_count(self.active.len()), now)
    }

    fn propose(&mut self, candidate: Theme, now: f64) -> Option<TimerCommand> {
        match self.state {
            ThemeState::Stable(stable) if stable == candidate => None,
            ThemeState::Pending { candidate: pending, .. } if pending == candidate => None,
            ThemeState::Pending { stable, .. } if stable == candidate => {
                self.state = ThemeState::Stable(stable);
                Some(TimerCommand::Cancel)
            }
            state => {
                self.generation += 1;
                self.state = ThemeState::Pending {
                    stable: state.stable(),
                    candidate,
                    deadline: now + self.debounce_ms,
                    generation: self.generation,
                };
                Some(TimerCommand::Arm {
                    delay_ms: self.debounce_ms,
                    generation: self.generation,
                })
            }
        }
    }

    /// Timer fired. Commits only if `generation` is still the pending one.
    pub fn expire(&mut self, generation: u64) -> Option<Theme> {
        match self.state {
            ThemeState::Pending {
                candidate,
                generation: pending,
                ..
            } if pending == generation => {
                self.state = ThemeState::Stable(candidate);
                Some(candidate)
            }
            _ => None,
        }
    }

    /// Commits the pending candidate once its deadline has passed.
    #[cfg(test)]
    pub fn advance(&mut self, now: f64) -> Option<Theme> {
        match self.state {
            ThemeState::Pending {
                deadline,
                generation,
                ..
            } if now >= deadline => self.expire(generation),
            _ => None,
        }
    }

    /// Drops any pending change. Returns true if a timer was running.
    pub fn cancel(&mut self) -> bool {
        match self.state {
            ThemeState::Pending { stable, .. } => {
                self.state = ThemeState::Stable(stable);
                true
            }
            ThemeState::Stable(_) => false,
        }
    }
}
