// Copyright (C) 2023 Dheatly23
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Lesser General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Lesser General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

use std::fmt;
use std::str::FromStr;

use crate::error::ScrambleError;

/// Default number of tiles per axis.
pub const DEFAULT_GRID_SIZE: usize = 9;

/// Default brightness threshold, on the 0-255 scale.
pub const DEFAULT_THRESHOLD: f64 = 200.0;

/// Which tiles take part in the shuffle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SelectionPolicy {
    /// Every tile is retained.
    All,
    /// Only tiles whose darkest sample is below the threshold are retained.
    /// Lighter tiles are treated as background and left in place.
    #[default]
    NonZero,
}

impl FromStr for SelectionPolicy {
    type Err = ScrambleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "nonzero" => Ok(Self::NonZero),
            _ => Err(ScrambleError::UnknownPolicy(s.to_owned())),
        }
    }
}

impl fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::NonZero => "nonzero",
        })
    }
}

/// Scramble configuration.
///
/// Use [`ConfigBuilder`] to construct one.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) grid_size: usize,
    pub(crate) policy: SelectionPolicy,
    pub(crate) threshold: f64,
    pub(crate) rotate: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            policy: SelectionPolicy::default(),
            threshold: DEFAULT_THRESHOLD,
            rotate: true,
        }
    }
}

impl Config {
    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.policy
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn rotate(&self) -> bool {
        self.rotate
    }
}

/// Builder for [`Config`].
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tiles per axis. Grid is `grid_size * grid_size` cells.
    pub fn grid_size(mut self, grid_size: usize) -> Self {
        self.config.grid_size = grid_size;
        self
    }

    pub fn policy(mut self, policy: SelectionPolicy) -> Self {
        self.config.policy = policy;
        self
    }

    /// Brightness threshold for [`SelectionPolicy::NonZero`], on the 0-255 scale.
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = threshold;
        self
    }

    /// Rotate retained tiles by a random right angle.
    pub fn rotate(mut self, rotate: bool) -> Self {
        self.config.rotate = rotate;
        self
    }

    /// Finish building.
    ///
    /// Grid size is not checked here, since its validity depends on the image.
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parse() {
        assert_eq!("all".parse::<SelectionPolicy>(), Ok(SelectionPolicy::All));
        assert_eq!("NonZero".parse::<SelectionPolicy>(), Ok(SelectionPolicy::NonZero));
        assert_eq!(
            "bright".parse::<SelectionPolicy>(),
            Err(ScrambleError::UnknownPolicy("bright".into()))
        );
    }

    #[test]
    fn test_policy_display_roundtrip() {
        for p in [SelectionPolicy::All, SelectionPolicy::NonZero] {
            assert_eq!(p.to_string().parse::<SelectionPolicy>(), Ok(p));
        }
    }

    #[test]
    fn test_builder_defaults() {
        let c = ConfigBuilder::new().build();
        assert_eq!(c.grid_size(), 9);
        assert_eq!(c.policy(), SelectionPolicy::NonZero);
        assert_eq!(c.threshold(), 200.0);
        assert!(c.rotate());

        let c = ConfigBuilder::new()
            .grid_size(4)
            .policy(SelectionPolicy::All)
            .threshold(128.0)
            .rotate(false)
            .build();
        assert_eq!(c.grid_size(), 4);
        assert_eq!(c.policy(), SelectionPolicy::All);
        assert_eq!(c.threshold(), 128.0);
        assert!(!c.rotate());
    }
}
