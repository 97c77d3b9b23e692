pub const DIMENSION_COUNT: usize = 6;

/// Radar axes, in the order they are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Influence,
    Contribution,
    Maintainership,
    Engagement,
    Diversity,
    CodeCapability,
}

impl Dimension {
    pub const ALL: [Dimension; DIMENSION_COUNT] = [
        Dimension::Influence,
        Dimension::Contribution,
        Dimension::Maintainership,
        Dimension::Engagement,
        Dimension::Diversity,
        Dimension::CodeCapability,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Also the suffix of the per-user metric file (`<user>_<name>.json`).
    pub fn name(self) -> &'static str {
        match self {
            Dimension::Influence => "influence",
            Dimension::Contribution => "contribution",
            Dimension::Maintainership => "maintainership",
            Dimension::Engagement => "engagement",
            Dimension::Diversity => "diversity",
            Dimension::CodeCapability => "code_capability",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
