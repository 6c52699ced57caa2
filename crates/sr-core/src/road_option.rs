//! Lane-level manoeuvre label attached to trajectory plan entries and used
//! to pick a branch at junctions.

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum RoadOption {
    /// No preference.
    #[default]
    Void,
    Left,
    Right,
    Straight,
    /// Keep following the current lane.
    LaneFollow,
    ChangeLaneLeft,
    ChangeLaneRight,
}

impl RoadOption {
    /// `true` for the options that select a branch inside a junction.
    #[inline]
    pub fn is_turn(self) -> bool {
        matches!(self, RoadOption::Left | RoadOption::Right)
    }

    /// Label used in CSV columns and logs.
    pub fn as_str(self) -> &'static str {
        match self {
            RoadOption::Void            => "void",
            RoadOption::Left            => "left",
            RoadOption::Right           => "right",
            RoadOption::Straight        => "straight",
            RoadOption::LaneFollow      => "lane_follow",
            RoadOption::ChangeLaneLeft  => "change_lane_left",
            RoadOption::ChangeLaneRight => "change_lane_right",
        }
    }
}

impl std::fmt::Display for RoadOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
