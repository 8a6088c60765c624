//! How to roll a date that is not a workday.

/// Rule used by [`Calendar::adjust`](crate::calendar::Calendar::adjust) when
/// a date falls on a rest day or a statutory holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessDayConvention {
    /// Keep the date as is.
    Unadjusted,
    /// The first workday on or after the date.
    Following,
    /// `Following`, unless that leaves the month; then `Preceding`.
    ModifiedFollowing,
    /// The last workday on or before the date.
    Preceding,
    /// `Preceding`, unless that leaves the month; then `Following`.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{s}")
    }
}
