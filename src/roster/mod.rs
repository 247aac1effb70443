pub mod names;
pub mod regions;
pub mod rows;
pub mod types;

pub use names::{select_previous, GovernorName};
pub use regions::{normalize_region, Region, REGIONS};
pub use rows::{RegionRoster, RosterRow, RosterSection, RowKind};
pub use types::{
    format_bill_date, AssemblyMember, Bill, Governor, MemberDetail, Pledge, PledgeResponse,
    PreviousGovernor,
};
