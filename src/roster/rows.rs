use super::types::{AssemblyMember, Governor};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Legislator,
    MetropolitanGovernor,
    BasicGovernor,
}

impl RowKind {
    /// Korean section heading
    pub fn title(&self) -> &'static str {
        match self {
            RowKind::Legislator => "국회의원",
            RowKind::MetropolitanGovernor => "광역단체장",
            RowKind::BasicGovernor => "기초단체장",
        }
    }

    /// Column headings for this kind of row
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            RowKind::Legislator => &["이름", "정당", "지역구"],
            RowKind::MetropolitanGovernor => &["직책", "이름", "정당"],
            RowKind::BasicGovernor => &["직책", "이름", "정당", "지역"],
        }
    }
}

/// One line of a roster table, tagged by what it describes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterRow {
    Legislator(AssemblyMember),
    MetropolitanGovernor(Governor),
    BasicGovernor(Governor),
}

fn cell(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

impl RosterRow {
    pub fn kind(&self) -> RowKind {
        match self {
            RosterRow::Legislator(_) => RowKind::Legislator,
            RosterRow::MetropolitanGovernor(_) => RowKind::MetropolitanGovernor,
            RosterRow::BasicGovernor(_) => RowKind::BasicGovernor,
        }
    }

    /// Display cells in `kind().columns()` order; missing values show as "-"
    pub fn cells(&self) -> Vec<String> {
        match self {
            RosterRow::Legislator(m) => vec![cell(&m.name), cell(&m.party), cell(&m.district)],
            RosterRow::MetropolitanGovernor(g) => {
                vec![cell(&g.position), cell(&g.name), cell(&g.party)]
            }
            RosterRow::BasicGovernor(g) => vec![
                cell(&g.position),
                cell(&g.name),
                cell(&g.party),
                cell(g.metropolitan_region.as_deref().unwrap_or("")),
            ],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSection {
    pub kind: RowKind,
    pub rows: Vec<RosterRow>,
}

impl RosterSection {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Everyone holding office in a region (or nationwide when no region is set)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionRoster {
    /// Backend name of the region, None for the nationwide listing
    pub region: Option<String>,
    pub metropolitan: Vec<Governor>,
    pub legislators: Vec<AssemblyMember>,
    pub basic: Vec<Governor>,
}

impl RegionRoster {
    /// Heading for the listing
    pub fn title(&self) -> &str {
        self.region.as_deref().unwrap_or("전국")
    }

    /// Sections in display order: metropolitan, legislators, basic. Empty ones are kept.
    pub fn sections(&self) -> Vec<RosterSection> {
        vec![
            RosterSection {
                kind: RowKind::MetropolitanGovernor,
                rows: self
                    .metropolitan
                    .iter()
                    .cloned()
                    .map(RosterRow::MetropolitanGovernor)
                    .collect(),
            },
            RosterSection {
                kind: RowKind::Legislator,
                rows: self.legislators.iter().cloned().map(RosterRow::Legislator).collect(),
            },
            RosterSection {
                kind: RowKind::BasicGovernor,
                rows: self.basic.iter().cloned().map(RosterRow::BasicGovernor).collect(),
            },
        ]
    }
}
