use super::types::PreviousGovernor;

const SUCCESSION_ARROW: &str = " → ";
const ACTING_MARKERS: [&str; 3] = ["(대행)", "(권한대행)", "(직무대행)"];

/// A governor name as the backend reports it.
///
/// Acting heads come as `"전임자 → 대행자(대행)"`, or as a bare `"대행자(대행)"`
/// when the predecessor is unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GovernorName {
    Elected(String),
    Acting {
        predecessor: Option<String>,
        acting: String,
    },
}

fn strip_acting_marker(name: &str) -> Option<&str> {
    ACTING_MARKERS
        .iter()
        .find_map(|marker| name.find(marker).map(|i| name[..i].trim()))
}

impl GovernorName {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();

        if let Some((before, after)) = raw.split_once(SUCCESSION_ARROW) {
            if let Some(acting) = strip_acting_marker(after) {
                return GovernorName::Acting {
                    predecessor: Some(before.trim().to_string()),
                    acting: acting.to_string(),
                };
            }
        }

        match strip_acting_marker(raw) {
            Some(acting) => GovernorName::Acting {
                predecessor: None,
                acting: acting.to_string(),
            },
            None => GovernorName::Elected(raw.to_string()),
        }
    }

    /// Name to query pledges with: the predecessor when an acting head
    /// replaced one, otherwise the person in office.
    pub fn pledge_lookup_name(&self) -> &str {
        match self {
            GovernorName::Elected(name) => name,
            GovernorName::Acting {
                predecessor: Some(p),
                ..
            } => p,
            GovernorName::Acting { acting, .. } => acting,
        }
    }

    /// True for `"전임자 → 대행자(대행)"` style names
    pub fn has_predecessor(&self) -> bool {
        matches!(
            self,
            GovernorName::Acting {
                predecessor: Some(_),
                ..
            }
        )
    }
}

/// Pick the originally elected governor from `/previous/:region`.
/// The first entry is the current office holder, so the second wins when present.
pub fn select_previous(governors: &[PreviousGovernor]) -> Option<&PreviousGovernor> {
    match governors {
        [] => None,
        [only] => Some(only),
        [_, previous, ..] => Some(previous),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev(name: &str) -> PreviousGovernor {
        PreviousGovernor {
            name: name.to_string(),
            jd_name: "무소속".to_string(),
            sg_id: "20220601".to_string(),
        }
    }

    #[test]
    fn test_elected_name() {
        let name = GovernorName::parse("홍준표");
        assert_eq!(name, GovernorName::Elected("홍준표".to_string()));
        assert_eq!(name.pledge_lookup_name(), "홍준표");
        assert!(!name.has_predecessor());
    }

    #[test]
    fn test_acting_with_predecessor() {
        let name = GovernorName::parse("홍준표 → 김정기(대행)");
        assert_eq!(
            name,
            GovernorName::Acting {
                predecessor: Some("홍준표".to_string()),
                acting: "김정기".to_string(),
            }
        );
        // Pledges belong to the elected predecessor, not "홍준표 → 김정기"
        assert_eq!(name.pledge_lookup_name(), "홍준표");
        assert!(name.has_predecessor());
    }

    #[test]
    fn test_other_acting_markers() {
        let name = GovernorName::parse("박시장 → 최부시장(권한대행)");
        assert_eq!(name.pledge_lookup_name(), "박시장");

        let name = GovernorName::parse("이군수 → 정부군수(직무대행)");
        assert!(name.has_predecessor());
    }

    #[test]
    fn test_bare_acting_name() {
        let name = GovernorName::parse("김정기(대행)");
        assert_eq!(name.pledge_lookup_name(), "김정기");
        assert!(!name.has_predecessor());
    }

    #[test]
    fn test_arrow_without_marker_is_elected() {
        let name = GovernorName::parse("갑 → 을");
        assert_eq!(name, GovernorName::Elected("갑 → 을".to_string()));
    }

    #[test]
    fn test_select_previous() {
        assert!(select_previous(&[]).is_none());
        assert_eq!(select_previous(&[prev("현직")]).unwrap().name, "현직");
        assert_eq!(
            select_previous(&[prev("현직"), prev("전임"), prev("전전임")]).unwrap().name,
            "전임"
        );
    }
}
