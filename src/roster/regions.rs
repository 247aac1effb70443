/// First-level administrative division
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    /// English name as found in map data, without the -do / -si suffix
    pub key: &'static str,
    /// Name the backend expects in the `region` / `metro` query
    pub name: &'static str,
    /// Official full name
    pub official: &'static str,
}

const fn region(key: &'static str, name: &'static str, official: &'static str) -> Region {
    Region { key, name, official }
}

pub const REGIONS: [Region; 17] = [
    region("Seoul", "서울", "서울특별시"),
    region("Busan", "부산", "부산광역시"),
    region("Daegu", "대구", "대구광역시"),
    region("Incheon", "인천", "인천광역시"),
    region("Gwangju", "광주", "광주광역시"),
    region("Daejeon", "대전", "대전광역시"),
    region("Ulsan", "울산", "울산광역시"),
    region("Sejong", "세종", "세종특별자치시"),
    region("Gyeonggi", "경기도", "경기도"),
    region("Gangwon", "강원도", "강원특별자치도"),
    region("Chungcheongbuk", "충북", "충청북도"),
    region("Chungcheongnam", "충남", "충청남도"),
    region("Jeollabuk", "전북", "전북특별자치도"),
    region("Jeollanam", "전남", "전라남도"),
    region("Gyeongsangbuk", "경북", "경상북도"),
    region("Gyeongsangnam", "경남", "경상남도"),
    region("Jeju", "제주", "제주특별자치도"),
];

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> &'a str {
    let Some(cut) = s.len().checked_sub(suffix.len()) else {
        return s;
    };
    if s.is_char_boundary(cut) && s[cut..].eq_ignore_ascii_case(suffix) {
        &s[..cut]
    } else {
        s
    }
}

/// Resolve user or map input to a region.
///
/// Accepts the English key (any case, optional `-do` / `-si` suffix), the
/// backend's Korean name, the official Korean name, or the Korean name
/// without its trailing 도.
pub fn normalize_region(input: &str) -> Option<&'static Region> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let english = strip_suffix_ignore_case(strip_suffix_ignore_case(input, "-do"), "-si");

    REGIONS.iter().find(|r| {
        r.key.eq_ignore_ascii_case(english)
            || r.name == input
            || r.official == input
            || r.name.strip_suffix('도') == Some(input)
    })
}
