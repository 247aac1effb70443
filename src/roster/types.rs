use serde::{Deserialize, Serialize};

/// National Assembly member as listed per region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyMember {
    #[serde(rename = "HG_NM")]
    pub name: String,
    #[serde(rename = "POLY_NM", default)]
    pub party: String,
    #[serde(rename = "ORIG_NM", default)]
    pub district: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    pub name: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub region: String,
}

/// A bill proposed by a member; the upstream feed leaves any field out at will.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Bill {
    #[serde(default)]
    pub bill_id: Option<String>,
    #[serde(default)]
    pub bill_no: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    /// YYYYMMDD
    #[serde(rename = "PROPOSE_DT", default)]
    pub propose_date: Option<String>,
    #[serde(default)]
    pub proposer: Option<String>,
    #[serde(default)]
    pub committee: Option<String>,
    #[serde(rename = "PROC_RESULT", default)]
    pub process_result: Option<String>,
}

impl Bill {
    /// Proposal date as YYYY-MM-DD, "-" when missing
    pub fn display_date(&self) -> String {
        format_bill_date(self.propose_date.as_deref())
    }
}

/// "20240531" -> "2024-05-31". Other non-empty values pass through unchanged.
pub fn format_bill_date(date: Option<&str>) -> String {
    match date {
        None | Some("") => "-".to_string(),
        Some(d) if d.len() == 8 && d.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}-{}-{}", &d[0..4], &d[4..6], &d[6..8])
        }
        Some(d) => d.to_string(),
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillStatistics {
    pub representative_count: u32,
    pub joint_count: u32,
    pub total_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberDetail {
    pub member: MemberProfile,
    #[serde(default)]
    pub representative_bills: Vec<Bill>,
    #[serde(default)]
    pub joint_bills: Vec<Bill>,
    #[serde(default)]
    pub statistics: BillStatistics,
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl MemberDetail {
    /// One-paragraph description of the member's legislative record
    pub fn summary(&self) -> String {
        format!(
            "{} 국회의원 ({}, {})의 의정활동 정보입니다. 대표발의 {}건, 공동발의 {}건, 총 {}건의 법안을 발의했습니다.",
            self.member.name,
            self.member.party,
            self.member.region,
            self.statistics.representative_count,
            self.statistics.joint_count,
            self.statistics.total_count
        )
    }
}

/// Head of a metropolitan or basic local government
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Governor {
    #[serde(default)]
    pub position: String,
    pub name: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub inauguration_date: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
    /// Set for basic (municipal) governors only
    #[serde(default)]
    pub metropolitan_region: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GovernorsResponse {
    #[serde(default)]
    pub governors: Vec<Governor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pledge {
    pub prms_ord: u32,
    #[serde(default)]
    pub prms_realm_name: String,
    pub prms_title: String,
    #[serde(default)]
    pub prms_cont: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PledgeResponse {
    #[serde(default)]
    pub result_code: String,
    #[serde(default)]
    pub result_msg: String,
    pub kr_name: String,
    #[serde(default)]
    pub party_name: String,
    #[serde(default)]
    pub sido_name: String,
    #[serde(default)]
    pub sgg_name: Option<String>,
    #[serde(default)]
    pub prms_cnt: u32,
    #[serde(default)]
    pub pledges: Vec<Pledge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousGovernor {
    pub name: String,
    #[serde(default)]
    pub jd_name: String,
    #[serde(default)]
    pub sg_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviousGovernorsResponse {
    #[serde(default)]
    pub governors: Vec<PreviousGovernor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assembly_member() {
        let json = r#"{"HG_NM": "홍길동", "POLY_NM": "무소속", "ORIG_NM": "서울 종로구"}"#;
        let member: AssemblyMember = serde_json::from_str(json).unwrap();
        assert_eq!(member.name, "홍길동");
        assert_eq!(member.party, "무소속");
        assert_eq!(member.district, "서울 종로구");
    }

    #[test]
    fn test_parse_member_detail() {
        let json = r#"{
            "member": {"name": "홍길동", "party": "무소속", "region": "서울 종로구"},
            "representativeBills": [
                {"BILL_ID": "PRC_X", "BILL_NAME": "도로교통법 일부개정법률안", "PROPOSE_DT": "20240531", "EXTRA": 1}
            ],
            "jointBills": [],
            "statistics": {"representativeCount": 1, "jointCount": 0, "totalCount": 1},
            "lastUpdated": "2025-01-01T00:00:00Z"
        }"#;
        let detail: MemberDetail = serde_json::from_str(json).unwrap();
        let bill = &detail.representative_bills[0];
        assert_eq!(bill.bill_name.as_deref(), Some("도로교통법 일부개정법률안"));
        assert_eq!(bill.display_date(), "2024-05-31");
        assert!(bill.committee.is_none());
        assert_eq!(
            detail.summary(),
            "홍길동 국회의원 (무소속, 서울 종로구)의 의정활동 정보입니다. 대표발의 1건, 공동발의 0건, 총 1건의 법안을 발의했습니다."
        );
    }

    #[test]
    fn test_format_bill_date() {
        assert_eq!(format_bill_date(Some("20231105")), "2023-11-05");
        assert_eq!(format_bill_date(Some("2023-11-05")), "2023-11-05");
        assert_eq!(format_bill_date(Some("")), "-");
        assert_eq!(format_bill_date(None), "-");
    }

    #[test]
    fn test_parse_governors() {
        let json = r#"{"governors": [
            {"position": "서울특별시장", "name": "김서울", "party": "무소속",
             "inaugurationDate": "2022-07-01", "status": "재임"},
            {"position": "종로구청장", "name": "이종로", "party": "무소속",
             "inaugurationDate": "2022-07-01", "status": "재임", "metropolitanRegion": "서울"}
        ]}"#;
        let response: GovernorsResponse = serde_json::from_str(json).unwrap();
        assert!(response.governors[0].metropolitan_region.is_none());
        assert_eq!(response.governors[1].metropolitan_region.as_deref(), Some("서울"));
    }

    #[test]
    fn test_parse_pledges() {
        let json = r#"{
            "resultCode": "INFO-00", "resultMsg": "NORMAL SERVICE",
            "krName": "김서울", "partyName": "무소속", "sidoName": "서울특별시",
            "prmsCnt": 1,
            "pledges": [{"prmsOrd": 1, "prmsRealmName": "교통", "prmsTitle": "지하철 연장", "prmsCont": "내용"}]
        }"#;
        let response: PledgeResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.kr_name, "김서울");
        assert!(response.sgg_name.is_none());
        assert_eq!(response.pledges[0].prms_title, "지하철 연장");
    }
}
