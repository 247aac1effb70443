use crate::api::{ApiError, BackendClient};
use crate::roster::{select_previous, GovernorName, PledgeResponse, PreviousGovernor, RegionRoster};

/// Load legislators, metropolitan governors and basic governors for a region
/// (or the whole country) in parallel.
///
/// With a region only the first metropolitan governor is kept. Any failed
/// listing fails the whole roster.
pub async fn fetch_region_roster(
    client: &BackendClient,
    region: Option<&str>,
) -> Result<RegionRoster, ApiError> {
    let (legislators, mut metropolitan, basic) = tokio::try_join!(
        client.fetch_assembly_members(region),
        client.fetch_metropolitan_governors(region),
        client.fetch_basic_governors(region),
    )?;

    if region.is_some() {
        metropolitan.truncate(1);
    }

    log::debug!(
        "Roster for {}: {} metropolitan, {} legislators, {} basic",
        region.unwrap_or("전국"),
        metropolitan.len(),
        legislators.len(),
        basic.len()
    );

    Ok(RegionRoster {
        region: region.map(str::to_string),
        metropolitan,
        legislators,
        basic,
    })
}

/// Pledges for a governor, plus the originally elected governor when the
/// office is held by an acting head.
#[derive(Debug, Clone)]
pub struct GovernorPledges {
    pub name: GovernorName,
    pub pledges: PledgeResponse,
    pub previous: Option<PreviousGovernor>,
}

/// Look up pledges by the name shown in a roster row.
///
/// Acting names (`"전임자 → 대행자(대행)"`) query the predecessor's pledges.
/// A failed previous-governor lookup is logged and otherwise ignored.
pub async fn fetch_governor_pledges(
    client: &BackendClient,
    raw_name: &str,
) -> Result<GovernorPledges, ApiError> {
    let name = GovernorName::parse(raw_name);
    let pledges = client.fetch_pledges(name.pledge_lookup_name()).await?;

    let previous = if name.has_predecessor() && !pledges.sido_name.is_empty() {
        match client.fetch_previous_governors(&pledges.sido_name).await {
            Ok(governors) => select_previous(&governors).cloned(),
            Err(e) => {
                log::debug!("Previous governor lookup for {} failed: {}", pledges.sido_name, e);
                None
            }
        }
    } else {
        None
    };

    Ok(GovernorPledges {
        name,
        pledges,
        previous,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{route, serve};

    const METRO: &str = r#"{"governors": [
        {"position": "서울특별시장", "name": "김서울", "party": "무소속", "inaugurationDate": "2022-07-01", "status": "재임"},
        {"position": "부산광역시장", "name": "박부산", "party": "무소속", "inaugurationDate": "2022-07-01", "status": "재임"}
    ]}"#;

    const PLEDGES: &str = r#"{"resultCode": "INFO-00", "resultMsg": "NORMAL SERVICE",
        "krName": "홍준표", "partyName": "무소속", "sidoName": "대구광역시", "prmsCnt": 0, "pledges": []}"#;

    #[tokio::test]
    async fn test_region_roster_keeps_first_metropolitan_governor() {
        let (base, requests) = serve(vec![
            route("/api/assembly/members", 200, "[]"),
            route("/api/governors/metropolitan", 200, METRO),
            route("/api/governors/basic", 200, r#"{"governors": []}"#),
        ])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let roster = fetch_region_roster(&client, Some("서울")).await.unwrap();
        assert_eq!(roster.metropolitan.len(), 1);
        assert_eq!(roster.metropolitan[0].name, "김서울");
        assert_eq!(roster.title(), "서울");
        assert_eq!(requests.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_nationwide_roster_keeps_all() {
        let (base, _) = serve(vec![
            route("/api/assembly/members", 200, "[]"),
            route("/api/governors/metropolitan", 200, METRO),
            route("/api/governors/basic", 200, r#"{"governors": []}"#),
        ])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let roster = fetch_region_roster(&client, None).await.unwrap();
        assert_eq!(roster.metropolitan.len(), 2);
        assert_eq!(roster.title(), "전국");
    }

    #[tokio::test]
    async fn test_roster_fails_when_any_listing_fails() {
        let (base, _) = serve(vec![
            route("/api/assembly/members", 200, "[]"),
            route("/api/governors/metropolitan", 500, r#"{"error": "upstream down"}"#),
            route("/api/governors/basic", 200, r#"{"governors": []}"#),
        ])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let err = fetch_region_roster(&client, None).await.unwrap_err();
        assert_eq!(err.to_string(), "upstream down");
    }

    #[tokio::test]
    async fn test_acting_governor_pledges_use_predecessor() {
        let (base, requests) = serve(vec![
            route("/api/governors/pledges/%ED%99%8D%EC%A4%80%ED%91%9C", 200, PLEDGES),
            route(
                "/api/governors/previous/%EB%8C%80%EA%B5%AC%EA%B4%91%EC%97%AD%EC%8B%9C",
                200,
                r#"{"governors": [{"name": "현직", "jdName": "무소속", "sgId": "20220601"},
                                  {"name": "홍준표", "jdName": "무소속", "sgId": "20220601"}]}"#,
            ),
        ])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let result = fetch_governor_pledges(&client, "홍준표 → 김정기(대행)").await.unwrap();
        assert_eq!(result.pledges.kr_name, "홍준표");
        assert_eq!(result.previous.unwrap().name, "홍준표");
        assert_eq!(requests.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_elected_governor_skips_previous_lookup() {
        let (base, requests) = serve(vec![route(
            "/api/governors/pledges/%ED%99%8D%EC%A4%80%ED%91%9C",
            200,
            PLEDGES,
        )])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let result = fetch_governor_pledges(&client, "홍준표").await.unwrap();
        assert!(result.previous.is_none());
        assert_eq!(requests.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_previous_lookup_failure_is_ignored() {
        let (base, _) = serve(vec![route(
            "/api/governors/pledges/%ED%99%8D%EC%A4%80%ED%91%9C",
            200,
            PLEDGES,
        )])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let result = fetch_governor_pledges(&client, "홍준표 → 김정기(권한대행)").await.unwrap();
        assert!(result.previous.is_none());
    }
}
