use super::client::BackendClient;
use super::error::ApiError;
use crate::roster::types::{
    AssemblyMember, Governor, GovernorsResponse, MemberDetail, PledgeResponse, PreviousGovernor,
    PreviousGovernorsResponse,
};

fn region_query<'a>(key: &'a str, region: Option<&'a str>) -> Vec<(&'a str, &'a str)> {
    region.map(|r| vec![(key, r)]).unwrap_or_default()
}

impl BackendClient {
    /// Legislators, optionally for one region. A non-array reply counts as no members.
    pub async fn fetch_assembly_members(
        &self,
        region: Option<&str>,
    ) -> Result<Vec<AssemblyMember>, ApiError> {
        let url = self.url(&["api", "assembly", "members"], &region_query("region", region))?;
        let value: serde_json::Value = self.get_json(url.clone(), true).await?;

        if !value.is_array() {
            log::debug!("Member list at {} is not an array, treating as empty", url);
            return Ok(Vec::new());
        }

        serde_json::from_value(value).map_err(|source| ApiError::Decode {
            url: url.to_string(),
            source,
        })
    }

    pub async fn fetch_member_detail(&self, name: &str) -> Result<MemberDetail, ApiError> {
        let url = self.url(&["api", "assembly", "member", name], &[])?;
        self.get_json(url, true).await
    }

    pub async fn fetch_metropolitan_governors(
        &self,
        region: Option<&str>,
    ) -> Result<Vec<Governor>, ApiError> {
        let url = self.url(
            &["api", "governors", "metropolitan"],
            &region_query("region", region),
        )?;
        let response: GovernorsResponse = self.get_json(url, true).await?;
        Ok(response.governors)
    }

    /// Basic (municipal) governors, filtered by metropolitan region via `metro`
    pub async fn fetch_basic_governors(&self, metro: Option<&str>) -> Result<Vec<Governor>, ApiError> {
        let url = self.url(&["api", "governors", "basic"], &region_query("metro", metro))?;
        let response: GovernorsResponse = self.get_json(url, true).await?;
        Ok(response.governors)
    }

    pub async fn fetch_pledges(&self, name: &str) -> Result<PledgeResponse, ApiError> {
        let url = self.url(&["api", "governors", "pledges", name], &[])?;
        self.get_json(url, true).await
    }

    /// Elected governors of a region, most recent first
    pub async fn fetch_previous_governors(
        &self,
        region: &str,
    ) -> Result<Vec<PreviousGovernor>, ApiError> {
        let url = self.url(&["api", "governors", "previous", region], &[])?;
        let response: PreviousGovernorsResponse = self.get_json(url, true).await?;
        Ok(response.governors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_server::{route, serve};

    #[tokio::test]
    async fn test_members_with_region_query() {
        let body = r#"[{"HG_NM": "홍길동", "POLY_NM": "무소속", "ORIG_NM": "부산 중구영도구"}]"#;
        let (base, requests) = serve(vec![route("/api/assembly/members", 200, body)]).await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let members = client.fetch_assembly_members(Some("부산")).await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].district, "부산 중구영도구");

        let target = requests.lock().unwrap()[0].target.clone();
        assert_eq!(target, "/api/assembly/members?region=%EB%B6%80%EC%82%B0");
    }

    #[tokio::test]
    async fn test_members_non_array_is_empty() {
        let (base, requests) =
            serve(vec![route("/api/assembly/members", 200, r#"{"message": "no data"}"#)]).await;
        let client = BackendClient::with_base_url(&base).unwrap();

        assert!(client.fetch_assembly_members(None).await.unwrap().is_empty());
        assert_eq!(requests.lock().unwrap()[0].target, "/api/assembly/members");
    }

    #[tokio::test]
    async fn test_basic_governors_use_metro_parameter() {
        let body = r#"{"governors": [{"position": "중구청장", "name": "김중구", "party": "무소속",
            "inaugurationDate": "2022-07-01", "status": "재임", "metropolitanRegion": "서울"}]}"#;
        let (base, requests) = serve(vec![route("/api/governors/basic", 200, body)]).await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let governors = client.fetch_basic_governors(Some("서울")).await.unwrap();
        assert_eq!(governors[0].metropolitan_region.as_deref(), Some("서울"));
        assert!(requests.lock().unwrap()[0].target.starts_with("/api/governors/basic?metro="));
    }

    #[tokio::test]
    async fn test_missing_governors_key_is_empty() {
        let (base, _) = serve(vec![route("/api/governors/metropolitan", 200, "{}")]).await;
        let client = BackendClient::with_base_url(&base).unwrap();
        assert!(client.fetch_metropolitan_governors(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pledges_not_found_surfaces_message() {
        let (base, _) = serve(vec![]).await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let err = client.fetch_pledges("없는사람").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "not found");
    }

    #[tokio::test]
    async fn test_member_detail_path_is_encoded() {
        let body = r#"{"member": {"name": "홍길동", "party": "무소속", "region": "서울 종로구"},
            "representativeBills": [], "jointBills": [],
            "statistics": {"representativeCount": 0, "jointCount": 0, "totalCount": 0}}"#;
        let (base, requests) = serve(vec![route(
            "/api/assembly/member/%ED%99%8D%EA%B8%B8%EB%8F%99",
            200,
            body,
        )])
        .await;
        let client = BackendClient::with_base_url(&base).unwrap();

        let detail = client.fetch_member_detail("홍길동").await.unwrap();
        assert_eq!(detail.member.region, "서울 종로구");
        assert_eq!(requests.lock().unwrap().len(), 1);
    }
}
