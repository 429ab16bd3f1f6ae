//! Typed HTTP client for the impact simulation service.
//!
//! Every method issues exactly one request. Responses use the
//! `{ success, error?, ...payload }` envelope, which is decoded here once so
//! callers only ever see `Ok(payload)` or a [`RequestError`].

use std::time::Duration;

use reqwest::{Response, Url};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::api::coerce::lenient_f64;
use crate::api::error::RequestError;
use crate::api::model::{
    Asteroid, AsteroidDetails, CloseApproach, ComparisonRequest, HealthStatus,
    HistoricalComparison, HistoricalImpact, MultiAsteroidParams, MultiImpactResult,
    SimulationParams, SimulationResult,
};

// Fallback messages when the service rejects a call without saying why.
pub const ASTEROIDS_CALL: &str = "Failed to fetch asteroids";
pub const DETAILS_CALL: &str = "Failed to fetch asteroid details";
pub const SIMULATE_CALL: &str = "Simulation failed";
pub const ELEVATION_CALL: &str = "Failed to fetch elevation";
pub const CLOSE_APPROACHES_CALL: &str = "Failed to fetch close approaches";
pub const MULTI_SIMULATE_CALL: &str = "Multi-asteroid simulation failed";
pub const HISTORICAL_CALL: &str = "Failed to fetch historical impacts";
pub const COMPARE_CALL: &str = "Failed to compare with historical impacts";
pub const HEALTH_CALL: &str = "Health check failed";

#[derive(Clone, Debug)]
pub struct ImpactApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ImpactApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RequestError> {
        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| RequestError::transport("Invalid API base URL", e))?;
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RequestError::transport("Failed to build HTTP client", e))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_asteroids(&self) -> Result<Vec<Asteroid>, RequestError> {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            asteroids: Vec<Asteroid>,
        }
        let payload: Payload = self.get("/api/asteroids", &[], ASTEROIDS_CALL).await?;
        Ok(payload.asteroids)
    }

    pub async fn get_asteroid_details(&self, id: &str) -> Result<AsteroidDetails, RequestError> {
        let mut url = self.url("/api/asteroid", DETAILS_CALL)?;
        url.path_segments_mut()
            .map_err(|_| RequestError::transport(DETAILS_CALL, "base URL cannot hold a path"))?
            .push(id);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::transport(DETAILS_CALL, e))?;
        read_envelope(resp, DETAILS_CALL).await
    }

    pub async fn simulate_impact(
        &self,
        params: &SimulationParams,
    ) -> Result<SimulationResult, RequestError> {
        self.post("/api/simulate", params, SIMULATE_CALL).await
    }

    pub async fn get_elevation(&self, lat: f64, lng: f64) -> Result<f64, RequestError> {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default, deserialize_with = "lenient_f64")]
            elevation: f64,
        }
        let query = [("lat", lat.to_string()), ("lon", lng.to_string())];
        let payload: Payload = self.get("/api/elevation", &query, ELEVATION_CALL).await?;
        Ok(payload.elevation)
    }

    pub async fn get_close_approaches(&self) -> Result<Vec<CloseApproach>, RequestError> {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            close_approaches: Vec<CloseApproach>,
        }
        let payload: Payload = self
            .get("/api/neo/close-approaches", &[], CLOSE_APPROACHES_CALL)
            .await?;
        Ok(payload.close_approaches)
    }

    pub async fn simulate_multi_impact(
        &self,
        asteroids: &[MultiAsteroidParams],
    ) -> Result<MultiImpactResult, RequestError> {
        #[derive(Serialize)]
        struct Body<'a> {
            asteroids: &'a [MultiAsteroidParams],
        }
        self.post("/api/simulate/multi", &Body { asteroids }, MULTI_SIMULATE_CALL)
            .await
    }

    pub async fn get_historical_impacts(&self) -> Result<Vec<HistoricalImpact>, RequestError> {
        #[derive(Deserialize)]
        struct Payload {
            #[serde(default)]
            impacts: Vec<HistoricalImpact>,
        }
        let payload: Payload = self
            .get("/api/historical-impacts", &[], HISTORICAL_CALL)
            .await?;
        Ok(payload.impacts)
    }

    pub async fn get_comparison(
        &self,
        energy_mt: f64,
        crater_km: Option<f64>,
    ) -> Result<HistoricalComparison, RequestError> {
        let body = ComparisonRequest {
            energy_mt,
            crater_km,
        };
        self.post("/api/historical-impacts/compare", &body, COMPARE_CALL)
            .await
    }

    /// The health endpoint carries no `success` flag.
    pub async fn health(&self) -> Result<HealthStatus, RequestError> {
        let url = self.url("/api/health", HEALTH_CALL)?;
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::transport(HEALTH_CALL, e))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RequestError::transport(HEALTH_CALL, format!("HTTP {}", status)));
        }
        let body = resp
            .text()
            .await
            .map_err(|e| RequestError::transport(HEALTH_CALL, e))?;
        serde_json::from_str(&body).map_err(|e| RequestError::decode(HEALTH_CALL, e))
    }

    fn url(&self, path: &str, call: &'static str) -> Result<Url, RequestError> {
        Url::parse(&format!("{}{}", self.base_url, path))
            .map_err(|e| RequestError::transport(call, e))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        call: &'static str,
    ) -> Result<T, RequestError> {
        let url = self.url(path, call)?;
        let resp = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| RequestError::transport(call, e))?;
        read_envelope(resp, call).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        call: &'static str,
    ) -> Result<T, RequestError> {
        let url = self.url(path, call)?;
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| RequestError::transport(call, e))?;
        read_envelope(resp, call).await
    }
}

async fn read_envelope<T: DeserializeOwned>(
    resp: Response,
    call: &'static str,
) -> Result<T, RequestError> {
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| RequestError::transport(call, e))?;
    match decode_envelope(&body, call) {
        // A non-2xx reply without a readable envelope is a transport problem.
        Err(RequestError::Decode { .. }) if !status.is_success() => {
            Err(RequestError::transport(call, format!("HTTP {}", status)))
        }
        other => other,
    }
}

/// Split an envelope into its payload or the server's rejection message.
///
/// A missing `success` flag counts as a rejection.
pub fn decode_envelope<T: DeserializeOwned>(
    body: &str,
    call: &'static str,
) -> Result<T, RequestError> {
    let value: Value = serde_json::from_str(body).map_err(|e| RequestError::decode(call, e))?;
    let success = value
        .get("success")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if !success {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or(call);
        return Err(RequestError::Rejected(message.to_string()));
    }
    serde_json::from_value(value).map_err(|e| RequestError::decode(call, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::model::RiskLevel;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ImpactApiClient {
        ImpactApiClient::new(&server.uri(), Duration::from_secs(10)).unwrap()
    }

    #[test]
    fn envelope_failure_uses_server_message() {
        let err = decode_envelope::<Value>(r#"{"success":false,"error":"NASA down"}"#, ASTEROIDS_CALL)
            .unwrap_err();
        assert_eq!(err, RequestError::Rejected("NASA down".into()));
    }

    #[test]
    fn envelope_failure_without_message_uses_fallback() {
        let err = decode_envelope::<Value>(r#"{"success":false}"#, CLOSE_APPROACHES_CALL).unwrap_err();
        assert_eq!(err.to_string(), CLOSE_APPROACHES_CALL);

        let err = decode_envelope::<Value>(r#"{"error":""}"#, ELEVATION_CALL).unwrap_err();
        assert_eq!(err.to_string(), ELEVATION_CALL);
    }

    #[test]
    fn envelope_payload_mismatch_is_decode_error() {
        #[derive(Debug, Deserialize)]
        struct Needs {
            #[allow(dead_code)]
            elevation: f64,
        }
        let err = decode_envelope::<Needs>(r#"{"success":true}"#, ELEVATION_CALL).unwrap_err();
        assert!(matches!(err, RequestError::Decode { .. }));
    }

    #[tokio::test]
    async fn get_asteroids_coerces_stringly_numbers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/asteroids"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "asteroids": [
                    {"id": "29075", "name": "29075", "diameter": "1.3", "velocity": "17.99",
                     "impact_probability": "2.6e-05", "palermo_scale": "-0.93"},
                    {"id": "101955", "name": "101955", "diameter": 0.49, "velocity": "n/a",
                     "impact_probability": 0.00037, "palermo_scale": null}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let asteroids = client_for(&server).get_asteroids().await.unwrap();
        assert_eq!(asteroids.len(), 2);
        assert_eq!(asteroids[0].diameter, 1.3);
        assert_eq!(asteroids[0].velocity, 17.99);
        assert_eq!(asteroids[0].impact_probability, 2.6e-5);
        assert_eq!(asteroids[1].diameter, 0.49);
        assert_eq!(asteroids[1].velocity, 0.0);
        assert_eq!(asteroids[1].palermo_scale, 0.0);
    }

    #[tokio::test]
    async fn get_asteroids_surfaces_server_error_on_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/asteroids"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"success": false, "error": "Sentry unavailable"})),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).get_asteroids().await.unwrap_err();
        assert_eq!(err, RequestError::Rejected("Sentry unavailable".into()));
    }

    #[tokio::test]
    async fn non_json_error_page_is_transport_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/neo/close-approaches"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server).get_close_approaches().await.unwrap_err();
        match err {
            RequestError::Transport { call, detail } => {
                assert_eq!(call, CLOSE_APPROACHES_CALL);
                assert!(detail.contains("502"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[tokio::test]
    async fn slow_server_hits_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/historical-impacts"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"success": true, "impacts": []}))
                    .set_delay(Duration::from_millis(800)),
            )
            .mount(&server)
            .await;

        let client = ImpactApiClient::new(&server.uri(), Duration::from_millis(100)).unwrap();
        let err = client.get_historical_impacts().await.unwrap_err();
        assert!(matches!(err, RequestError::Transport { call: HISTORICAL_CALL, .. }));
    }

    #[tokio::test]
    async fn close_approaches_come_back_verbatim() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/neo/close-approaches"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "count": 1,
                "close_approaches": [{
                    "id": "demo-2",
                    "name": "2025 BX3 (Demo)",
                    "close_approach_date": "2026-Feb-08 08:15",
                    "epoch_date_close_approach": 1739001300000_i64,
                    "miss_distance_km": 1200000.0,
                    "miss_distance_lunar": 3.1,
                    "velocity_km_s": 18.2,
                    "diameter_min_m": 250.0,
                    "diameter_max_m": 560.0,
                    "avg_diameter_m": 405.0,
                    "is_potentially_hazardous": true,
                    "risk_level": "high",
                    "nasa_jpl_url": "https://ssd.jpl.nasa.gov/"
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let approaches = client_for(&server).get_close_approaches().await.unwrap();
        assert_eq!(approaches.len(), 1);
        let a = &approaches[0];
        assert_eq!(a.name, "2025 BX3 (Demo)");
        assert_eq!(a.close_approach_date.as_deref(), Some("2026-Feb-08 08:15"));
        assert_eq!(a.risk_level, RiskLevel::High);
        assert_eq!(a.avg_diameter_m, 405.0);
    }

    #[tokio::test]
    async fn elevation_sends_coordinates() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/elevation"))
            .and(query_param("lat", "34.05"))
            .and(query_param("lon", "-118.24"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"success": true, "elevation": 89.3})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let elevation = client_for(&server).get_elevation(34.05, -118.24).await.unwrap();
        assert_eq!(elevation, 89.3);
    }

    #[tokio::test]
    async fn simulate_posts_camel_case_params() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/simulate"))
            .and(body_json(json!({
                "asteroidId": "99942",
                "impactLat": 10.0,
                "impactLon": 20.0,
                "mitigationDeltaV": 5.0
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "impact_energy_mt": 1500.0,
                "crater_diameter_km": 10.5,
                "tsunami_risk": false,
                "seismic_magnitude": 6.2,
                "fireball_radius_km": 2.1,
                "target_type": "rock",
                "original_trajectory": [[1e11, 0, 0], [0, 1e11, 0]],
                "deflected_trajectory": [[1.1e11, 0, 0], [0, 1.1e11, 0]],
                "miss_distance_km": 1000.0,
                "asteroid_name": "99942 Apophis"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = SimulationParams {
            asteroid_id: "99942".into(),
            impact_lat: 10.0,
            impact_lon: 20.0,
            mitigation_delta_v: 5.0,
        };
        let result = client_for(&server).simulate_impact(&params).await.unwrap();
        assert_eq!(result.impact_energy_mt, 1500.0);
        assert_eq!(result.target_type, "rock");
        assert_eq!(result.original_trajectory.len(), 2);
        assert_eq!(result.asteroid_name, "99942 Apophis");
    }

    #[tokio::test]
    async fn multi_simulation_wraps_asteroids_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/simulate/multi"))
            .and(body_json(json!({
                "asteroids": [{
                    "asteroidId": "a1",
                    "name": "Alpha",
                    "diameter": 0.5,
                    "velocity": 20.0,
                    "impactLat": 34.05,
                    "impactLon": -118.24,
                    "mitigationDeltaV": 0.0
                }]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "individual_results": [{
                    "asteroid_id": "a1",
                    "asteroid_name": "Alpha",
                    "impact_lat": 34.05,
                    "impact_lon": -118.24,
                    "impact_energy_mt": 7500.0,
                    "crater_diameter_km": 8.0,
                    "tsunami_risk": false,
                    "seismic_magnitude": 7.1,
                    "fireball_radius_km": 3.0,
                    "target_type": "rock",
                    "color": "#ef4444"
                }],
                "trajectories": [{
                    "asteroid_id": "a1",
                    "color": "#ef4444",
                    "original_trajectory": [[1.0, 2.0, 3.0]],
                    "deflected_trajectory": [[1.0, 2.0, 3.0]]
                }],
                "combined_effects": {
                    "total_energy_mt": 7500.0,
                    "max_crater_km": 8.0,
                    "total_crater_area_km2": 50.2,
                    "combined_seismic": 7.1,
                    "max_fireball_km": 3.0,
                    "tsunami_risk": false,
                    "impact_count": 1
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let params = vec![MultiAsteroidParams {
            asteroid_id: "a1".into(),
            name: "Alpha".into(),
            diameter: 0.5,
            velocity: 20.0,
            impact_lat: 34.05,
            impact_lon: -118.24,
            mitigation_delta_v: 0.0,
        }];
        let result = client_for(&server).simulate_multi_impact(&params).await.unwrap();
        assert_eq!(result.individual_results.len(), 1);
        assert_eq!(result.trajectories[0].original_trajectory.len(), 1);
        assert_eq!(result.combined_effects.impact_count, 1);
        assert_eq!(result.combined_effects.total_energy_mt, 7500.0);
    }

    #[tokio::test]
    async fn comparison_rejection_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/historical-impacts/compare"))
            .and(body_json(json!({"energy_mt": 0.0})))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"success": false, "error": "Invalid energy value"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).get_comparison(0.0, None).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid energy value");
    }

    #[tokio::test]
    async fn asteroid_details_escape_designation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/asteroid/2000%20SG344"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "orbital_elements": {"a": 1.5e11, "e": "0.07", "i": 0.001, "omega": 3.3, "w": 4.4, "M": 1.1},
                "name": "(2000 SG344)"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let details = client_for(&server)
            .get_asteroid_details("2000 SG344")
            .await
            .unwrap();
        assert_eq!(details.name, "(2000 SG344)");
        assert_eq!(details.orbital_elements.e, 0.07);
    }

    #[tokio::test]
    async fn health_reads_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/health"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"status": "healthy", "service": "Impact API"})),
            )
            .mount(&server)
            .await;

        let health = client_for(&server).health().await.unwrap();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        assert!(ImpactApiClient::new("not a url", Duration::from_secs(1)).is_err());
        let client = ImpactApiClient::new("http://localhost:5000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5000");
    }
}
