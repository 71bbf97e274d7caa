//! AirLabs flight-data client.
//!
//! Each search turns into exactly one GET against `{base_url}/{endpoint}`.
//! No retries; a timeout exists only if one is configured.

use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::models::{ApiResponse, Endpoint, QueryParameters, SearchIntent};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// Name of the credential parameter sent with every request.
pub const API_KEY_PARAM: &str = "api_key";

/// Status line and body of an HTTP response, before any interpretation.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything that can perform a GET with query parameters.
///
/// Connectivity failures come back as `Err`; HTTP error statuses come back
/// as `Ok` and are judged by the client.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, query: &QueryParameters) -> Result<RawResponse>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, query: &QueryParameters) -> Result<RawResponse> {
        let pairs: Vec<(&str, &str)> = query.iter().collect();
        let res = self.client.get(url).query(&pairs).send().await?;

        let status = res.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();
        let body = res.text().await?;

        Ok(RawResponse {
            status: status.as_u16(),
            reason,
            body,
        })
    }
}

/// Flight number: up to 6 characters is IATA, longer is ICAO.
pub fn flight_number_query(code: &str) -> Result<QueryParameters> {
    let code = required(code, "flight number")?;
    let key = if code.chars().count() <= 6 {
        "flight_iata"
    } else {
        "flight_icao"
    };
    Ok(QueryParameters::new().with(key, code.to_uppercase()))
}

/// Route: each airport code is IATA when exactly 3 characters, else ICAO.
pub fn route_query(departure: &str, arrival: Option<&str>) -> Result<QueryParameters> {
    let departure = required(departure, "departure airport")?;
    let mut params = QueryParameters::new();
    params.insert(airport_key(departure, "dep"), departure.to_uppercase());

    if let Some(arrival) = arrival.map(str::trim).filter(|a| !a.is_empty()) {
        params.insert(airport_key(arrival, "arr"), arrival.to_uppercase());
    }
    Ok(params)
}

pub fn airline_query(code: &str) -> Result<QueryParameters> {
    let code = required(code, "airline code")?;
    let key = if code.chars().count() == 2 {
        "iata_code"
    } else {
        "icao_code"
    };
    Ok(QueryParameters::new().with(key, code.to_uppercase()))
}

pub fn airport_query(code: &str) -> Result<QueryParameters> {
    let code = required(code, "airport code")?;
    let key = if code.chars().count() == 3 {
        "iata_code"
    } else {
        "icao_code"
    };
    Ok(QueryParameters::new().with(key, code.to_uppercase()))
}

fn airport_key(code: &str, prefix: &str) -> String {
    if code.chars().count() == 3 {
        format!("{prefix}_iata")
    } else {
        format!("{prefix}_icao")
    }
}

fn required<'a>(value: &'a str, what: &str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_intent(format!("{what} is required")));
    }
    Ok(value)
}

/// Turns an HTTP response into an [`ApiResponse`] or the matching error.
pub fn interpret(raw: RawResponse) -> Result<ApiResponse> {
    if !raw.is_success() {
        return Err(Error::Transport {
            status: raw.status,
            reason: raw.reason,
        });
    }

    // Valid JSON that isn't an envelope object carries no flights.
    let data = match serde_json::from_str::<Value>(&raw.body)? {
        body @ Value::Object(_) => serde_json::from_value::<ApiResponse>(body)?,
        _ => ApiResponse::default(),
    };

    if let Some(message) = data.error_message() {
        return Err(Error::api(message));
    }
    Ok(data)
}

pub struct AirLabsClient<T: Transport = HttpTransport> {
    transport: T,
    base_url: String,
    api_key: String,
}

impl AirLabsClient<HttpTransport> {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let timeout = config.timeout_seconds.map(Duration::from_secs);
        Ok(Self::with_transport(HttpTransport::new(timeout)?, config))
    }
}

impl<T: Transport> AirLabsClient<T> {
    pub fn with_transport(transport: T, config: &ApiConfig) -> Self {
        Self {
            transport,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.as_str())
    }

    pub async fn search(&self, intent: &SearchIntent) -> Result<ApiResponse> {
        match intent {
            SearchIntent::FlightNumber { code } => self.search_by_flight_number(code).await,
            SearchIntent::Route { departure, arrival } => {
                self.search_by_route(departure, arrival.as_deref()).await
            }
        }
    }

    pub async fn search_by_flight_number(&self, code: &str) -> Result<ApiResponse> {
        let params = flight_number_query(code)?;
        self.request(Endpoint::Flight, params).await
    }

    pub async fn search_by_route(
        &self,
        departure: &str,
        arrival: Option<&str>,
    ) -> Result<ApiResponse> {
        let params = route_query(departure, arrival)?;
        self.request(Endpoint::Schedules, params).await
    }

    /// Live positions, filtered by whatever AirLabs parameters the caller passes.
    pub async fn real_time_flights(&self, filters: QueryParameters) -> Result<ApiResponse> {
        self.request(Endpoint::Flights, filters).await
    }

    pub async fn search_airline(&self, code: &str) -> Result<ApiResponse> {
        let params = airline_query(code)?;
        self.request(Endpoint::Airlines, params).await
    }

    pub async fn search_airport(&self, code: &str) -> Result<ApiResponse> {
        let params = airport_query(code)?;
        self.request(Endpoint::Airports, params).await
    }

    async fn request(&self, endpoint: Endpoint, mut params: QueryParameters) -> Result<ApiResponse> {
        debug!(
            "Request params for {}: {:?}",
            endpoint.as_str(),
            params.redacted(API_KEY_PARAM)
        );
        params.insert(API_KEY_PARAM, self.api_key.as_str());

        let url = self.endpoint_url(endpoint);
        info!("GET {}", url);

        let result = self.transport.get(&url, &params).await.and_then(interpret);

        if let Err(ref e) = result {
            error!("AirLabs API error on '{}': {}", endpoint.as_str(), e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResponsePayload;
    use std::sync::Mutex;

    struct FakeTransport {
        // `None` simulates a request that never got a response.
        reply: Option<RawResponse>,
        calls: Mutex<Vec<(String, QueryParameters)>>,
    }

    impl FakeTransport {
        fn replying(status: u16, reason: &str, body: &str) -> Self {
            Self {
                reply: Some(RawResponse {
                    status,
                    reason: reason.to_string(),
                    body: body.to_string(),
                }),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn offline() -> Self {
            Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn get(&self, url: &str, query: &QueryParameters) -> Result<RawResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((url.to_string(), query.clone()));
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => {
                    // An unparsable URL fails inside reqwest without touching the network.
                    let err = Client::new().get("not a url").build().unwrap_err();
                    Err(Error::Network(err))
                }
            }
        }
    }

    fn ok(body: &str) -> RawResponse {
        RawResponse {
            status: 200,
            reason: "OK".to_string(),
            body: body.to_string(),
        }
    }

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: "https://airlabs.co/api/v9/".to_string(),
            api_key: "test-key".to_string(),
            timeout_seconds: None,
        }
    }

    fn client(status: u16, reason: &str, body: &str) -> AirLabsClient<FakeTransport> {
        AirLabsClient::with_transport(FakeTransport::replying(status, reason, body), &config())
    }

    #[test]
    fn test_flight_number_classification() {
        let q = flight_number_query(" aa100 ").unwrap();
        assert_eq!(q.get("flight_iata"), Some("AA100"));
        assert!(!q.contains("flight_icao"));

        // Exactly six characters resolves toward IATA.
        let q = flight_number_query("vn2201").unwrap();
        assert_eq!(q.get("flight_iata"), Some("VN2201"));

        let q = flight_number_query("hvn2201").unwrap();
        assert_eq!(q.get("flight_icao"), Some("HVN2201"));
        assert!(!q.contains("flight_iata"));
    }

    #[test]
    fn test_route_classification_is_per_code() {
        let q = route_query("jfk", Some("egll")).unwrap();
        assert_eq!(q.get("dep_iata"), Some("JFK"));
        assert_eq!(q.get("arr_icao"), Some("EGLL"));
        assert_eq!(q.len(), 2);

        let q = route_query("kjfk", Some("lhr")).unwrap();
        assert_eq!(q.get("dep_icao"), Some("KJFK"));
        assert_eq!(q.get("arr_iata"), Some("LHR"));
    }

    #[test]
    fn test_route_without_arrival() {
        let q = route_query("SGN", None).unwrap();
        assert_eq!(q.len(), 1);
        assert!(!q.contains("arr_iata") && !q.contains("arr_icao"));

        let q = route_query("SGN", Some("   ")).unwrap();
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_airline_and_airport_classification() {
        assert_eq!(airline_query("vn").unwrap().get("iata_code"), Some("VN"));
        assert_eq!(airline_query("hvn").unwrap().get("icao_code"), Some("HVN"));
        assert_eq!(airport_query("sgn").unwrap().get("iata_code"), Some("SGN"));
        assert_eq!(airport_query("vvts").unwrap().get("icao_code"), Some("VVTS"));
    }

    #[test]
    fn test_blank_inputs_are_invalid() {
        assert!(matches!(flight_number_query("  "), Err(Error::InvalidIntent { .. })));
        assert!(matches!(route_query("", None), Err(Error::InvalidIntent { .. })));
        assert!(matches!(airport_query(""), Err(Error::InvalidIntent { .. })));
    }

    #[tokio::test]
    async fn test_flight_search_hits_flight_endpoint_with_key() {
        let api = client(200, "OK", r#"{"response": {"flight_iata": "AA100"}}"#);
        let resp = api.search_by_flight_number("aa100").await.unwrap();
        assert!(matches!(resp.response, Some(ResponsePayload::One(_))));

        let calls = api.transport.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        let (url, params) = &calls[0];
        assert_eq!(url, "https://airlabs.co/api/v9/flight");
        assert_eq!(params.get(API_KEY_PARAM), Some("test-key"));
        assert_eq!(params.get("flight_iata"), Some("AA100"));
    }

    #[tokio::test]
    async fn test_route_search_hits_schedules_endpoint() {
        let api = client(200, "OK", r#"{"response": []}"#);
        let intent = SearchIntent::route("jfk", Some("lax")).unwrap();
        api.search(&intent).await.unwrap();

        let calls = api.transport.calls.lock().unwrap();
        let (url, params) = &calls[0];
        assert_eq!(url, "https://airlabs.co/api/v9/schedules");
        assert_eq!(params.get("dep_iata"), Some("JFK"));
        assert_eq!(params.get("arr_iata"), Some("LAX"));
    }

    #[tokio::test]
    async fn test_http_500_is_transport_error() {
        let api = client(500, "Internal Server Error", r#"{"response": []}"#);
        let err = api.search_by_flight_number("AA100").await.unwrap_err();
        match err {
            Error::Transport { status, reason } => {
                assert_eq!(status, 500);
                assert_eq!(reason, "Internal Server Error");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_body_is_decode_error() {
        let api = client(200, "OK", "<html>maintenance</html>");
        let err = api.search_airport("SGN").await.unwrap_err();
        assert!(matches!(err, Error::Decode(_)));
    }

    #[tokio::test]
    async fn test_upstream_error_message() {
        let api = client(200, "OK", r#"{"error": {"message": "bad key"}}"#);
        let err = api.search_airline("VN").await.unwrap_err();
        assert!(matches!(err, Error::Api { ref message } if message == "bad key"));
    }

    #[tokio::test]
    async fn test_upstream_error_without_message_uses_fallback() {
        let api = client(200, "OK", r#"{"error": {}}"#);
        let err = api.search_by_route("JFK", None).await.unwrap_err();
        assert_eq!(err.to_string(), crate::error::API_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_intent_never_reaches_transport() {
        let api = client(200, "OK", "{}");
        assert!(api.search_by_flight_number("   ").await.is_err());
        assert!(api.transport.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_non_object_json_has_no_data() {
        for body in [r#"[{"message":"x"}]"#, "[1]", "[]", r#""maintenance""#, "42", "null"] {
            let resp = interpret(ok(body)).unwrap();
            assert_eq!(resp, ApiResponse::default(), "body {body}");
            assert_eq!(
                crate::normalize::normalize(&resp).condition,
                Some(crate::normalize::SoftCondition::NoDataFound)
            );
        }
    }

    #[test]
    fn test_object_body_still_checked_for_error() {
        let err = interpret(ok(r#"{"error": {"message": "x"}}"#)).unwrap_err();
        assert!(matches!(err, Error::Api { ref message } if message == "x"));
    }

    #[tokio::test]
    async fn test_connectivity_failure_is_network_error() {
        let api = AirLabsClient::with_transport(FakeTransport::offline(), &config());
        let err = api.search_by_flight_number("AA100").await.unwrap_err();
        assert!(matches!(err, Error::Network(_)), "got {err:?}");
        assert_eq!(api.transport.calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_real_time_flights_passes_filters() {
        let api = client(200, "OK", r#"{"response": []}"#);
        let filters = QueryParameters::new().with("airline_iata", "VN");
        api.real_time_flights(filters).await.unwrap();

        let calls = api.transport.calls.lock().unwrap();
        let (url, params) = &calls[0];
        assert!(url.ends_with("/flights"));
        assert_eq!(params.get("airline_iata"), Some("VN"));
        assert_eq!(params.get(API_KEY_PARAM), Some("test-key"));
    }
}
