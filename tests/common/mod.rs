// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory stand-ins for Strava, OpenWeather, Nominatim and the console.
//!
//! Every fake writes to a shared [`CallLog`] so tests can assert which
//! remote calls happened and in what order. [`serve_once`] stands in for a
//! remote HTTP endpoint when testing the real clients.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use namelizer::config::UserConfig;
use namelizer::error::{AppError, Result};
use namelizer::models::{Activity, ActivitySummary, ActivityUpdate, Credentials};
use namelizer::services::{
    auth, ActivityApi, AuthorizationPrompt, EnrichmentResolver, Geocoder, Orchestrator,
    TokenGrant, UpdatePipeline, WeatherApi,
};
use namelizer::time_utils::local_timestamp;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// A remote call observed by a fake.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List { access_token: String, after: i64 },
    Detail(u64),
    Update(u64, ActivityUpdate),
    Exchange(String),
    Refresh(String),
    Weather { dt: i64, lat: f64, lon: f64 },
    Geocode { lat: f64, lon: f64 },
}

#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn updates(&self) -> Vec<(u64, ActivityUpdate)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Update(id, update) => Some((id, update)),
                _ => None,
            })
            .collect()
    }

    #[allow(dead_code)]
    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }
}

/// Build an activity record the way Strava returns it.
#[allow(dead_code)]
pub fn activity(id: u64, name: &str, description: Option<&str>, start: &str) -> Activity {
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "description": description,
        "start_date_local": start,
        "start_latlng": [37.3318, -122.0312],
        "end_latlng": [37.3230, -122.0322],
        "distance": 20500.0,
        "sport_type": "Ride"
    }))
    .unwrap()
}

/// Strava call that should answer with an error.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StravaFailure {
    List,
    Update(u64),
}

/// Strava activity endpoints backed by a list of activities.
pub struct FakeStrava {
    log: CallLog,
    activities: Mutex<Vec<Activity>>,
    fail: Option<StravaFailure>,
}

impl FakeStrava {
    pub fn new(log: CallLog, activities: Vec<Activity>) -> Self {
        Self {
            log,
            activities: Mutex::new(activities),
            fail: None,
        }
    }

    #[allow(dead_code)]
    pub fn failing(mut self, failure: StravaFailure) -> Self {
        self.fail = Some(failure);
        self
    }

    #[allow(dead_code)]
    pub fn get(&self, id: u64) -> Option<Activity> {
        self.activities
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
    }
}

#[async_trait]
impl ActivityApi for FakeStrava {
    async fn list_since(&self, access_token: &str, after: i64) -> Result<Vec<ActivitySummary>> {
        self.log.push(Call::List {
            access_token: access_token.to_string(),
            after,
        });
        if self.fail == Some(StravaFailure::List) {
            return Err(AppError::Api("HTTP 500 Internal Server Error".to_string()));
        }

        Ok(self
            .activities
            .lock()
            .unwrap()
            .iter()
            .filter(|a| local_timestamp(&a.start_date_local).unwrap() > after)
            .map(|a| ActivitySummary {
                id: a.id,
                name: a.name.clone(),
                start_date_local: a.start_date_local.clone(),
            })
            .collect())
    }

    async fn fetch_detail(&self, _access_token: &str, activity_id: u64) -> Result<Activity> {
        self.log.push(Call::Detail(activity_id));
        self.get(activity_id)
            .ok_or_else(|| AppError::Api(format!("HTTP 404 Not Found: {}", activity_id)))
    }

    async fn update(
        &self,
        _access_token: &str,
        activity_id: u64,
        update: &ActivityUpdate,
    ) -> Result<Activity> {
        self.log.push(Call::Update(activity_id, update.clone()));
        if self.fail == Some(StravaFailure::Update(activity_id)) {
            return Err(AppError::Api(format!(
                "HTTP 503 Service Unavailable: {}",
                activity_id
            )));
        }

        let mut activities = self.activities.lock().unwrap();
        let stored = activities
            .iter_mut()
            .find(|a| a.id == activity_id)
            .ok_or_else(|| AppError::Api(format!("HTTP 404 Not Found: {}", activity_id)))?;

        if let Some(name) = &update.name {
            stored.name = name.clone();
        }
        if let Some(description) = &update.description {
            stored.description = Some(description.clone());
        }
        Ok(stored.clone())
    }
}

/// Token endpoint that hands out fixed credentials.
#[allow(dead_code)]
pub struct FakeAuth {
    pub log: CallLog,
    pub client_id: String,
    pub issued: Credentials,
    pub fail: bool,
}

#[async_trait]
impl TokenGrant for FakeAuth {
    fn authorization_url(&self) -> String {
        auth::authorization_url(&self.client_id)
    }

    async fn exchange_authorization_code(&self, code: &str) -> Result<Credentials> {
        self.log.push(Call::Exchange(code.to_string()));
        if self.fail {
            return Err(AppError::Auth("Token request failed with status 400".to_string()));
        }
        Ok(self.issued.clone())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<Credentials> {
        self.log.push(Call::Refresh(refresh_token.to_string()));
        if self.fail {
            return Err(AppError::Auth("Token request failed with status 401".to_string()));
        }
        Ok(self.issued.clone())
    }
}

pub struct FakeWeather {
    pub log: CallLog,
}

#[async_trait]
impl WeatherApi for FakeWeather {
    async fn weather_at(&self, dt: i64, lat: f64, lon: f64) -> Result<Option<Value>> {
        self.log.push(Call::Weather { dt, lat, lon });
        Ok(Some(json!({ "temp": 283.2, "weather": [{ "main": "Clear" }] })))
    }
}

pub struct FakeGeocoder {
    pub log: CallLog,
    pub fail: bool,
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Value>> {
        self.log.push(Call::Geocode { lat, lon });
        if self.fail {
            return Err(AppError::Enrichment("Geocoding HTTP 503".to_string()));
        }
        let city = if lat > 37.33 { "Cupertino" } else { "Sunnyvale" };
        Ok(Some(json!({ "city": city, "country": "United States" })))
    }
}

/// Console stand-in that "pastes" a fixed redirect URL.
#[allow(dead_code)]
pub struct FakePrompt {
    pub redirect: String,
    pub shown: Arc<Mutex<Vec<String>>>,
}

impl AuthorizationPrompt for FakePrompt {
    fn redirect_url(&self, authorize_url: &str) -> Result<String> {
        self.shown.lock().unwrap().push(authorize_url.to_string());
        Ok(self.redirect.clone())
    }
}

#[allow(dead_code)]
pub fn config(yaml: &str) -> UserConfig {
    UserConfig::from_yaml(yaml).expect("test config should be valid")
}

/// Pipeline over fakes; weather is wired only if the config has a key.
#[allow(dead_code)]
pub fn pipeline(
    config: UserConfig,
    activities: Vec<Activity>,
    log: &CallLog,
    geocoder_fails: bool,
) -> UpdatePipeline<FakeStrava> {
    pipeline_over(
        config,
        FakeStrava::new(log.clone(), activities),
        log,
        geocoder_fails,
    )
}

#[allow(dead_code)]
pub fn pipeline_over(
    config: UserConfig,
    strava: FakeStrava,
    log: &CallLog,
    geocoder_fails: bool,
) -> UpdatePipeline<FakeStrava> {
    let weather: Option<Box<dyn WeatherApi>> = config
        .weather_api_key
        .as_ref()
        .map(|_| Box::new(FakeWeather { log: log.clone() }) as Box<dyn WeatherApi>);

    let resolver = EnrichmentResolver::new(
        weather,
        Box::new(FakeGeocoder {
            log: log.clone(),
            fail: geocoder_fails,
        }),
    );

    UpdatePipeline::new(config, strava, resolver)
}

#[allow(dead_code)]
pub fn orchestrator(
    config: UserConfig,
    activities: Vec<Activity>,
    log: &CallLog,
    issued: Credentials,
    redirect: &str,
) -> Orchestrator<FakeAuth, FakeStrava, FakePrompt> {
    orchestrator_over(
        config,
        FakeStrava::new(log.clone(), activities),
        log,
        issued,
        redirect,
    )
}

#[allow(dead_code)]
pub fn orchestrator_over(
    config: UserConfig,
    strava: FakeStrava,
    log: &CallLog,
    issued: Credentials,
    redirect: &str,
) -> Orchestrator<FakeAuth, FakeStrava, FakePrompt> {
    Orchestrator::new(
        FakeAuth {
            log: log.clone(),
            client_id: config.client_id.clone(),
            issued,
            fail: false,
        },
        FakePrompt {
            redirect: redirect.to_string(),
            shown: Arc::new(Mutex::new(Vec::new())),
        },
        pipeline_over(config, strava, log, false),
    )
}

/// What [`serve_once`] received.
#[allow(dead_code)]
#[derive(Debug)]
pub struct Received {
    /// e.g. `GET /athlete/activities?after=0&per_page=30 HTTP/1.1`
    pub request_line: String,
    pub body: String,
}

/// Answer exactly one HTTP request on a local port with `status` and a JSON
/// `body`. Returns the server's base URL and a handle yielding the request.
#[allow(dead_code)]
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<Received>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}", listener.local_addr().unwrap());

    let handle = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line).await.unwrap();

        let mut content_length = 0;
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).await.unwrap();
            if header.trim().is_empty() {
                break;
            }
            if let Some((name, value)) = header.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    content_length = value.trim().parse().unwrap();
                }
            }
        }

        let mut request_body = vec![0; content_length];
        reader.read_exact(&mut request_body).await.unwrap();

        let response = format!(
            "HTTP/1.1 {} Test\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        let stream = reader.get_mut();
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        Received {
            request_line: request_line.trim_end().to_string(),
            body: String::from_utf8(request_body).unwrap(),
        }
    });

    (base_url, handle)
}
