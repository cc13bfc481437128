//! Origin-keyed fixed-window rate limiting for the contact form.
//!
//! State is process-local and injected into the router as middleware
//! state rather than living in a global. Entries are never evicted,
//! which is acceptable for a low-volume marketing form; a multi-instance
//! deployment should swap this for an externally-expiring shared store.

use std::{
    collections::HashMap,
    env,
    net::{IpAddr, SocketAddr},
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use axum::{
    body::Body,
    extract::{connect_info::ConnectInfo, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::IntakeError;

const DEFAULT_MAX_REQUESTS: u32 = 5;
const DEFAULT_WINDOW_SECONDS: u64 = 60;

#[derive(Clone)]
pub struct RateLimitState {
    config: Arc<RateLimitConfig>,
    windows: Arc<Mutex<HashMap<String, WindowState>>>,
}

impl RateLimitState {
    pub fn from_env() -> Self {
        Self::new(RateLimitConfig::from_env())
    }

    fn new(config: RateLimitConfig) -> Self {
        Self {
            config: Arc::new(config),
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Record one request from `origin`. Returns the decision; the count
    /// only advances for accepted requests, and a rejected request never
    /// resets the window early.
    fn check_origin(&self, origin: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter mutex poisoned");

        let window = windows
            .entry(origin.to_string())
            .or_insert_with(|| WindowState {
                window_start: now,
                count: 0,
            });

        if now.duration_since(window.window_start) >= self.config.window {
            window.window_start = now;
            window.count = 0;
        }

        let remaining_window = self
            .config
            .window
            .saturating_sub(now.duration_since(window.window_start));
        let reset_seconds = ceil_duration_to_seconds(remaining_window).max(1);

        if window.count >= self.config.max_requests {
            return RateLimitDecision {
                allowed: false,
                reset_seconds,
            };
        }

        window.count += 1;
        RateLimitDecision {
            allowed: true,
            reset_seconds,
        }
    }
}

struct RateLimitConfig {
    max_requests: u32,
    window: Duration,
}

impl RateLimitConfig {
    fn from_env() -> Self {
        let max_requests = env_u32("RATE_LIMIT_MAX_REQUESTS", DEFAULT_MAX_REQUESTS);
        let window_seconds = env_u64("RATE_LIMIT_WINDOW_SECONDS", DEFAULT_WINDOW_SECONDS).max(1);

        tracing::info!(max_requests, window_seconds, "Rate limiter configured");

        Self {
            max_requests,
            window: Duration::from_secs(window_seconds),
        }
    }
}

struct WindowState {
    window_start: Instant,
    count: u32,
}

struct RateLimitDecision {
    allowed: bool,
    reset_seconds: u64,
}

pub async fn rate_limit_middleware(
    State(limiter): State<RateLimitState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let origin = extract_client_ip(&request);
    let decision = limiter.check_origin(&origin);

    if !decision.allowed {
        tracing::warn!(origin = %origin, "rate limit exceeded");
        return IntakeError::RateLimited {
            retry_after_secs: decision.reset_seconds,
        }
        .into_response();
    }

    next.run(request).await
}

/// Derive the client origin from a full request.
pub fn extract_client_ip<B>(request: &Request<B>) -> String {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|connect_info| connect_info.0);
    client_origin(request.headers(), peer)
}

/// Derive the client origin: first parseable `x-forwarded-for` entry,
/// then `x-real-ip`, then the peer address, then `"unknown"`.
pub fn client_origin(headers: &axum::http::HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(ip) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_x_forwarded_for)
    {
        return ip.to_string();
    }

    if let Some(ip) = headers
        .get("x-real-ip")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_ip_addr)
    {
        return ip.to_string();
    }

    if let Some(addr) = peer {
        return addr.ip().to_string();
    }

    "unknown".to_string()
}

fn parse_x_forwarded_for(raw: &str) -> Option<IpAddr> {
    raw.split(',').map(str::trim).find_map(parse_ip_addr)
}

fn parse_ip_addr(raw: &str) -> Option<IpAddr> {
    raw.parse::<IpAddr>()
        .ok()
        .or_else(|| raw.parse::<SocketAddr>().ok().map(|addr| addr.ip()))
}

fn ceil_duration_to_seconds(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    match env::var(key) {
        Ok(raw) => match raw.parse::<u32>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Invalid value for {key} (`{raw}`), using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    match env::var(key) {
        Ok(raw) => match raw.parse::<u64>() {
            Ok(value) if value > 0 => value,
            _ => {
                tracing::warn!("Invalid value for {key} (`{raw}`), using default {default}");
                default
            }
        },
        Err(_) => default,
    }
}
