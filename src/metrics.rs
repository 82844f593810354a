//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, IntCounterVec, IntGauge, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // Database Metrics
    pub static ref DB_QUERIES_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_db_queries_total", "Total number of database queries"),
        &["operation", "table"]
    ).expect("metric can be created");

    // Auth Metrics
    pub static ref AUTH_ATTEMPTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_auth_attempts_total", "Total number of authentication attempts"),
        &["operation", "outcome"]
    ).expect("metric can be created");

    // State Store Metrics
    pub static ref STORE_MUTATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_store_mutations_total", "Total number of state store mutations"),
        &["operation"]
    ).expect("metric can be created");
    pub static ref ACTIVE_SESSION_STORES: IntGauge = IntGauge::new(
        "trendlab_active_session_stores",
        "Current number of materialized per-session state stores"
    ).expect("metric can be created");
    pub static ref NOTIFICATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_notifications_total", "Total notifications by terminal state"),
        &["outcome"]
    ).expect("metric can be created");

    // Generator Metrics
    pub static ref GENERATIONS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_generations_total", "Total content generation requests"),
        &["platform", "status"]
    ).expect("metric can be created");
    pub static ref GENERATION_DURATION_SECONDS: prometheus::HistogramVec = prometheus::HistogramVec::new(
        HistogramOpts::new(
            "trendlab_generation_duration_seconds",
            "Content generation duration in seconds"
        ).buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["platform"]
    ).expect("metric can be created");

    // Application Metrics
    pub static ref USERS_TOTAL: IntGauge = IntGauge::new(
        "trendlab_users_total",
        "Total number of registered users"
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("trendlab_errors_total", "Total number of errors"),
        &["error_type", "endpoint"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
pub fn init_metrics() {
    REGISTRY
        .register(Box::new(DB_QUERIES_TOTAL.clone()))
        .expect("DB_QUERIES_TOTAL can be registered");
    REGISTRY
        .register(Box::new(AUTH_ATTEMPTS_TOTAL.clone()))
        .expect("AUTH_ATTEMPTS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(STORE_MUTATIONS_TOTAL.clone()))
        .expect("STORE_MUTATIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ACTIVE_SESSION_STORES.clone()))
        .expect("ACTIVE_SESSION_STORES can be registered");
    REGISTRY
        .register(Box::new(NOTIFICATIONS_TOTAL.clone()))
        .expect("NOTIFICATIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(GENERATIONS_TOTAL.clone()))
        .expect("GENERATIONS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(GENERATION_DURATION_SECONDS.clone()))
        .expect("GENERATION_DURATION_SECONDS can be registered");
    REGISTRY
        .register(Box::new(USERS_TOTAL.clone()))
        .expect("USERS_TOTAL can be registered");
    REGISTRY
        .register(Box::new(ERRORS_TOTAL.clone()))
        .expect("ERRORS_TOTAL can be registered");

    tracing::info!("Metrics registry initialized");
}
