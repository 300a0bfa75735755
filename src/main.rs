use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use cyber_quote::config::AppConfig;
use cyber_quote::error::AppError;
use cyber_quote::telemetry;
use cyber_quote::workflows::quoting::{
    assessment_router, AssessmentRecord, AssessmentService, CompanyProfile, EmployeeBracket,
    Industry, MemoryAssessmentRepository, QuoteEngine, RevenueBracket, RiskCategory, ScoreValue,
    SessionId,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
}

#[derive(Parser, Debug)]
#[command(
    name = "Cyber Quote Service",
    about = "Serve and demonstrate the cyber insurance quote engine",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Compute and print a quote offline from command-line inputs
    Quote(QuoteArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct QuoteArgs {
    /// Company name shown on the quote
    #[arg(long)]
    company: Option<String>,
    /// Industry segment (unknown values price as Other)
    #[arg(long)]
    industry: Option<String>,
    /// Employee bracket: 1-10, 11-50, 51-250, 251-1000, or 1000+
    #[arg(long, value_parser = parse_employee_bracket)]
    employees: Option<EmployeeBracket>,
    /// Revenue bracket: <$1M, $1M-$10M, $10M-$100M, or $100M+
    #[arg(long, value_parser = parse_revenue_bracket)]
    revenue: Option<RevenueBracket>,
    /// Category answer as CATEGORY=SCORE, e.g. --score "MFA=3" (repeatable)
    #[arg(long = "score", value_parser = parse_score_assignment)]
    scores: Vec<ScoreAssignment>,
}

#[derive(Debug, Clone)]
struct ScoreAssignment {
    category: RiskCategory,
    value: ScoreValue,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Quote(args) => run_quote_demo(args),
    }
}

fn parse_employee_bracket(raw: &str) -> Result<EmployeeBracket, String> {
    EmployeeBracket::from_label(raw).ok_or_else(|| {
        format!("'{raw}' is not an employee bracket (try 1-10, 11-50, 51-250, 251-1000, 1000+)")
    })
}

fn parse_revenue_bracket(raw: &str) -> Result<RevenueBracket, String> {
    RevenueBracket::from_label(raw).ok_or_else(|| {
        format!("'{raw}' is not a revenue bracket (try <$1M, $1M-$10M, $10M-$100M, $100M+)")
    })
}

fn parse_score_assignment(raw: &str) -> Result<ScoreAssignment, String> {
    let (name, score) = raw
        .split_once('=')
        .ok_or_else(|| format!("'{raw}' is not CATEGORY=SCORE"))?;
    let category = RiskCategory::from_label(name)
        .ok_or_else(|| format!("'{name}' is not a known security category"))?;
    let value = score
        .trim()
        .parse::<u8>()
        .ok()
        .and_then(|n| ScoreValue::new(n).ok())
        .ok_or_else(|| format!("'{score}' is not a score between 1 and 4"))?;
    Ok(ScoreAssignment { category, value })
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let repository = Arc::new(MemoryAssessmentRepository::default());
    let engine = QuoteEngine::new(config.pricing.rating_tables());
    let service = Arc::new(AssessmentService::new(repository, engine));

    let app = Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .with_state(state)
        .merge(assessment_router(service))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "cyber quote service ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_quote_demo(args: QuoteArgs) -> Result<(), AppError> {
    let QuoteArgs {
        company,
        industry,
        employees,
        revenue,
        scores,
    } = args;

    let mut record = AssessmentRecord::empty(SessionId("cli-demo".to_string()));
    record.apply_company(CompanyProfile {
        name: company,
        industry: industry.as_deref().map(Industry::parse),
        employees,
        revenue,
    });
    for assignment in scores {
        record.record_score(assignment.category, assignment.value);
    }

    let engine = QuoteEngine::default();
    let quote = engine.quote(&record);
    println!("{}", engine.render(&quote));

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
