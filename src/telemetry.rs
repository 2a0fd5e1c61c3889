use prometheus::register_int_counter_vec;
use prometheus::IntCounterVec;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use lazy_static::lazy_static;

lazy_static! {
    pub static ref QUIZ_QUESTIONS_SERVED: IntCounterVec = register_int_counter_vec!(
        "trivia_quiz_questions_served_total",
        "Number of questions handed out by the quiz endpoint",
        &["category"]
    )
    .unwrap();
    pub static ref API_ERRORS: IntCounterVec = register_int_counter_vec!(
        "trivia_api_errors_total",
        "Number of error responses",
        &["status"]
    )
    .unwrap();
}

/// Used when `TRIVIA_LOG` is unset or does not parse.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn,tower_http=debug";

fn span_events(flag: Option<&str>) -> FmtSpan {
    match flag.map(str::trim) {
        Some("1") => FmtSpan::NEW | FmtSpan::CLOSE,
        Some(value) if value.eq_ignore_ascii_case("true") => FmtSpan::NEW | FmtSpan::CLOSE,
        _ => FmtSpan::NONE,
    }
}

fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Compact single-line logs filtered by `TRIVIA_LOG`.
/// `TRIVIA_LOG_SPANS=true` also logs request spans as they open and close.
pub fn init_tracing() {
    let directives = std::env::var("TRIVIA_LOG").ok();
    let spans = std::env::var("TRIVIA_LOG_SPANS").ok();

    let fmt_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_span_events(span_events(spans.as_deref()));

    tracing_subscriber::registry()
        .with(env_filter(directives.as_deref()))
        .with(fmt_layer)
        .init();
}
