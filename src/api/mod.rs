pub mod cli;

use axum::{
    Router,
    extract::{Json, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{debug, info};

use crate::advisor::Advisor;
use crate::core::summary::{goal_context, investment_context, loan_context};
use crate::core::{
    GoalParameters, GoalSolution, InputError, InvestmentParameters, InvestmentProjection,
    LoanComposition, LoanParameters, LoanSummary, amortize, project, solve,
};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct CompoundPayload {
    initial_amount: Option<f64>,
    monthly_contribution: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    annual_rate: Option<f64>,
    period_years: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LoanPayload {
    #[serde(alias = "loanAmount")]
    principal: Option<f64>,
    #[serde(alias = "annualRatePercent", alias = "interestRate")]
    annual_rate: Option<f64>,
    term_months: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct GoalPayload {
    target_amount: Option<f64>,
    current_savings: Option<f64>,
    #[serde(alias = "annualRatePercent")]
    annual_rate: Option<f64>,
    timeframe_months: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct InsightsPayload {
    context: String,
}

/// Parameters echoed back next to the computed result and its advisory context.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse<P, R> {
    pub params: P,
    pub result: R,
    pub context: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insight: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResult {
    #[serde(flatten)]
    pub summary: LoanSummary,
    pub composition: LoanComposition,
}

#[derive(Debug, Serialize)]
struct InsightsResponse {
    insight: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub type CompoundResponse = CalculationResponse<InvestmentParameters, InvestmentProjection>;
pub type LoanResponse = CalculationResponse<LoanParameters, LoanResult>;
pub type GoalResponse = CalculationResponse<GoalParameters, GoalSolution>;

pub fn compound_response(params: InvestmentParameters) -> Result<CompoundResponse, InputError> {
    params.validate()?;
    let result = project(&params);
    let context = investment_context(&params, &result);
    Ok(CalculationResponse {
        params,
        result,
        context,
        insight: None,
    })
}

pub fn loan_response(params: LoanParameters) -> Result<LoanResponse, InputError> {
    params.validate()?;
    let summary = amortize(&params);
    let context = loan_context(&params, &summary);
    Ok(CalculationResponse {
        params,
        result: LoanResult {
            summary,
            composition: summary.composition(),
        },
        context,
        insight: None,
    })
}

pub fn goal_response(params: GoalParameters) -> Result<GoalResponse, InputError> {
    params.validate()?;
    let result = solve(&params);
    let context = goal_context(&params, &result);
    Ok(CalculationResponse {
        params,
        result,
        context,
        insight: None,
    })
}

fn investment_params_from_payload(payload: CompoundPayload) -> InvestmentParameters {
    let mut params = InvestmentParameters::default();
    if let Some(v) = payload.initial_amount {
        params.initial_amount = v;
    }
    if let Some(v) = payload.monthly_contribution {
        params.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate {
        params.annual_rate_percent = v;
    }
    if let Some(v) = payload.period_years {
        params.period_years = v;
    }
    params
}

fn loan_params_from_payload(payload: LoanPayload) -> LoanParameters {
    let mut params = LoanParameters::default();
    if let Some(v) = payload.principal {
        params.principal = v;
    }
    if let Some(v) = payload.annual_rate {
        params.annual_rate_percent = v;
    }
    if let Some(v) = payload.term_months {
        params.term_months = v;
    }
    params
}

fn goal_params_from_payload(payload: GoalPayload) -> GoalParameters {
    let mut params = GoalParameters::default();
    if let Some(v) = payload.target_amount {
        params.target_amount = v;
    }
    if let Some(v) = payload.current_savings {
        params.current_savings = v;
    }
    if let Some(v) = payload.annual_rate {
        params.annual_rate_percent = v;
    }
    if let Some(v) = payload.timeframe_months {
        params.timeframe_months = v;
    }
    params
}

pub fn router(advisor: Advisor) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route(
            "/api/compound",
            get(compound_get_handler).post(compound_post_handler),
        )
        .route("/api/loan", get(loan_get_handler).post(loan_post_handler))
        .route("/api/goal", get(goal_get_handler).post(goal_post_handler))
        .route("/api/insights", post(insights_handler))
        .fallback(not_found_handler)
        .with_state(advisor)
}

pub async fn run_http_server(addr: SocketAddr, advisor: Advisor) -> std::io::Result<()> {
    let advisory = if advisor.is_enabled() {
        "enabled"
    } else {
        "disabled (API_KEY not set)"
    };
    let app = router(advisor);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, advisory, "finansmart HTTP API listening");
    info!("Local access: http://127.0.0.1:{}/", addr.port());

    axum::serve(listener, app).await
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn compound_get_handler(Query(payload): Query<CompoundPayload>) -> Response {
    calculation_reply(compound_response(investment_params_from_payload(payload)))
}

async fn compound_post_handler(Json(payload): Json<CompoundPayload>) -> Response {
    calculation_reply(compound_response(investment_params_from_payload(payload)))
}

async fn loan_get_handler(Query(payload): Query<LoanPayload>) -> Response {
    calculation_reply(loan_response(loan_params_from_payload(payload)))
}

async fn loan_post_handler(Json(payload): Json<LoanPayload>) -> Response {
    calculation_reply(loan_response(loan_params_from_payload(payload)))
}

async fn goal_get_handler(Query(payload): Query<GoalPayload>) -> Response {
    calculation_reply(goal_response(goal_params_from_payload(payload)))
}

async fn goal_post_handler(Json(payload): Json<GoalPayload>) -> Response {
    calculation_reply(goal_response(goal_params_from_payload(payload)))
}

async fn insights_handler(
    State(advisor): State<Advisor>,
    Json(payload): Json<InsightsPayload>,
) -> Response {
    if payload.context.trim().is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "context must not be empty");
    }
    let insight = advisor.insights(&payload.context).await;
    json_response(StatusCode::OK, InsightsResponse { insight })
}

fn calculation_reply<T: Serialize>(result: Result<T, InputError>) -> Response {
    match result {
        Ok(body) => json_response(StatusCode::OK, body),
        Err(e) => {
            debug!(error = %e, "rejected calculation input");
            error_response(StatusCode::BAD_REQUEST, &e.to_string())
        }
    }
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("no-store"),
    );
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::MISSING_KEY_MESSAGE;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn app() -> Router {
        router(Advisor::Disabled)
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, json: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request")
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("request")
    }

    #[test]
    fn payload_overlays_only_given_fields() {
        let payload: CompoundPayload =
            serde_json::from_str(r#"{"monthlyContribution": 750, "periodYears": 3}"#)
                .expect("payload");
        let params = investment_params_from_payload(payload);
        assert_eq!(params.initial_amount, 5_000.0);
        assert_eq!(params.monthly_contribution, 750.0);
        assert_eq!(params.annual_rate_percent, 10.0);
        assert_eq!(params.period_years, 3);
    }

    #[test]
    fn loan_payload_accepts_form_aliases() {
        let payload: LoanPayload =
            serde_json::from_str(r#"{"loanAmount": 12000, "interestRate": 0, "termMonths": 12}"#)
                .expect("payload");
        let params = loan_params_from_payload(payload);
        assert_eq!(params.principal, 12_000.0);
        assert_eq!(params.annual_rate_percent, 0.0);
        assert_eq!(params.term_months, 12);
    }

    #[test]
    fn loan_response_flattens_summary_next_to_composition() {
        let response = loan_response(LoanParameters {
            principal: 12_000.0,
            annual_rate_percent: 0.0,
            term_months: 12,
        })
        .expect("valid loan");
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(json["result"]["monthlyPayment"], 1_000.0);
        assert_eq!(json["result"]["totalInterest"], 0.0);
        assert_eq!(json["result"]["composition"]["principal"], 12_000.0);
        assert!(json.get("insight").is_none());
        assert!(json["context"].as_str().expect("context").contains("Parcela Mensal"));
    }

    #[test]
    fn goal_response_rejects_zero_timeframe() {
        let err = goal_response(GoalParameters {
            timeframe_months: 0,
            ..GoalParameters::default()
        })
        .expect_err("must reject");
        assert_eq!(err.to_string(), "timeframeMonths must be > 0");
    }

    #[tokio::test]
    async fn compound_get_uses_defaults() {
        let response = app().oneshot(get_request("/api/compound")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).expect("header"),
            "no-store"
        );
        let json = body_json(response).await;
        assert_eq!(json["params"]["periodYears"], 10);
        assert_eq!(json["result"]["series"].as_array().expect("series").len(), 11);
        assert_eq!(json["result"]["totalInvested"], 65_000.0);
    }

    #[tokio::test]
    async fn compound_query_parameters_override_defaults() {
        let response = app()
            .oneshot(get_request("/api/compound?initialAmount=1000&monthlyContribution=100&annualRate=0&periodYears=2"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"]["finalBalance"], 3_400.0);
        assert_eq!(json["result"]["totalInterest"], 0.0);
    }

    #[tokio::test]
    async fn loan_post_computes_straight_line_at_zero_rate() {
        let response = app()
            .oneshot(post_json(
                "/api/loan",
                r#"{"principal": 12000, "annualRate": 0, "termMonths": 12}"#,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"]["monthlyPayment"], 1_000.0);
        assert_eq!(json["result"]["totalPayment"], 12_000.0);
    }

    #[tokio::test]
    async fn goal_post_reports_already_met_goal() {
        let response = app()
            .oneshot(post_json(
                "/api/goal",
                r#"{"targetAmount": 1000, "currentSavings": 5000, "annualRate": 5, "timeframeMonths": 12}"#,
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["result"]["requiredMonthlyContribution"], 0.0);
        assert_eq!(json["result"]["isPossible"], false);
    }

    #[tokio::test]
    async fn invalid_loan_is_bad_request() {
        let response = app()
            .oneshot(post_json("/api/loan", r#"{"principal": -5}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "principal must be > 0");
    }

    #[tokio::test]
    async fn oversized_horizons_are_bad_requests() {
        let response = app()
            .oneshot(get_request("/api/compound?periodYears=4000000000"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "periodYears must be <= 100");

        let response = app()
            .oneshot(post_json("/api/loan", r#"{"termMonths": 1201}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(post_json("/api/goal", r#"{"timeframeMonths": 4294967295}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "timeframeMonths must be <= 1200");
    }

    #[tokio::test]
    async fn out_of_range_rate_is_bad_request() {
        let response = app()
            .oneshot(get_request("/api/loan?annualRate=1e6"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "annualRatePercent must be between -500 and 500");
    }

    #[tokio::test]
    async fn insights_without_key_returns_configuration_message() {
        let response = app()
            .oneshot(post_json("/api/insights", r#"{"context": "Simulação"}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["insight"], MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn insights_rejects_blank_context() {
        let response = app()
            .oneshot(post_json("/api/insights", r#"{"context": "  "}"#))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn static_assets_and_fallback() {
        let response = app().oneshot(get_request("/")).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app().oneshot(get_request("/app.js")).await.expect("response");
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).expect("header"),
            "application/javascript; charset=utf-8"
        );

        let response = app().oneshot(get_request("/missing")).await.expect("response");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Not found");
    }
}
