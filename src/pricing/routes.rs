//! Pricing route handlers

use axum::{extract::State, routing::post, Json, Router};

use crate::error::Result;
use crate::AppState;

use super::calculators::{compute_breakdown, compute_nights};
use super::models::check_stay_length;
use super::requests::{ComputeBreakdownRequest, ComputeNightsRequest, QuoteStayRequest};
use super::responses::{NightsResponse, PriceBreakdownResponse, StayQuoteResponse};
use super::services::{parse_stay_date, quote_stay};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/pricing/nights", post(nights))
        .route("/api/pricing/breakdown", post(breakdown))
        .route("/api/pricing/quote", post(quote))
}

/// Count nights; unset dates count as zero and the order does not matter.
pub async fn nights(Json(req): Json<ComputeNightsRequest>) -> Result<Json<NightsResponse>> {
    let check_in = parse_stay_date("check_in", &req.check_in)?;
    let check_out = parse_stay_date("check_out", &req.check_out)?;

    Ok(Json(NightsResponse {
        nights: compute_nights(check_in, check_out),
    }))
}

/// Price a number of nights under the configured fees
pub async fn breakdown(
    State(state): State<AppState>,
    Json(req): Json<ComputeBreakdownRequest>,
) -> Result<Json<PriceBreakdownResponse>> {
    let fees = &state.config.fees;
    let nights = check_stay_length(req.nights)?;
    let policy = fees.policy_for(req.nightly_rate)?;
    let breakdown = compute_breakdown(nights, &policy);

    Ok(Json(PriceBreakdownResponse::from_breakdown(
        &breakdown,
        &fees.currency,
    )))
}

/// Quote a stay for the booking widget
pub async fn quote(
    State(state): State<AppState>,
    Json(req): Json<QuoteStayRequest>,
) -> Result<Json<StayQuoteResponse>> {
    let quote = quote_stay(
        &req.check_in,
        &req.check_out,
        req.nightly_rate,
        req.guests,
        req.max_guests,
        &state.config.fees,
    )?;

    Ok(Json(StayQuoteResponse::from(&quote)))
}
