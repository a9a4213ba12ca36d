//! Checkout route handlers

use askama::Template;
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::pricing::requests::default_guests;
use crate::pricing::responses::{MoneyResponse, PriceBreakdownResponse};
use crate::pricing::quote_stay;
use crate::session::require_session;
use crate::AppState;

use super::flow::{Checkout, CheckoutStep, Confirmation, ContactDetails, DetailsForm};

/// Request to open a checkout from the booking widget
#[derive(Debug, Deserialize)]
pub struct BeginCheckoutRequest {
    pub listing_title: String,
    #[serde(default)]
    pub check_in: String,
    #[serde(default)]
    pub check_out: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub nightly_rate: Decimal,
    #[serde(default = "default_guests")]
    pub guests: u32,
    #[serde(default)]
    pub max_guests: Option<u32>,
}

/// Checkout state as seen by the client
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub id: Uuid,
    pub step: CheckoutStep,
    pub listing_title: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub nightly_rate: MoneyResponse,
    pub breakdown: PriceBreakdownResponse,
    pub contact: Option<ContactDetails>,
    pub confirmation: Option<Confirmation>,
}

impl From<&Checkout> for CheckoutResponse {
    fn from(checkout: &Checkout) -> Self {
        let currency = &checkout.quote.currency;
        Self {
            id: checkout.id,
            step: checkout.step,
            listing_title: checkout.listing_title.clone(),
            check_in: checkout.dates.check_in(),
            check_out: checkout.dates.check_out(),
            guests: checkout.quote.guests,
            nightly_rate: MoneyResponse::new(checkout.quote.nightly_rate, currency),
            breakdown: PriceBreakdownResponse::from_breakdown(&checkout.quote.breakdown, currency),
            contact: checkout.contact.clone(),
            confirmation: checkout.confirmation.clone(),
        }
    }
}

/// Checkout summary page
#[derive(Template)]
#[template(path = "checkout/summary.html")]
struct CheckoutSummaryTemplate {
    listing_title: String,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: u32,
    guests_label: &'static str,
    currency: String,
    nightly_rate: Decimal,
    nights: u32,
    subtotal: Decimal,
    cleaning_fee: Decimal,
    service_fee: Decimal,
    taxes: Decimal,
    total: Decimal,
    step: CheckoutStep,
    has_confirmation: bool,
    confirmation_code: String,
    qr_png_base64: String,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(begin))
        .route("/api/checkout/:id", get(show))
        .route("/api/checkout/:id/details", post(submit_details))
        .route("/api/checkout/:id/confirm", post(confirm))
        .route("/checkout/:id", get(summary_page))
}

/// Open a checkout. Requires a session and both dates.
pub async fn begin(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<BeginCheckoutRequest>,
) -> Result<(StatusCode, Json<CheckoutResponse>)> {
    let session = require_session(&state, &headers).await?;

    let quote = quote_stay(
        &req.check_in,
        &req.check_out,
        req.nightly_rate,
        req.guests,
        req.max_guests,
        &state.config.fees,
    )?;
    let checkout = Checkout::begin(session.user.id, req.listing_title, quote, Utc::now())?;
    let checkout = state.cache.checkouts.save(checkout).await;

    tracing::info!(
        checkout_id = %checkout.id,
        user_id = %session.user.id,
        total = %checkout.quote.breakdown.total,
        "Checkout started"
    );

    Ok((StatusCode::CREATED, Json(CheckoutResponse::from(&*checkout))))
}

pub async fn show(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>> {
    let checkout = load_owned(&state, &headers, id).await?;
    Ok(Json(CheckoutResponse::from(&*checkout)))
}

/// Details step: contact and card information
pub async fn submit_details(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(form): Json<DetailsForm>,
) -> Result<Json<CheckoutResponse>> {
    let session = require_session(&state, &headers).await?;
    let checkout = state
        .cache
        .checkouts
        .update(id, &session.user.id, |checkout| checkout.submit_details(&form))
        .await
        .ok_or(AppError::NotFound)??;

    Ok(Json(CheckoutResponse::from(&*checkout)))
}

/// Payment step: simulated, always succeeds
pub async fn confirm(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<CheckoutResponse>> {
    let session = require_session(&state, &headers).await?;
    let checkout = state
        .cache
        .checkouts
        .update(id, &session.user.id, |checkout| {
            checkout.confirm_payment(Utc::now()).map(|_| ())
        })
        .await
        .ok_or(AppError::NotFound)??;

    if let Some(confirmation) = &checkout.confirmation {
        tracing::info!(checkout_id = %checkout.id, code = %confirmation.code, "Booking confirmed");
    }

    Ok(Json(CheckoutResponse::from(&*checkout)))
}

/// Server-rendered summary; the checkout id is the capability.
pub async fn summary_page(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>> {
    let checkout = state
        .cache
        .checkouts
        .get(&id)
        .await
        .ok_or(AppError::NotFound)?;

    let breakdown = &checkout.quote.breakdown;
    let (confirmation_code, qr_png_base64) = match &checkout.confirmation {
        Some(c) => (c.code.clone(), c.qr_png_base64.clone()),
        None => (String::new(), String::new()),
    };

    let template = CheckoutSummaryTemplate {
        listing_title: checkout.listing_title.clone(),
        check_in: checkout.dates.check_in(),
        check_out: checkout.dates.check_out(),
        guests: checkout.quote.guests,
        guests_label: if checkout.quote.guests > 1 { "guests" } else { "guest" },
        currency: checkout.quote.currency.clone(),
        nightly_rate: checkout.quote.nightly_rate,
        nights: breakdown.nights,
        subtotal: breakdown.subtotal,
        cleaning_fee: breakdown.cleaning_fee,
        service_fee: breakdown.service_fee,
        taxes: breakdown.taxes,
        total: breakdown.total,
        step: checkout.step,
        has_confirmation: checkout.confirmation.is_some(),
        confirmation_code,
        qr_png_base64,
    };

    Ok(Html(template.render()?))
}

async fn load_owned(state: &AppState, headers: &HeaderMap, id: Uuid) -> Result<Arc<Checkout>> {
    let session = require_session(state, headers).await?;
    state
        .cache
        .checkouts
        .get_owned(&id, &session.user.id)
        .await
        .ok_or(AppError::NotFound)
}
