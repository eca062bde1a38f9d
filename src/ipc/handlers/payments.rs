use chrono::Utc;
use serde_json::json;

use crate::i18n;
use crate::ipc::error::{ok, submit_err};
use crate::ipc::handlers::crud;
use crate::ipc::types::{AppState, Request};
use crate::model::{Payment, PaymentStatus};
use crate::selectors;
use crate::store::{Action, PaymentAction};
use crate::submit;

fn handle_mark_paid(state: &mut AppState, req: &Request) -> serde_json::Value {
    if let Err(resp) = crud::guard(state, req) {
        return resp;
    }
    let id = match crud::required_id(req, "id") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let locale = state.store.locale();
    let Some(current) = state.store.payments.get(&id) else {
        return crud::not_found(state, req, &id);
    };
    if current.status == PaymentStatus::Paid {
        return ok(
            &req.id,
            json!({
                "changed": false,
                "record": current,
                "notice": i18n::t(locale, "notice.unchanged"),
            }),
        );
    }

    let paid_at = Utc::now();
    let mut next = current.clone();
    next.status = PaymentStatus::Paid;
    next.paid_at = Some(paid_at);
    if let Err(e) = submit::push::<Payment>(&state.api, &next) {
        return submit_err(&req.id, locale, &e);
    }
    state.store.dispatch(Action::Payments(PaymentAction::MarkPaid {
        id: id.clone(),
        paid_at,
    }));
    ok(
        &req.id,
        json!({
            "changed": true,
            "record": state.store.payments.get(&id),
            "notice": i18n::t(locale, "notice.paymentRecorded"),
        }),
    )
}

fn handle_payments_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    let payments = &state.store.payments;
    let overdue = selectors::overdue_payments(payments, Utc::now());
    ok(
        &req.id,
        json!({
            "pendingTotal": selectors::pending_payments_total(payments),
            "overdueCount": overdue.len(),
            "overdue": overdue,
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "payments.markPaid" => Some(handle_mark_paid(state, req)),
        "payments.summary" => Some(handle_payments_summary(state, req)),
        _ => crud::try_handle::<Payment>(state, req, "payments", true),
    }
}
