//! Usage: Map a launch signal to the in-app navigation target (path + absolute URL).

use super::launch_signal::{LaunchIntent, LaunchSignal, TransactionType};

pub(crate) const NEW_TRANSACTION_PATH: &str = "/transactions/new";
pub(crate) const NEW_INCOME_TRANSACTION_PATH: &str = "/transactions/new?type=income";

pub(crate) fn target_path(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => NEW_INCOME_TRANSACTION_PATH,
        TransactionType::Expense => NEW_TRANSACTION_PATH,
    }
}

pub(crate) fn target_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Pure intent -> navigation decision. `None` means "do nothing".
pub(crate) fn decide(intent: Option<&LaunchIntent>, app_id: &str) -> Option<TransactionType> {
    LaunchSignal::decode(intent?, app_id).transaction_type()
}
