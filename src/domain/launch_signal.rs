//! Usage: Decode OS launch intents (shortcut extras / widget action) into a typed launch signal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub(crate) const EXTRA_SHORTCUT_ACTION: &str = "shortcut_action";
pub(crate) const EXTRA_TRANSACTION_TYPE: &str = "transaction_type";
pub(crate) const SHORTCUT_ADD_TRANSACTION: &str = "add_transaction";
const WIDGET_ACTION_SUFFIX: &str = "ADD_TRANSACTION";
const TRANSACTION_TYPE_INCOME: &str = "income";

/// An OS-delivered launch intent: optional action string plus string-keyed extras.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LaunchIntent {
    pub action: Option<String>,
    pub extras: BTreeMap<String, String>,
}

impl LaunchIntent {
    pub fn string_extra(&self, key: &str) -> Option<&str> {
        self.extras.get(key).map(String::as_str)
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extras.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_none() && self.extras.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    // Only "income" is special; anything else (including absent) is the expense default.
    pub fn from_extra(value: Option<&str>) -> Self {
        match value {
            Some(TRANSACTION_TYPE_INCOME) => Self::Income,
            _ => Self::Expense,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchSignal {
    AddTransaction(TransactionType),
    WidgetAdd,
    Unrecognized,
}

pub(crate) fn widget_action(app_id: &str) -> String {
    format!("{app_id}.{WIDGET_ACTION_SUFFIX}")
}

impl LaunchSignal {
    /// Rules are ordered: a shortcut extra wins over the intent action.
    pub fn decode(intent: &LaunchIntent, app_id: &str) -> Self {
        if intent.string_extra(EXTRA_SHORTCUT_ACTION) == Some(SHORTCUT_ADD_TRANSACTION) {
            let kind = TransactionType::from_extra(intent.string_extra(EXTRA_TRANSACTION_TYPE));
            return Self::AddTransaction(kind);
        }

        if intent.action.as_deref() == Some(widget_action(app_id).as_str()) {
            return Self::WidgetAdd;
        }

        Self::Unrecognized
    }

    pub fn transaction_type(self) -> Option<TransactionType> {
        match self {
            Self::AddTransaction(kind) => Some(kind),
            Self::WidgetAdd => Some(TransactionType::Expense),
            Self::Unrecognized => None,
        }
    }
}
