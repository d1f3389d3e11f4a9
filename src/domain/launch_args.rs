//! Usage: Decode desktop launch arguments (flags or `kadekolku://` links) into a launch intent.

use super::launch_signal::{
    widget_action, LaunchIntent, EXTRA_SHORTCUT_ACTION, EXTRA_TRANSACTION_TYPE,
    SHORTCUT_ADD_TRANSACTION,
};

pub(crate) const APP_URL_SCHEME: &str = "kadekolku";
const LINK_ADD_TRANSACTION: &str = "add-transaction";
const LINK_WIDGET: &str = "widget";

fn parse_flag(arg: &str) -> Option<(&str, &str)> {
    let (name, value) = arg.strip_prefix("--")?.split_once('=')?;
    Some((name.trim(), value.trim()))
}

fn parse_link(arg: &str, app_id: &str) -> Option<LaunchIntent> {
    let url = tauri::Url::parse(arg.trim()).ok()?;
    if !url.scheme().eq_ignore_ascii_case(APP_URL_SCHEME) {
        return None;
    }

    // `kadekolku://add-transaction` puts the target in the host; `kadekolku:add-transaction`
    // puts it in the path.
    let target = url
        .host_str()
        .map(str::to_string)
        .unwrap_or_else(|| url.path().trim_matches('/').to_string());

    match target.to_ascii_lowercase().as_str() {
        LINK_ADD_TRANSACTION => {
            let mut intent = LaunchIntent::default()
                .with_extra(EXTRA_SHORTCUT_ACTION, SHORTCUT_ADD_TRANSACTION);
            if let Some((_, kind)) = url.query_pairs().find(|(key, _)| key == "type") {
                intent = intent.with_extra(EXTRA_TRANSACTION_TYPE, kind.into_owned());
            }
            Some(intent)
        }
        LINK_WIDGET => Some(LaunchIntent::default().with_action(widget_action(app_id))),
        _ => None,
    }
}

/// `argv[0]` is the program path and is skipped. Later arguments override earlier ones.
pub(crate) fn parse_launch_args(argv: &[String], app_id: &str) -> Option<LaunchIntent> {
    let mut intent = LaunchIntent::default();

    for arg in argv.iter().skip(1) {
        if let Some((name, value)) = parse_flag(arg) {
            match name {
                "shortcut-action" => {
                    intent.extras.insert(EXTRA_SHORTCUT_ACTION.to_string(), value.to_string());
                }
                "transaction-type" => {
                    intent.extras.insert(EXTRA_TRANSACTION_TYPE.to_string(), value.to_string());
                }
                "action" => intent.action = Some(value.to_string()),
                _ => {}
            }
            continue;
        }

        if let Some(link) = parse_link(arg, app_id) {
            intent.extras.extend(link.extras);
            if link.action.is_some() {
                intent.action = link.action;
            }
        }
    }

    if intent.is_empty() {
        None
    } else {
        Some(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::navigation;

    const APP_ID: &str = "com.kadekolku.app";

    fn argv(args: &[&str]) -> Vec<String> {
        std::iter::once("kade-kolku")
            .chain(args.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_arguments_is_none() {
        assert_eq!(parse_launch_args(&argv(&[]), APP_ID), None);
        assert_eq!(parse_launch_args(&[], APP_ID), None);
    }

    #[test]
    fn program_path_is_ignored() {
        let args = vec!["--shortcut-action=add_transaction".to_string()];
        assert_eq!(parse_launch_args(&args, APP_ID), None);
    }

    #[test]
    fn shortcut_flags_become_extras() {
        let intent = parse_launch_args(
            &argv(&["--shortcut-action=add_transaction", "--transaction-type=income"]),
            APP_ID,
        )
        .expect("intent");
        assert_eq!(
            navigation::decide(Some(&intent), APP_ID).map(navigation::target_path),
            Some(navigation::NEW_INCOME_TRANSACTION_PATH)
        );
    }

    #[test]
    fn action_flag_sets_intent_action() {
        let intent = parse_launch_args(
            &argv(&["--action=com.kadekolku.app.ADD_TRANSACTION"]),
            APP_ID,
        )
        .expect("intent");
        assert_eq!(
            intent.action.as_deref(),
            Some("com.kadekolku.app.ADD_TRANSACTION")
        );
    }

    #[test]
    fn add_transaction_link_decodes_type() {
        let intent = parse_launch_args(&argv(&["kadekolku://add-transaction?type=income"]), APP_ID)
            .expect("intent");
        assert_eq!(
            intent.string_extra(EXTRA_SHORTCUT_ACTION),
            Some(SHORTCUT_ADD_TRANSACTION)
        );
        assert_eq!(intent.string_extra(EXTRA_TRANSACTION_TYPE), Some("income"));

        let intent = parse_launch_args(&argv(&["kadekolku://add-transaction"]), APP_ID)
            .expect("intent");
        assert_eq!(intent.string_extra(EXTRA_TRANSACTION_TYPE), None);
    }

    #[test]
    fn widget_link_sets_widget_action() {
        let intent = parse_launch_args(&argv(&["kadekolku://widget"]), APP_ID).expect("intent");
        assert_eq!(
            navigation::decide(Some(&intent), APP_ID).map(navigation::target_path),
            Some(navigation::NEW_TRANSACTION_PATH)
        );
    }

    #[test]
    fn foreign_links_and_unknown_flags_are_ignored() {
        assert_eq!(
            parse_launch_args(
                &argv(&["https://budget.example.app/transactions/new", "--verbose", "--x=y"]),
                APP_ID
            ),
            None
        );
        assert_eq!(
            parse_launch_args(&argv(&["kadekolku://reports"]), APP_ID),
            None
        );
    }
}
