//! Usage: Launch routing domain (intent decoding, navigation policy, token mirroring).

pub(crate) mod launch_args;
pub(crate) mod launch_router;
pub(crate) mod launch_signal;
pub(crate) mod navigation;
pub(crate) mod token_mirror;
