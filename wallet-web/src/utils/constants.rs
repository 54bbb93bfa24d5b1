//! Application constants

/// Global the wallet extension injects its provider under
pub const PROVIDER_GLOBAL: &str = "ethereum";

/// Provider event fired when the active account set changes
pub const ACCOUNTS_CHANGED_EVENT: &str = "accountsChanged";

/// Title shown in the navbar
pub const APP_TITLE: &str = "StakeHunt";
