pub const SCAN_KEY_PREFIX: &str = "qris:scan";
pub const PAYMENT_KEY_PREFIX: &str = "qris:payment";
pub const TOP_UP_KEY_PREFIX: &str = "qris:top_up";
pub const PAYMENT_TOP_UP_INDEX_PREFIX: &str = "qris:payment_top_up";
pub const VOID_KEY_PREFIX: &str = "qris:void";
