/// Seconds since the Unix epoch, as reported by the provider
pub type EpochSeconds = i64;
