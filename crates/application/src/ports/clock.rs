/// Wall-clock source used for TTL bookkeeping, in whole unix seconds.
pub trait Clock: Send + Sync {
    fn now_secs(&self) -> u64;
}
