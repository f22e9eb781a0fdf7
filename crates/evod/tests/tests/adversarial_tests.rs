
#[path = "adversarial/paused_breaker.rs"]
mod paused_breaker;

#[path = "adversarial/snapshot_tamper.rs"]
mod snapshot_tamper;
