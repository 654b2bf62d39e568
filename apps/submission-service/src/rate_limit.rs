// [apps/submission-service/src/rate_limit.rs]
//! Limitador de tasa por direccion de cliente: un cubo de fichas (token
//! bucket) simple, reemplazando el `slowapi` del original con una
//! estructura en memoria sin dependencias adicionales.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Mutex;
use std::time::Instant;

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Permite `capacity` solicitudes por `per_seconds` segundos, por
/// direccion de cliente, con relleno lineal continuo entre peticiones.
pub struct RateLimiter {
    capacity: f64,
    refill_per_second: f64,
    buckets: Mutex<HashMap<IpAddr, Bucket>>,
}

impl RateLimiter {
    pub fn new(capacity: u32, per_seconds: u64) -> Self {
        Self {
            capacity: capacity as f64,
            refill_per_second: capacity as f64 / per_seconds as f64,
            buckets: Mutex::new(HashMap::new()),
        }
    }

    /// Consume una ficha para `addr`. `true` si habia disponible.
    pub fn try_acquire(&self, addr: IpAddr) -> bool {
        let mut buckets = self.buckets.lock().expect("rate limiter mutex poisoned");
        let now = Instant::now();
        let bucket = buckets.entry(addr).or_insert_with(|| Bucket { tokens: self.capacity, last_refill: now });

        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_second).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_up_to_capacity_then_rejects() {
        let limiter = RateLimiter::new(5, 60);
        let addr: IpAddr = "127.0.0.1".parse().unwrap();
        for _ in 0..5 {
            assert!(limiter.try_acquire(addr));
        }
        assert!(!limiter.try_acquire(addr));
    }

    #[test]
    fn distinct_addresses_have_independent_buckets() {
        let limiter = RateLimiter::new(1, 60);
        let a: IpAddr = "127.0.0.1".parse().unwrap();
        let b: IpAddr = "127.0.0.2".parse().unwrap();
        assert!(limiter.try_acquire(a));
        assert!(limiter.try_acquire(b));
        assert!(!limiter.try_acquire(a));
    }
}
