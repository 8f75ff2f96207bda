use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};

/// Id source for new components and sections
///
/// Builders take this as a dependency so tests can swap in deterministic ids.
pub trait IdGenerator {
    /// Id for a new component of the given type (`{type}_{millis}_{suffix}`)
    fn component_id(&self, component_type: &str) -> String;

    /// Id for a new section (`section_{millis}`)
    fn section_id(&self) -> String;
}

/// Real id generator: wall-clock millis plus a 9 character base36 suffix
pub struct TimestampIdGenerator;

impl IdGenerator for TimestampIdGenerator {
    fn component_id(&self, component_type: &str) -> String {
        let now = chrono::Utc::now();
        format!(
            "{}_{}_{}",
            component_type,
            now.timestamp_millis(),
            random_suffix(now.timestamp_subsec_nanos())
        )
    }

    fn section_id(&self) -> String {
        static LAST: AtomicU64 = AtomicU64::new(0);

        // Two sections created within the same millisecond must still differ
        let millis = chrono::Utc::now().timestamp_millis().max(0) as u64;
        let mut prev = LAST.load(Ordering::Relaxed);
        loop {
            let next = millis.max(prev + 1);
            match LAST.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed) {
                Ok(_) => return format!("section_{}", next),
                Err(actual) => prev = actual,
            }
        }
    }
}

fn random_suffix(nanos: u32) -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(1);
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    // splitmix64 finalizer over nanos and a process-wide counter
    let mut x = (nanos as u64) ^ count.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^= x >> 31;

    to_base36(x, 9)
}

fn to_base36(mut value: u64, width: usize) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut out = Vec::with_capacity(width);
    for _ in 0..width {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// Deterministic generator for tests: `{type}_1`, `{type}_2`, `section_1`, ...
#[derive(Default)]
pub struct SequentialIdGenerator {
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    fn bump(&self) -> u64 {
        let n = self.next.get() + 1;
        self.next.set(n);
        n
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn component_id(&self, component_type: &str) -> String {
        format!("{}_{}", component_type, self.bump())
    }

    fn section_id(&self) -> String {
        format!("section_{}", self.bump())
    }
}
