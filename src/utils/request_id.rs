use rand::Rng;

/// Source of externally visible registration identifiers
pub trait RequestIdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Random 64-bit value rendered as lowercase hex
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomRequestIdGenerator;

impl RequestIdGenerator for RandomRequestIdGenerator {
    fn generate(&self) -> String {
        format!("{:x}", rand::thread_rng().gen::<u64>())
    }
}

/// Hands out ids from a fixed list, then falls back to a counter
#[cfg(test)]
pub struct SequenceRequestIdGenerator {
    ids: std::sync::Mutex<std::collections::VecDeque<String>>,
    counter: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl SequenceRequestIdGenerator {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: std::sync::Mutex::new(ids.into_iter().map(Into::into).collect()),
            counter: std::sync::atomic::AtomicU64::new(1),
        }
    }
}

#[cfg(test)]
impl RequestIdGenerator for SequenceRequestIdGenerator {
    fn generate(&self) -> String {
        if let Some(id) = self.ids.lock().unwrap().pop_front() {
            return id;
        }
        let n = self.counter.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        format!("{:016x}", n)
    }
}
