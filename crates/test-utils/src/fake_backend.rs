use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use cache_warmer::errors::{CacheWarmerError, Result};
use cache_warmer::exec::WarmupBackend;

type Hook = Box<dyn FnMut() + Send>;

/// A fake rebuild backend that:
/// - counts how often it was called
/// - returns queued results (or `Ok("cache warmed")` once the queue is empty)
/// - optionally runs a hook during the call, e.g. to touch files while a
///   rebuild is "in flight".
pub struct FakeBackend {
    calls: Arc<AtomicUsize>,
    results: Arc<Mutex<VecDeque<Result<String>>>>,
    hook: Option<Hook>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(AtomicUsize::new(0)),
            results: Arc::new(Mutex::new(VecDeque::new())),
            hook: None,
        }
    }

    /// Queue a failing result for the next call.
    pub fn fail_next(self, message: &str) -> Self {
        self.results
            .lock()
            .unwrap()
            .push_back(Err(CacheWarmerError::CommandFailed {
                command: "php bin/console cache:warmup".to_string(),
                code: 1,
                output: message.to_string(),
            }));
        self
    }

    pub fn with_hook(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.hook = Some(Box::new(hook));
        self
    }

    /// Shared call counter, readable after the backend moved into a monitor.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl WarmupBackend for FakeBackend {
    fn run_cache_warmup(&mut self) -> Pin<Box<dyn Future<Output = Result<String>> + Send + '_>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(hook) = self.hook.as_mut() {
            hook();
        }
        let next = self.results.lock().unwrap().pop_front();

        Box::pin(async move { next.unwrap_or_else(|| Ok("cache warmed".to_string())) })
    }
}
