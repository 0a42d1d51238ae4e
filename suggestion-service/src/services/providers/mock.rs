//! Counting mock providers for router-level tests.

use super::{CompletionProvider, ProviderError, TrendProvider};
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

pub struct MockTrendProvider {
    trends: Vec<String>,
    fail_with: Option<String>,
    call_count: AtomicU64,
}

impl MockTrendProvider {
    pub fn returning(trends: Vec<&str>) -> Self {
        Self {
            trends: trends.into_iter().map(str::to_string).collect(),
            fail_with: None,
            call_count: AtomicU64::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            trends: Vec::new(),
            fail_with: Some(message.to_string()),
            call_count: AtomicU64::new(0),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrendProvider for MockTrendProvider {
    async fn fetch_trending(&self, niche: &str) -> Result<Vec<String>, ProviderError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        tracing::info!(niche = %niche, "[MOCK] Trend lookup");

        match &self.fail_with {
            Some(message) => Err(ProviderError::Api(message.clone())),
            None => Ok(self.trends.clone()),
        }
    }
}

pub struct MockCompletionProvider {
    fail_on_call: Option<u64>,
    calls: Mutex<Vec<String>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self {
            fail_on_call: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Fail the nth generate call (1-based); earlier calls succeed.
    pub fn failing_on_call(n: u64) -> Self {
        Self {
            fail_on_call: Some(n),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Trends passed to generate, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> u64 {
        self.calls.lock().unwrap().len() as u64
    }
}

impl Default for MockCompletionProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn generate(&self, trend: &str) -> Result<String, ProviderError> {
        let call_number = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(trend.to_string());
            calls.len() as u64
        };

        tracing::info!(trend = %trend, "[MOCK] Completion");

        if self.fail_on_call == Some(call_number) {
            return Err(ProviderError::Api(format!(
                "Mock completion failure for '{}'",
                trend
            )));
        }

        Ok(format!("Idea for {}", trend))
    }
}
