// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use std::time::{Duration, Instant};

/// Receives progress of the automatic bridging operations.
///
/// Calls are synchronous and report only; an operation cannot be cancelled
/// from here.
pub trait AutoBridgingCallback {
    /// `percent` is in `0..=100`.
    fn invoke(&mut self, percent: u32);

    /// Minimum time between two calls.
    fn offset(&self) -> Duration;
}

/// Adapter turning a closure into an [`AutoBridgingCallback`].
pub struct FnCallback<F: FnMut(u32)> {
    f: F,
    offset: Duration,
}

impl<F: FnMut(u32)> FnCallback<F> {
    pub fn new(offset: Duration, f: F) -> Self {
        Self { f, offset }
    }
}

impl<F: FnMut(u32)> AutoBridgingCallback for FnCallback<F> {
    fn invoke(&mut self, percent: u32) {
        (self.f)(percent)
    }

    fn offset(&self) -> Duration {
        self.offset
    }
}

/// Counts work units of one operation and forwards the percentage to the
/// callback, no more often than its offset allows.
pub(crate) struct ProgressTracker {
    callback: Option<Box<dyn AutoBridgingCallback>>,
    fallback_interval: Duration,
    current: u64,
    total: u64,
    last_callback_time: Option<Instant>,
}

impl ProgressTracker {
    pub(crate) fn new(fallback_interval: Duration) -> Self {
        Self {
            callback: None,
            fallback_interval,
            current: 0,
            total: 0,
            last_callback_time: None,
        }
    }

    pub(crate) fn set_callback(&mut self, callback: Option<Box<dyn AutoBridgingCallback>>) {
        self.callback = callback;
    }

    pub(crate) fn set_fallback_interval(&mut self, interval: Duration) {
        self.fallback_interval = interval;
    }

    /// Start a new operation of `total` units.
    pub(crate) fn begin(&mut self, total: u64) {
        self.current = 0;
        self.total = total;
        self.last_callback_time = None;
        self.emit(0, true);
    }

    /// Jump to an absolute unit count.
    pub(crate) fn advance_to(&mut self, current: u64) {
        self.current = current;
        self.emit(self.percent(), false);
    }

    #[inline]
    pub(crate) fn increment_by(&mut self, amount: u64) {
        self.current = self.current.saturating_add(amount);
        self.emit(self.percent(), false);
    }

    pub(crate) fn finish(&mut self) {
        self.current = self.total;
        self.emit(100, true);
    }

    #[inline]
    fn percent(&self) -> u32 {
        if self.total == 0 {
            0
        } else {
            ((self.current.min(self.total) as f64 / self.total as f64) * 100.0).round() as u32
        }
    }

    fn emit(&mut self, percent: u32, force: bool) {
        let Some(cb) = self.callback.as_mut() else {
            return;
        };
        let interval = if cb.offset().is_zero() {
            self.fallback_interval
        } else {
            cb.offset()
        };
        let now = Instant::now();
        let due = self
            .last_callback_time
            .is_none_or(|last| now.duration_since(last) >= interval);
        if force || due {
            cb.invoke(percent);
            self.last_callback_time = Some(now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn throttles_between_begin_and_finish() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let mut tracker = ProgressTracker::new(Duration::from_millis(100));
        tracker.set_callback(Some(Box::new(FnCallback::new(
            Duration::from_secs(3600),
            move |p| sink.borrow_mut().push(p),
        ))));

        tracker.begin(1000);
        for _ in 0..1000 {
            tracker.increment_by(1);
        }
        tracker.finish();

        assert_eq!(*calls.borrow(), vec![0, 100]);
    }
}
