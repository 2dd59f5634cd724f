// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Collection of clock implementations.

use time::OffsetDateTime;

/// Generic definition of a clock.
pub trait Clock {
    /// Returns the current UTC time.
    fn now_utc(&self) -> OffsetDateTime;
}

/// Clock implementation that uses the system clock.
#[derive(Clone, Default)]
pub struct SystemClock {}

impl Clock for SystemClock {
    fn now_utc(&self) -> OffsetDateTime {
        let now = OffsetDateTime::now_utc();

        // Tokens carry their expiration with second resolution, so drop the sub-second part to
        // report the same instant to clients that we encode in the claims.
        now - time::Duration::nanoseconds(i64::from(now.nanosecond()))
    }
}

/// Test utilities.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::Duration;

    /// A clock that returns a preconfigured instant and that can be modified at will.
    ///
    /// Only supports second-level precision.
    pub struct SettableClock {
        /// Current fake time in seconds since the Unix epoch.
        now_secs: AtomicI64,
    }

    impl SettableClock {
        /// Creates a new clock that returns `now` until reconfigured with `set`.
        pub fn new(now: OffsetDateTime) -> Self {
            assert_eq!(0, now.nanosecond(), "Sub-second precision not supported");
            Self { now_secs: AtomicI64::new(now.unix_timestamp()) }
        }

        /// Sets the new value of `now` that the clock returns.
        pub fn set(&self, now: OffsetDateTime) {
            assert_eq!(0, now.nanosecond(), "Sub-second precision not supported");
            self.now_secs.store(now.unix_timestamp(), Ordering::SeqCst);
        }

        /// Advances the current time by `delta`.
        pub fn advance(&self, delta: Duration) {
            assert_eq!(0, delta.subsec_nanos(), "Sub-second precision not supported");
            let delta_secs = i64::try_from(delta.as_secs()).unwrap();
            self.now_secs.fetch_add(delta_secs, Ordering::SeqCst);
        }
    }

    impl Clock for SettableClock {
        fn now_utc(&self) -> OffsetDateTime {
            let now_secs = self.now_secs.load(Ordering::SeqCst);
            OffsetDateTime::from_unix_timestamp(now_secs).unwrap()
        }
    }

}
