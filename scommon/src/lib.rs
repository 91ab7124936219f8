//! Shared primitives used across the selah workspace crates.
//!
//! ```rust
//! use scommon::{Clock, FixedClock, GenerationOptions, Registry};
//!
//! let mut registry = Registry::new();
//! registry.insert("gemini".to_string(), 1_u32);
//! registry.insert("groq".to_string(), 2_u32);
//!
//! let options = GenerationOptions::default().with_temperature(0.7);
//! let clock = FixedClock::from_timestamp(1_704_067_200);
//!
//! assert_eq!(registry.first_key().map(String::as_str), Some("gemini"));
//! assert_eq!(options.temperature, Some(0.7));
//! assert_eq!(clock.now().timestamp(), 1_704_067_200);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use scommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod model {
    //! Per-provider generation defaults.
    //!
    //! ```rust
    //! use scommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.7)
    //!     .with_max_tokens(512)
    //!     .enable_streaming();
    //!
    //! assert_eq!(options.temperature, Some(0.7));
    //! assert_eq!(options.max_tokens, Some(512));
    //! assert!(options.stream);
    //! ```

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub stream: bool,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_streaming(mut self, stream: bool) -> Self {
            self.stream = stream;
            self
        }

        pub fn enable_streaming(self) -> Self {
            self.with_streaming(true)
        }
    }
}

pub mod registry {
    //! Keyed registry that remembers insertion order.
    //!
    //! Lookups are hash based; iteration and [`Registry::first_key`] follow the
    //! order in which keys were first inserted.
    //!
    //! ```rust
    //! use scommon::Registry;
    //!
    //! let mut registry = Registry::new();
    //! registry.insert("beta".to_string(), 2_u32);
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! let keys: Vec<_> = registry.keys().cloned().collect();
    //! assert_eq!(keys, vec!["beta".to_string(), "alpha".to_string()]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct Registry<K, V> {
        items: HashMap<K, V>,
        order: Vec<K>,
    }

    impl<K, V> Default for Registry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                items: HashMap::new(),
                order: Vec::new(),
            }
        }
    }

    impl<K, V> Registry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts or replaces a value. Replacing keeps the original position.
        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            let previous = self.items.insert(key.clone(), value);
            if previous.is_none() {
                self.order.push(key);
            }
            previous
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.get(key)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            let removed = self.items.remove(key)?;
            self.order
                .retain(|existing| <K as Borrow<Q>>::borrow(existing) != key);
            Some(removed)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.items.contains_key(key)
        }

        pub fn first_key(&self) -> Option<&K> {
            self.order.first()
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.order.iter()
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.order.iter().filter_map(|key| self.items.get(key))
        }

        pub fn len(&self) -> usize {
            self.items.len()
        }

        pub fn is_empty(&self) -> bool {
            self.items.is_empty()
        }
    }
}

pub mod clock {
    //! Wall-clock access behind a trait so timestamps can be pinned in tests.
    //!
    //! ```rust
    //! use scommon::{Clock, FixedClock};
    //!
    //! let clock = FixedClock::from_timestamp(0);
    //! assert_eq!(clock.today().to_string(), "1970-01-01");
    //! ```

    use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

    pub trait Clock: Send + Sync {
        fn now(&self) -> DateTime<Utc>;

        /// Calendar date used when a caller omits one.
        fn today(&self) -> NaiveDate {
            self.now().date_naive()
        }
    }

    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }

        fn today(&self) -> NaiveDate {
            Local::now().date_naive()
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixedClock {
        instant: DateTime<Utc>,
    }

    impl FixedClock {
        pub fn new(instant: DateTime<Utc>) -> Self {
            Self { instant }
        }

        /// Out-of-range timestamps clamp to the Unix epoch.
        pub fn from_timestamp(seconds: i64) -> Self {
            let instant = Utc
                .timestamp_opt(seconds, 0)
                .single()
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
            Self { instant }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.instant
        }
    }
}

pub use clock::{Clock, FixedClock, SystemClock};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::Registry;

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, GenerationOptions, Registry};

    #[test]
    fn generation_options_builder_helpers_set_values() {
        let options = GenerationOptions::default()
            .with_temperature(0.3)
            .with_max_tokens(123)
            .enable_streaming();

        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(123));
        assert!(options.stream);
    }

    #[test]
    fn registry_keeps_insertion_order_across_replace_and_remove() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        assert!(registry.first_key().is_none());

        registry.insert("gemini".to_string(), 1_u32);
        registry.insert("groq".to_string(), 2_u32);
        registry.insert("gemini".to_string(), 3_u32);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("gemini"), Some(&3));
        assert_eq!(registry.first_key().map(String::as_str), Some("gemini"));
        assert_eq!(registry.values().copied().collect::<Vec<_>>(), vec![3, 2]);

        assert_eq!(registry.remove("gemini"), Some(3));
        assert_eq!(registry.first_key().map(String::as_str), Some("groq"));
        assert!(!registry.contains_key("gemini"));
        assert_eq!(registry.remove("gemini"), None);
    }

    #[test]
    fn fixed_clock_reports_pinned_instant() {
        let clock = FixedClock::from_timestamp(1_704_067_200);
        assert_eq!(clock.now().timestamp(), 1_704_067_200);
        assert_eq!(clock.today().to_string(), "2024-01-01");
    }
}
