//! Async plumbing shared by service traits.
//!
//! Service traits return boxed futures so implementations can be swapped
//! for hand-written mocks in tests.

use std::future::Future;
use std::pin::Pin;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;
