//! Async operations that bridge the API clients and the stores.
//!
//! DESIGN
//! ======
//! Each service call talks to the API, translates wire records into domain
//! entities, and on success posts the resulting action on the event queue.
//! Validation failures are returned to the caller and post nothing. Hard
//! failures propagate; there is no retry.

pub mod page;
pub mod reviewers;
