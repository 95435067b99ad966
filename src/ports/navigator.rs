//! Navigator port - asks the external router to move to another route.

use crate::domain::access::Route;

/// Side effect the sign-in controller uses once an attempt succeeds.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Route);
}
